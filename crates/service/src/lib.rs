//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod runtime;
pub mod pagination;
pub mod pet;
pub mod owner_service;
pub mod vet_service;
pub mod appointment_service;
pub mod visit_service;
pub mod review_service;
