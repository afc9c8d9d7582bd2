//! Auth module: token codec, token service, revocation store, and the
//! account workflows built on top of them.
//!
//! Layering mirrors the rest of the service crate: domain types, a
//! repository abstraction with a sea-orm implementation, and services that
//! orchestrate them.

pub mod domain;
pub mod errors;
pub mod codec;
pub mod revocation;
pub mod token;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AccountService;
pub use token::TokenService;
