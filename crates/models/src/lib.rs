pub mod errors;
pub mod db;
pub mod owner;
pub mod owner_credentials;
pub mod vet;
pub mod pet;
pub mod appointment;
pub mod visit;
pub mod review;
