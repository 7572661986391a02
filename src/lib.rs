//! SHG Dashboard Library
//!
//! Re-exports modules for integration testing and the binaries.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod store;
pub mod views;

mod error;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use domain::{Amount, AmountError, DomainError, OperationContext};
pub use store::{MemoryStore, PgStore, ShgStore, StoreError};
