//! Command Handlers module
//!
//! Add-form commands and the handler that validates and inserts them.

mod commands;
mod insert_handler;


pub use commands::*;
pub use insert_handler::InsertHandler;
