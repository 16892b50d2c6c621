//! Configuration loading and schema definitions
//!
//! `clipmap.toml` holds three sections: `[map]`, `[history]` and `[logging]`.
//! Every key is optional.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
