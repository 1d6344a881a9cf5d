//! Route and action policy
//!
//! A declarative, load-once table mapping resource identifiers (route
//! paths or action names) to the roles permitted to access them. The table
//! is read-only at request time; reloading requires a fresh process or
//! session.

mod config;
mod table;

pub use config::{PolicyConfig, PolicyConfigError};
pub use table::RoutePolicyTable;
