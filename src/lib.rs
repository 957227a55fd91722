//! Brush context resolution
//!
//! Discovers layered configuration sources for a brush invocation, loads
//! them into ranked contexts, and answers option lookups with per-command
//! precedence over the resulting stack.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
