//! Integration tests for brush context resolution

mod alias_loading;
mod cli_status;
mod config_search_paths;
mod test_utils;
mod version_specific;

pub use test_utils::Sandbox;
