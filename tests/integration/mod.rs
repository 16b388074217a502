//! Integration tests for weldment drawing generation

mod cli_session;
mod config_integration;
mod generate_pipeline;
mod note_composition;
mod store_integration;
mod test_utils;
