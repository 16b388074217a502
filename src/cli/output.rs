//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::CommandError;

/// Map command errors to the single line printed on stderr.
pub fn map_error(e: &CommandError) -> String {
    match e {
        CommandError::Host(inner) => format!("Error: host call failed: {}", inner),
        other => format!("Error: {}", other),
    }
}
