//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain errors to a message for stderr.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::ListNotFound { .. } | ApiError::UserNotFound(_) => e.to_string(),
        ApiError::InvalidListFile(_) => format!("{e}\nExpected a JSON object mapping entry ids to names."),
        _ => format!("Error: {e}"),
    }
}
