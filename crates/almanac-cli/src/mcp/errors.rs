//! Error handling utilities for MCP server

use almanac_core::AlmanacError;
use rmcp::ErrorData;

/// Helper to convert scheduler errors to MCP errors
///
/// Bad input becomes `invalid_params`, missing records `resource_not_found`,
/// and everything else `internal_error`.
pub fn to_mcp_error(message: &str, error: &AlmanacError) -> ErrorData {
    let text = format!("{message}: {error}");
    if error.is_user_error() {
        ErrorData::invalid_params(text, None)
    } else if error.is_not_found() {
        ErrorData::resource_not_found(text, None)
    } else {
        ErrorData::internal_error(text, None)
    }
}

/// Error for a lookup that found nothing.
pub fn not_found(kind: &str, id: u64) -> ErrorData {
    ErrorData::resource_not_found(format!("{kind} with ID {id} not found"), None)
}
