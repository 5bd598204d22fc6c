//! Cross-cutting request concerns: caller identification and error mapping.

/// Extraction of the acting user from request headers
pub mod actor;
/// Mapping of domain errors to HTTP responses
pub mod error_handling;
