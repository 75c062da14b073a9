//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A parameter name sent to the store (e.g., `prod/db/password`).
///
/// Never empty when used as a lookup key.
pub type ParameterName = String;

/// An environment variable name (e.g., `DATABASE_URL`).
pub type VarName = String;
