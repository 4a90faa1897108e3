//! Domain error types.
//!
//! These errors represent validation failures in backend data. They are
//! distinct from transport errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// An identifier was empty
    #[error("{0} identifier cannot be empty")]
    EmptyId(&'static str),

    /// A location had a blank display name
    #[error("location {0} has an empty display name")]
    EmptyDisplayName(String),

    /// A route price was negative, NaN or infinite
    #[error("route {id} has an invalid price: {price}")]
    InvalidPrice { id: String, price: f64 },
}
