pub mod criteria;
pub mod error;
pub mod wizard;

// Re-exports : use crate::domain::DomainError;
pub use error::DomainError;
