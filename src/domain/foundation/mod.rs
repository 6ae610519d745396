//! Foundation - shared value objects for the domain layer.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ProgramId, SessionId};
pub use timestamp::Timestamp;
