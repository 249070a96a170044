pub use railside_shared::ids::{CorrelationId, JourneyId, UserId};
pub use railside_shared::states::JourneyStatus;

#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("Journey not found: {journey_id}")]
    JourneyNotFound { journey_id: JourneyId },

    #[error("Infrastructure error: {message}")]
    InfrastructureError { message: String },
}

pub type Result<T> = std::result::Result<T, DomainError>;
