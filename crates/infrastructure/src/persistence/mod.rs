pub mod postgres;

pub use postgres::journey_repository::PostgresJourneyRepository;
pub use postgres::outbox_repository::PostgresOutboxRepository;
pub use postgres::pool::{DatabasePool, DatabasePoolConfig, DatabasePoolError};
