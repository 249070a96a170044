pub mod journey_repository;
pub mod migrations;
pub mod outbox_repository;
pub mod pool;
