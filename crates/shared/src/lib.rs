//! Shared kernel for the Railside journey platform: identifiers, journey
//! states, event topics, and configuration loading.

pub mod config;
pub mod event_topics;
pub mod ids;
pub mod states;

pub use event_topics::*;
pub use ids::*;
pub use states::*;
