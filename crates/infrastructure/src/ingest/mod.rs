//! Transactional application of validated journey events.

pub mod writer;

pub use writer::JourneyEventWriter;
