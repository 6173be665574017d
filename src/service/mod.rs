//! Lookup and ingestion services over the cleaned store.

mod ingest;
mod lookup;

pub use ingest::{EntityKind, IngestService, RandomTrainerSelector, TrainerSelector};
pub use lookup::LookupService;
