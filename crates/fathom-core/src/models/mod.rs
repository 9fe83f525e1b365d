//! Shared data models for the retrieval pipeline.

mod degradation_event;
mod fingerprint;
mod search_result;

pub use degradation_event::DegradationEvent;
pub use fingerprint::{Filters, QueryFingerprint};
pub use search_result::{RankedList, SearchResult, SourceSignal};
