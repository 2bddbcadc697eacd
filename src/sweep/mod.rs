//! The refresh-all sweep: enumerate active containers, then fetch and apply each in turn.

pub mod enumerator;
pub mod error;
pub mod orchestrator;
pub mod summary;

pub use enumerator::ContainerOwners;
pub use error::{RefreshError, SweepError};
pub use orchestrator::Sweeper;
pub use summary::{ContainerRefresh, SweepSummary};
