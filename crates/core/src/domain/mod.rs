// Domain Layer - Queue and Entry models

pub mod entry;
pub mod error;
pub mod queue;

pub use entry::{EntryId, EntryStatus, Msisdn, QueueEntry};
pub use error::DomainError;
pub use queue::{Queue, QueueId};
