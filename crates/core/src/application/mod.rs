// Application Layer - Use Cases and Business Logic

pub mod queue_ops;

// Re-exports
pub use queue_ops::QueueService;
