// Time Provider Port

/// Clock behind `created_at`, `joined_at` and the status stamps.
///
/// Everything in the system is milliseconds since the Unix epoch, and queue
/// ordering compares `joined_at` values directly, so tests inject stepping or
/// frozen clocks to make join order deterministic.
pub trait TimeProvider: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Production clock (wall time)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
