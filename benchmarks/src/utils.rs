use std::time::{Duration, Instant};

/// Run a function and measure its execution time.
///
/// # Returns
///
/// A tuple of (result, elapsed_time)
pub fn time_fn<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}
