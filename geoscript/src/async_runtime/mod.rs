use std::future::Future;

/// Runs the future in the background on the current tokio runtime.
///
/// Outside of a runtime the future is dropped: the work it would do must then be driven by whoever awaits its
/// shared parts.
pub fn spawn<T>(future: T)
where
    T: Future + Send + 'static,
    T::Output: Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(future);
        }
        Err(_) => {
            log::debug!("No async runtime is running, background task is not started");
        }
    }
}
