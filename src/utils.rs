use once_cell::sync::Lazy;
use tokio::sync::oneshot;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

pub fn spawn_async<F>(fut: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    RUNTIME.spawn(fut);
}

/// Run `fut` on the shared runtime and hand its output back through a oneshot.
/// The receiver is runtime-agnostic, so the GTK main loop can await it.
pub fn run_async<T, Fut>(fut: Fut) -> oneshot::Receiver<T>
where
    T: Send + 'static,
    Fut: std::future::Future<Output = T> + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    spawn_async(async move {
        let _ = tx.send(fut.await);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_async_delivers_result() {
        let rx = run_async(async { 21 * 2 });
        assert_eq!(rx.blocking_recv().unwrap(), 42);
    }
}
