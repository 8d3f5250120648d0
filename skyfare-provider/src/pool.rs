use std::sync::Arc;
use std::time::Duration;

use skyfare_core::ProviderError;
use tokio::sync::Semaphore;

use crate::app_config::PoolConfig;

/// Runs blocking provider calls on tokio's blocking threads, at most
/// `max_concurrent` at a time.
///
/// A submission waits for a free slot, then for its job; both waits together
/// are bounded by the pool timeout. A job that outlives its timeout keeps its
/// slot until it returns.
#[derive(Clone)]
pub struct BlockingPool {
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl BlockingPool {
    pub fn new(max_concurrent: usize, timeout: Duration) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            timeout,
        }
    }

    pub fn from_config(config: &PoolConfig) -> Self {
        Self::new(config.max_concurrent, config.timeout())
    }

    /// Free slots right now.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub async fn run<F, T>(&self, job: F) -> Result<T, ProviderError>
    where
        F: FnOnce() -> Result<T, ProviderError> + Send + 'static,
        T: Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        let submission = async move {
            let permit = permits
                .acquire_owned()
                .await
                .map_err(|_| ProviderError::WorkerFailed("worker pool closed".to_string()))?;

            tokio::task::spawn_blocking(move || {
                let _permit = permit;
                job()
            })
            .await
            .map_err(|e| ProviderError::WorkerFailed(e.to_string()))?
        };

        match tokio::time::timeout(self.timeout, submission).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("Provider call exceeded {:?}", self.timeout);
                Err(ProviderError::Timeout(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_run_returns_job_result() {
        let pool = BlockingPool::new(2, Duration::from_secs(1));
        let value = pool.run(|| Ok(21 * 2)).await.unwrap();
        assert_eq!(value, 42);
        assert_eq!(pool.available(), 2);
    }

    #[tokio::test]
    async fn test_run_passes_job_errors_through() {
        let pool = BlockingPool::new(1, Duration::from_secs(1));
        let result: Result<(), _> = pool.run(|| Err(ProviderError::Decode("bad json".to_string()))).await;
        assert_eq!(result, Err(ProviderError::Decode("bad json".to_string())));
    }

    #[tokio::test]
    async fn test_panicking_job_becomes_worker_failure() {
        let pool = BlockingPool::new(1, Duration::from_secs(1));
        let result: Result<(), _> = pool.run(|| panic!("boom")).await;
        assert!(matches!(result, Err(ProviderError::WorkerFailed(_))));
        // The slot is returned once the panicking thread unwinds.
        assert_eq!(pool.available(), 1);
    }

    #[tokio::test]
    async fn test_slow_job_times_out() {
        let pool = BlockingPool::new(1, Duration::from_millis(50));
        let result = pool
            .run(|| {
                std::thread::sleep(Duration::from_millis(300));
                Ok(())
            })
            .await;
        assert_eq!(result, Err(ProviderError::Timeout(Duration::from_millis(50))));
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let pool = BlockingPool::new(2, Duration::from_secs(5));
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..6 {
            let pool = pool.clone();
            let active = Arc::clone(&active);
            let peak = Arc::clone(&peak);
            tasks.spawn(async move {
                pool.run(move || {
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(30));
                    active.fetch_sub(1, Ordering::SeqCst);
                    Ok(())
                })
                .await
            });
        }

        while let Some(joined) = tasks.join_next().await {
            joined.unwrap().unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(pool.available(), 2);
    }
}
