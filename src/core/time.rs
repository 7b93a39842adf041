use crate::domain::model::{TimeSample, TimeSource};
use crate::domain::ports::TimeProvider;
use chrono::Local;
use std::time::Instant;

/// Resolves a trustworthy "now" by walking an ordered list of remote time
/// providers. First success wins; every provider failing drops through to
/// the host clock, so `resolve` can never fail the run.
pub struct TimeResolver {
    providers: Vec<Box<dyn TimeProvider>>,
}

impl TimeResolver {
    pub fn new(providers: Vec<Box<dyn TimeProvider>>) -> Self {
        Self { providers }
    }

    pub async fn resolve(&self) -> TimeSample {
        let started = Instant::now();

        for provider in &self.providers {
            // One attempt per provider; each carries its own request timeout.
            match provider.attempt().await {
                Ok(timestamp) => {
                    tracing::info!(source = provider.name(), %timestamp, "network time acquired");
                    return TimeSample {
                        timestamp,
                        source: TimeSource::Remote(provider.name()),
                        acquired_in: started.elapsed(),
                    };
                }
                Err(e) => {
                    tracing::warn!(source = provider.name(), error = %e, "time provider failed, trying next");
                }
            }
        }

        tracing::warn!("all time providers failed, using local clock; accuracy may be degraded");
        TimeSample {
            timestamp: Local::now().naive_local(),
            source: TimeSource::LocalClock,
            acquired_in: started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{RenewError, Result};
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap()
    }

    struct WorkingProvider {
        name: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TimeProvider for WorkingProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn attempt(&self) -> Result<NaiveDateTime> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(fixed_time())
        }
    }

    struct FailingProvider {
        name: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TimeProvider for FailingProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn attempt(&self) -> Result<NaiveDateTime> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RenewError::Transient("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn first_success_wins_and_short_circuits() {
        let first_calls = Arc::new(AtomicUsize::new(0));
        let second_calls = Arc::new(AtomicUsize::new(0));

        let resolver = TimeResolver::new(vec![
            Box::new(WorkingProvider {
                name: "first",
                calls: first_calls.clone(),
            }),
            Box::new(WorkingProvider {
                name: "second",
                calls: second_calls.clone(),
            }),
        ]);

        let sample = resolver.resolve().await;

        assert_eq!(sample.source, TimeSource::Remote("first"));
        assert_eq!(sample.timestamp, fixed_time());
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn falls_through_failures_in_priority_order() {
        let first_calls = Arc::new(AtomicUsize::new(0));
        let second_calls = Arc::new(AtomicUsize::new(0));

        let resolver = TimeResolver::new(vec![
            Box::new(FailingProvider {
                name: "first",
                calls: first_calls.clone(),
            }),
            Box::new(WorkingProvider {
                name: "second",
                calls: second_calls.clone(),
            }),
        ]);

        let sample = resolver.resolve().await;

        assert_eq!(sample.source, TimeSource::Remote("second"));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn all_failures_fall_back_to_local_clock() {
        let calls = Arc::new(AtomicUsize::new(0));
        let resolver = TimeResolver::new(vec![
            Box::new(FailingProvider {
                name: "first",
                calls: calls.clone(),
            }),
            Box::new(FailingProvider {
                name: "second",
                calls: calls.clone(),
            }),
            Box::new(FailingProvider {
                name: "third",
                calls: calls.clone(),
            }),
        ]);

        let before = Local::now().naive_local();
        let sample = resolver.resolve().await;
        let after = Local::now().naive_local();

        assert!(sample.is_local_fallback());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(sample.timestamp >= before && sample.timestamp <= after);
    }

    #[tokio::test]
    async fn empty_provider_list_still_returns_a_sample() {
        let resolver = TimeResolver::new(vec![]);
        let sample = resolver.resolve().await;
        assert_eq!(sample.source, TimeSource::LocalClock);
    }
}
