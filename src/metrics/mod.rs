//! Counters for form outcomes and HTTP traffic.
//!
//! One [`Metrics`] is shared by the API client and by every page the server
//! opens. Clones share the same counters, so the binary can log a single
//! summary at shutdown.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// An outcome of a page operation worth counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormEvent {
    /// A record was loaded for view mode
    Fetched,
    /// Loading a record for view mode failed
    FetchFailed,
    /// The API accepted a new record
    Created,
    /// The API refused a submitted record
    SubmitRejected,
    /// Submit stopped on client-side validation
    SubmitBlocked,
    /// Submit refused because another one was in flight
    SubmitInProgress,
}

const EVENT_COUNT: usize = 6;

impl FormEvent {
    pub const ALL: [FormEvent; EVENT_COUNT] = [
        FormEvent::Fetched,
        FormEvent::FetchFailed,
        FormEvent::Created,
        FormEvent::SubmitRejected,
        FormEvent::SubmitBlocked,
        FormEvent::SubmitInProgress,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormEvent::Fetched => "fetched",
            FormEvent::FetchFailed => "fetch_failed",
            FormEvent::Created => "created",
            FormEvent::SubmitRejected => "submit_rejected",
            FormEvent::SubmitBlocked => "submit_blocked",
            FormEvent::SubmitInProgress => "submit_in_progress",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Default)]
struct Counters {
    events: [AtomicU64; EVENT_COUNT],
    http_requests: AtomicU64,
    http_failures: AtomicU64,
    http_millis: AtomicU64,
}

/// Shared counter set.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: FormEvent) {
        self.counters.events[event.slot()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self, event: FormEvent) -> u64 {
        self.counters.events[event.slot()].load(Ordering::Relaxed)
    }

    /// Run one HTTP exchange, recording its duration and whether it failed.
    pub fn observe_http<T, E>(&self, call: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let started = Instant::now();
        let result = call();
        self.record_http(started.elapsed(), result.is_ok());
        result
    }

    fn record_http(&self, elapsed: Duration, succeeded: bool) {
        let c = &self.counters;
        c.http_requests.fetch_add(1, Ordering::Relaxed);
        c.http_millis
            .fetch_add(elapsed.as_millis() as u64, Ordering::Relaxed);
        if !succeeded {
            c.http_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn http_requests(&self) -> u64 {
        self.counters.http_requests.load(Ordering::Relaxed)
    }

    pub fn http_failures(&self) -> u64 {
        self.counters.http_failures.load(Ordering::Relaxed)
    }

    /// Snapshot every counter.
    pub fn summary(&self) -> MetricsSummary {
        let requests = self.http_requests();
        let millis = self.counters.http_millis.load(Ordering::Relaxed);

        MetricsSummary {
            http_requests: requests,
            http_failures: self.http_failures(),
            http_avg_ms: if requests == 0 {
                0.0
            } else {
                millis as f64 / requests as f64
            },
            events: FormEvent::ALL
                .iter()
                .map(|&event| (event, self.count(event)))
                .collect(),
        }
    }
}

/// Point-in-time copy of [`Metrics`].
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub http_requests: u64,
    pub http_failures: u64,
    pub http_avg_ms: f64,
    pub events: Vec<(FormEvent, u64)>,
}

impl MetricsSummary {
    pub fn count(&self, event: FormEvent) -> u64 {
        self.events
            .iter()
            .find(|(e, _)| *e == event)
            .map_or(0, |(_, n)| *n)
    }
}

impl fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} HTTP requests ({} failed, avg {:.1} ms)",
            self.http_requests, self.http_failures, self.http_avg_ms
        )?;
        for (event, n) in self.events.iter().filter(|(_, n)| *n > 0) {
            write!(f, ", {}={}", event.name(), n)?;
        }
        Ok(())
    }
}
