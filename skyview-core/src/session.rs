//! Submit → fetch → render lifecycle.
//!
//! [`QuerySubmitter::submit`] spawns one fetch per non-blank query. Each fetch
//! reports back over a single-consumer channel, and the rendering side drains
//! it through [`Completions`] so that the render sink is only ever touched from
//! one task. Every submission gets an increasing request id; completions for
//! anything but the most recently issued id are dropped, so the latest query
//! wins even when an older request finishes last.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use chrono::{DateTime, TimeZone};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    error::{FetchError, PresentationError},
    model::{WeatherQuery, WeatherReading},
    presenter::{DisplayViewModel, present_outcome},
    provider::WeatherFetcher,
};

/// Lifecycle of the most recent submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    Requested,
    Succeeded,
    Failed,
}

/// Result of one fetch, tagged with the submission that caused it.
#[derive(Debug)]
pub struct Completion {
    pub request_id: u64,
    pub query: WeatherQuery,
    pub outcome: Result<WeatherReading, FetchError>,
}

/// Create a connected submitter/receiver pair around `fetcher`.
pub fn session(fetcher: Arc<dyn WeatherFetcher>) -> (QuerySubmitter, Completions) {
    let (tx, rx) = mpsc::unbounded_channel();
    let issued = Arc::new(AtomicU64::new(0));

    let submitter = QuerySubmitter {
        fetcher,
        issued: Arc::clone(&issued),
        tx,
    };

    let completions = Completions {
        rx,
        issued,
        settled: 0,
        last: RequestState::Idle,
    };

    (submitter, completions)
}

#[derive(Debug, Clone)]
pub struct QuerySubmitter {
    fetcher: Arc<dyn WeatherFetcher>,
    issued: Arc<AtomicU64>,
    tx: mpsc::UnboundedSender<Completion>,
}

impl QuerySubmitter {
    /// Start a fetch for `raw` unless it is blank. Must be called from within
    /// a tokio runtime.
    pub fn submit(&self, raw: Option<&str>) -> Option<WeatherQuery> {
        let Some(query) = WeatherQuery::parse(raw) else {
            debug!("ignoring blank submission");
            return None;
        };

        let request_id = self.issued.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(request_id, city = %query.city_name, "submitting weather request");

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();
        let task_query = query.clone();

        tokio::spawn(async move {
            let outcome = fetcher.fetch(&task_query).await;
            // Receiver gone: nobody is rendering any more.
            let _ = tx.send(Completion {
                request_id,
                query: task_query,
                outcome,
            });
        });

        Some(query)
    }
}

/// Receiving half of a session, owned by the rendering task.
#[derive(Debug)]
pub struct Completions {
    rx: mpsc::UnboundedReceiver<Completion>,
    issued: Arc<AtomicU64>,
    settled: u64,
    last: RequestState,
}

impl Completions {
    /// Next completion belonging to the latest submission.
    ///
    /// Returns `None` once every submitter and in-flight request is gone.
    pub async fn next(&mut self) -> Option<Completion> {
        while let Some(completion) = self.rx.recv().await {
            let latest = self.issued.load(Ordering::Acquire);
            if completion.request_id != latest {
                debug!(
                    request_id = completion.request_id,
                    latest,
                    city = %completion.query.city_name,
                    "discarding stale completion"
                );
                continue;
            }

            self.settled = completion.request_id;
            self.last = if completion.outcome.is_ok() {
                RequestState::Succeeded
            } else {
                RequestState::Failed
            };
            return Some(completion);
        }

        None
    }

    pub fn state(&self) -> RequestState {
        let issued = self.issued.load(Ordering::Acquire);
        if issued == 0 {
            RequestState::Idle
        } else if issued != self.settled {
            RequestState::Requested
        } else {
            self.last
        }
    }
}

/// The display target. Only the rendering task calls into it.
pub trait RenderSink {
    fn render(&mut self, view: &DisplayViewModel);
    fn report(&mut self, error: &PresentationError);
}

/// Applies completions to a single owned sink.
#[derive(Debug)]
pub struct Renderer<S> {
    sink: S,
}

impl<S: RenderSink> Renderer<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Present one completion and hand the result to the sink.
    pub fn apply<Tz>(&mut self, completion: Completion, now: &DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let city = completion.query.city_name;

        match present_outcome(completion.outcome, &city, now) {
            Ok(view) => {
                info!(
                    request_id = completion.request_id,
                    city = %city,
                    theme = %view.theme,
                    "rendering weather"
                );
                self.sink.render(&view);
            }
            Err(err) => {
                warn!(
                    request_id = completion.request_id,
                    city = %city,
                    reason = %err.reason,
                    error = %err.message,
                    "weather request failed"
                );
                self.sink.report(&err);
            }
        }
    }

    /// Render until the latest submission has completed, then return its state.
    /// Returns at once when nothing is in flight.
    pub async fn settle<Tz, F>(&mut self, completions: &mut Completions, mut clock: F) -> RequestState
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
        F: FnMut() -> DateTime<Tz>,
    {
        while completions.state() == RequestState::Requested {
            let Some(completion) = completions.next().await else {
                break;
            };
            let now = clock();
            self.apply(completion, &now);
        }

        completions.state()
    }

    /// Drain `completions` until the session closes, stamping each with `clock()`.
    pub async fn run<Tz, F>(&mut self, completions: &mut Completions, mut clock: F)
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
        F: FnMut() -> DateTime<Tz>,
    {
        while let Some(completion) = completions.next().await {
            let now = clock();
            self.apply(completion, &now);
        }
    }
}
