//! The long-running poll loop.
//!
//! fetch -> validate -> format -> notify -> sleep, forever. Any failure inside an
//! iteration is reported to the chat and the loop carries on after the usual delay.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use serde_json::Value;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::{
    api::StatusApi,
    catalog::StatusCatalog,
    config::Config,
    formatter::VerdictFormatter,
    notifier::Notifier,
    validator::{self, HomeworkRecord},
    Error, Result,
};

/// "What changed since when" boundary passed to the API as `from_date`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollCursor {
    from_date: i64,
}

impl PollCursor {
    pub fn at(from_date: i64) -> Self {
        Self { from_date }
    }

    pub fn starting_now() -> Self {
        Self::at(Utc::now().timestamp())
    }

    pub fn from_date(&self) -> i64 {
        self.from_date
    }

    /// Move to the server-reported timestamp, if any. Never moves backwards.
    pub fn advance(&mut self, server_date: Option<i64>) {
        if let Some(ts) = server_date {
            if ts > self.from_date {
                self.from_date = ts;
            }
        }
    }
}

/// Result of one loop iteration, after failures have been reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Iteration {
    /// Verdicts were delivered for this many homeworks.
    Notified(usize),
    /// The API returned no homeworks.
    Empty,
    /// The iteration failed and a failure message was sent.
    Failed,
}

pub struct Poller {
    api: Arc<dyn StatusApi>,
    notifier: Notifier,
    formatter: VerdictFormatter,
    interval: Duration,
    cursor: PollCursor,
}

impl Poller {
    pub fn new(cfg: &Config, api: Arc<dyn StatusApi>, notifier: Notifier) -> Self {
        Self::with_cursor(api, notifier, cfg.retry_interval, PollCursor::starting_now())
    }

    pub fn with_cursor(
        api: Arc<dyn StatusApi>,
        notifier: Notifier,
        interval: Duration,
        cursor: PollCursor,
    ) -> Self {
        Self {
            api,
            notifier,
            formatter: VerdictFormatter::new(StatusCatalog::new()),
            interval,
            cursor,
        }
    }

    pub fn cursor(&self) -> PollCursor {
        self.cursor
    }

    /// Run until `cancel` fires. Iteration failures never end the loop.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        info!(
            interval_secs = self.interval.as_secs(),
            from_date = self.cursor.from_date(),
            "poller started"
        );

        loop {
            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                res = self.api.fetch(self.cursor.from_date()) => res,
            };
            self.settle(fetched).await;

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = sleep(self.interval) => {}
            }
        }

        info!("poller stopped");
        Ok(())
    }

    /// One full iteration without the trailing sleep.
    pub async fn tick(&mut self) -> Iteration {
        let fetched = self.api.fetch(self.cursor.from_date()).await;
        self.settle(fetched).await
    }

    /// One iteration with failures propagated instead of reported.
    pub async fn poll_once(&mut self) -> Result<usize> {
        let fetched = self.api.fetch(self.cursor.from_date()).await;
        self.process(fetched).await
    }

    async fn settle(&mut self, fetched: Result<Value>) -> Iteration {
        match self.process(fetched).await {
            Ok(0) => Iteration::Empty,
            Ok(n) => Iteration::Notified(n),
            Err(e) => {
                error!(kind = e.kind().as_str(), "bot failure: {e}");
                self.notifier.deliver(&failure_message(&e)).await;
                Iteration::Failed
            }
        }
    }

    async fn process(&mut self, fetched: Result<Value>) -> Result<usize> {
        let response = fetched?;
        let homeworks = validator::validate(&response)?;

        if homeworks.is_empty() {
            debug!(from_date = self.cursor.from_date(), "no homework updates");
        } else {
            self.notify_all(&homeworks).await?;
        }

        self.cursor.advance(validator::current_date(&response));
        Ok(homeworks.len())
    }

    async fn notify_all(&self, homeworks: &[HomeworkRecord]) -> Result<()> {
        for record in homeworks {
            let message = self.formatter.format(record)?;
            self.notifier.deliver(&message).await;
        }
        Ok(())
    }
}

/// Chat text for a failed iteration.
pub fn failure_message(e: &Error) -> String {
    format!("Сбой в работе программы: {e}")
}
