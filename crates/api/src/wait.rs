//! Waiting for a freshly created archive's bucket
//!
//! Archive creation returns before the bucket behind it is reachable. The
//! waiter polls until the bucket answers or the deadline passes, showing a
//! spinner on stderr unless quiet.

use std::future::Future;
use std::time::Duration;

use c14_core::Result;
use tokio::time::Instant;

/// Delay between two readiness probes
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Polls a readiness probe with an optional spinner
#[derive(Debug)]
pub struct BucketWaiter {
    timeout: Duration,
    interval: Duration,
    quiet: bool,
}

impl BucketWaiter {
    pub fn new(timeout: Duration, quiet: bool) -> Self {
        Self {
            timeout,
            interval: POLL_INTERVAL,
            quiet,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run `probe` until it reports ready or the timeout elapses
    ///
    /// Returns `Ok(false)` on timeout. Probe errors abort the wait.
    pub async fn run<F, Fut>(&self, mut probe: F) -> Result<bool>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let spinner = self.spinner();
        let deadline = Instant::now() + self.timeout;

        let outcome = loop {
            match probe().await {
                Ok(true) => break Ok(true),
                Ok(false) if Instant::now() + self.interval > deadline => break Ok(false),
                Ok(false) => tokio::time::sleep(self.interval).await,
                Err(e) => break Err(e),
            }
        };

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        outcome
    }

    fn spinner(&self) -> Option<indicatif::ProgressBar> {
        if self.quiet {
            return None;
        }
        let bar = indicatif::ProgressBar::new_spinner();
        if let Ok(style) = indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message("Waiting for the archive bucket...");
        bar.enable_steady_tick(Duration::from_millis(100));
        Some(bar)
    }
}
