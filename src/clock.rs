use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

const CLOSE_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The catalog serves close timestamps with a space between date and time,
/// but a `T` delimiter is accepted as equivalent.
pub fn parse_close_at(raw: &str) -> Result<DateTime<Utc>, String> {
    let normalized = raw.trim().replace('T', " ");
    match NaiveDateTime::parse_from_str(&normalized, CLOSE_AT_FORMAT) {
        Ok(naive) => Ok(Utc.from_utc_datetime(&naive)),
        Err(e) => Err(format!("unparseable close timestamp \"{}\": {}", raw, e)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeRemaining {
    pub fn is_zero(&self) -> bool {
        *self == TimeRemaining::default()
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

/// Breakdown of `close_at - now`. Anything at or past the close time is the
/// zero tuple, the terminal state.
pub fn time_remaining(close_at: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
    let secs = (close_at - now).num_seconds();
    if secs <= 0 {
        return TimeRemaining::default();
    }
    let secs = secs as u64;
    TimeRemaining {
        days: secs / 86_400,
        hours: secs % 86_400 / 3_600,
        minutes: secs % 3_600 / 60,
        seconds: secs % 60,
    }
}

/// Live countdown to a listing's close time. One repeating one-second task
/// publishes through a watch channel; changing the close time tears the task
/// down and builds a fresh one instead of reusing the old interval.
pub struct CountdownClock {
    close_at: Option<DateTime<Utc>>,
    rx: watch::Receiver<TimeRemaining>,
    handle: Option<JoinHandle<()>>,
}

impl CountdownClock {
    pub fn start(raw_close_at: &str) -> CountdownClock {
        let close_at = match parse_close_at(raw_close_at) {
            Ok(at) => at,
            Err(e) => {
                // An unreadable close time renders as already closed rather
                // than taking the view down.
                warn!("{}", e);
                let (_tx, rx) = watch::channel(TimeRemaining::default());
                return CountdownClock {
                    close_at: None,
                    rx,
                    handle: None,
                };
            }
        };

        let (tx, rx) = watch::channel(time_remaining(close_at, Utc::now()));
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            // interval fires immediately once; the starting value was already
            // published above.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let left = time_remaining(close_at, Utc::now());
                if tx.send(left).is_err() {
                    break;
                }
                if left.is_zero() {
                    break;
                }
            }
        });

        CountdownClock {
            close_at: Some(close_at),
            rx,
            handle: Some(handle),
        }
    }

    pub fn remaining(&self) -> TimeRemaining {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<TimeRemaining> {
        self.rx.clone()
    }

    pub fn close_at(&self) -> Option<DateTime<Utc>> {
        self.close_at
    }

    /// Rebuild, not reset: the old task still closes over the old close time,
    /// so it is aborted and replaced wholesale.
    pub fn restart(&mut self, raw_close_at: &str) {
        self.stop();
        *self = CountdownClock::start(raw_close_at);
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for CountdownClock {
    fn drop(&mut self) {
        self.stop();
    }
}
