use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use flume::{Receiver, RecvError};

/// Période de tick pour un FPS donné : `1000 / fps` millisecondes.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ll_render::ticker::period_for_fps;
/// assert_eq!(period_for_fps(25), Duration::from_millis(40));
/// assert_eq!(period_for_fps(1), Duration::from_secs(1));
/// ```
#[must_use]
pub fn period_for_fps(fps: u32) -> Duration {
    Duration::from_millis(1000) / fps.max(1)
}

/// Timer répétitif à période fixe, seule source de suspension du player.
///
/// A dedicated thread sleeps one period, sends a tick, and starts over.
/// The period is not corrected for drift or for time spent by the consumer.
/// Ticks go through an unbounded channel: when a render overruns the
/// period, the pending ticks wait behind it.
///
/// Dropping the receiving side stops the thread at its next tick.
pub struct Ticker {
    rx: Receiver<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    /// Start ticking every `period`, first tick one period from now.
    ///
    /// # Errors
    /// Returns an error if the timer thread cannot be spawned.
    pub fn start(period: Duration) -> Result<Self> {
        let (tx, rx) = flume::unbounded();
        let handle = thread::Builder::new()
            .name("ll-ticker".to_string())
            .spawn(move || {
                loop {
                    thread::sleep(period);
                    if tx.send(()).is_err() {
                        break;
                    }
                }
            })
            .context("Impossible de spawner le thread timer")?;

        log::debug!("Ticker démarré : période {period:?}");
        Ok(Self {
            rx,
            handle: Some(handle),
        })
    }

    /// Block until the next tick.
    ///
    /// # Errors
    /// Returns [`RecvError::Disconnected`] if the timer thread is gone.
    pub fn recv(&self) -> Result<(), RecvError> {
        self.rx.recv()
    }

    /// Halt the timer and wait for its thread. No tick is delivered after this.
    pub fn stop(mut self) {
        let handle = self.handle.take();
        drop(self);
        if let Some(handle) = handle
            && handle.join().is_err()
        {
            log::warn!("Le thread timer a paniqué");
        }
        log::debug!("Ticker arrêté");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn ticks_are_spaced_by_the_period() {
        let ticker = Ticker::start(Duration::from_millis(5)).unwrap();
        let start = Instant::now();
        for _ in 0..3 {
            ticker.recv().unwrap();
        }
        assert!(start.elapsed() >= Duration::from_millis(15));
        ticker.stop();
    }

    #[test]
    fn stop_joins_the_timer_thread() {
        let ticker = Ticker::start(Duration::from_millis(1)).unwrap();
        ticker.recv().unwrap();
        ticker.stop();
    }
}
