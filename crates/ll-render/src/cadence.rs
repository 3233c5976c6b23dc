use std::time::{Duration, Instant};

/// Mesure de la cadence réelle de rendu face à la période cible.
///
/// Observation only: the player never adjusts its timer from these numbers.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ll_render::cadence::CadenceMeter;
/// let mut meter = CadenceMeter::new(Duration::from_millis(40));
/// meter.mark();
/// meter.mark();
/// assert_eq!(meter.renders(), 2);
/// ```
pub struct CadenceMeter {
    target: Duration,
    first: Option<Instant>,
    last: Option<Instant>,
    renders: usize,
    worst_interval: Duration,
    late: usize,
}

impl CadenceMeter {
    /// Create a meter for the given target period.
    #[must_use]
    pub fn new(target: Duration) -> Self {
        Self {
            target,
            first: None,
            last: None,
            renders: 0,
            worst_interval: Duration::ZERO,
            late: 0,
        }
    }

    /// Appeler une fois par frame, APRÈS le rendu.
    pub fn mark(&mut self) {
        self.mark_at(Instant::now());
    }

    fn mark_at(&mut self, now: Instant) {
        if let Some(last) = self.last {
            let interval = now.saturating_duration_since(last);
            self.worst_interval = self.worst_interval.max(interval);
            if interval > self.target + self.target / 2 {
                self.late += 1;
            }
        }
        self.first.get_or_insert(now);
        self.last = Some(now);
        self.renders += 1;
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Intervalle le plus long observé entre deux rendus.
    #[must_use]
    pub fn worst_interval(&self) -> Duration {
        self.worst_interval
    }

    /// Intervalles dépassant 1.5× la période cible.
    #[must_use]
    pub fn late(&self) -> usize {
        self.late
    }

    /// Mean frames per second between the first and the last render.
    #[must_use]
    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.first, self.last) else {
            return 0.0;
        };
        let secs = last.saturating_duration_since(first).as_secs_f64();
        if self.renders < 2 || secs <= 0.0 {
            return 0.0;
        }
        (self.renders - 1) as f64 / secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn late_intervals_are_counted() {
        let start = Instant::now();
        let mut meter = CadenceMeter::new(Duration::from_millis(40));
        meter.mark_at(start);
        meter.mark_at(start + Duration::from_millis(40));
        meter.mark_at(start + Duration::from_millis(140));
        assert_eq!(meter.renders(), 3);
        assert_eq!(meter.late(), 1);
        assert_eq!(meter.worst_interval(), Duration::from_millis(100));
        assert!((meter.fps() - 2.0 / 0.14).abs() < 1e-6);
    }

    #[test]
    fn single_render_has_no_rate() {
        let mut meter = CadenceMeter::new(Duration::from_millis(40));
        meter.mark();
        assert!(meter.fps().abs() < f64::EPSILON);
    }
}
