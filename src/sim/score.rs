//! Survival score accounting

use crate::consts::SCORE_RATE;

/// Accumulates survival score and tracks the persisted-best candidate.
///
/// `current` grows monotonically while the round is live and resets at
/// round start. `best` moves only through `finalize`, at most once per
/// round, and never decreases.
#[derive(Debug, Clone, Copy)]
pub struct ScoreKeeper {
    current: f64,
    best: u64,
    finalized: bool,
}

impl ScoreKeeper {
    pub fn new(best: u64) -> Self {
        Self {
            current: 0.0,
            best,
            finalized: false,
        }
    }

    /// Accrue survival score for one tick. Negative deltas count as zero.
    pub fn tick(&mut self, dt_ms: f64) {
        self.current += dt_ms.max(0.0) * SCORE_RATE;
    }

    /// Start-of-round reset. Leaves `best` alone and re-arms `finalize`.
    pub fn reset(&mut self) {
        self.current = 0.0;
        self.finalized = false;
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Whole-point score as shown on the HUD and compared against best.
    pub fn floored(&self) -> u64 {
        self.current.max(0.0).floor() as u64
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// End-of-round settlement: raises `best` to the floored score when it
    /// improved and returns the new best for the shell to persist. Repeat
    /// calls without an intervening `reset` return `None`.
    pub fn finalize(&mut self) -> Option<u64> {
        if self.finalized {
            return None;
        }
        self.finalized = true;
        let rounded = self.floored();
        if rounded > self.best {
            self.best = rounded;
            Some(rounded)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_accrues_at_fixed_rate() {
        let mut score = ScoreKeeper::new(0);
        score.tick(100.0);
        assert!((score.current() - 1.0).abs() < 1e-9);
        score.tick(50.0);
        assert!((score.current() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_negative_delta_does_not_reverse_score() {
        let mut score = ScoreKeeper::new(0);
        score.tick(100.0);
        let before = score.current();
        score.tick(-50.0);
        assert_eq!(score.current(), before);
    }

    #[test]
    fn test_finalize_improves_best() {
        let mut score = ScoreKeeper::new(10);
        score.tick(2500.0); // 25 points
        assert_eq!(score.finalize(), Some(25));
        assert_eq!(score.best(), 25);
    }

    #[test]
    fn test_finalize_keeps_higher_best() {
        let mut score = ScoreKeeper::new(100);
        score.tick(2500.0);
        assert_eq!(score.finalize(), None);
        assert_eq!(score.best(), 100);
    }

    #[test]
    fn test_finalize_runs_once_per_round() {
        let mut score = ScoreKeeper::new(0);
        score.tick(1000.0);
        assert_eq!(score.finalize(), Some(10));
        assert_eq!(score.finalize(), None);
        assert_eq!(score.best(), 10);
    }

    #[test]
    fn test_reset_clears_current_and_rearms() {
        let mut score = ScoreKeeper::new(0);
        score.tick(1000.0);
        score.finalize();
        score.reset();
        assert_eq!(score.current(), 0.0);
        assert_eq!(score.best(), 10);

        // A better second round can finalize again
        score.tick(2000.0);
        assert_eq!(score.finalize(), Some(20));
    }

    #[test]
    fn test_equal_floored_score_does_not_rewrite_best() {
        let mut score = ScoreKeeper::new(10);
        score.tick(1099.0); // floors to 10
        assert_eq!(score.finalize(), None);
        assert_eq!(score.best(), 10);
    }
}
