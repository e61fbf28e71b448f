//! Score progression: converts accumulated score into levels.
//!
//! Each level needs `round(base × growth^(level-1))` points. Points left over
//! after clearing a level carry into the next one, so a single large award can
//! clear several levels at once.

use serde::{Deserialize, Serialize};

use skyfire_core::config::ProgressionConfig;
use skyfire_core::state::ScoreView;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreProgression {
    current_level: u32,
    total_score: u64,
    level_score: u64,
    base_score_to_level: u64,
    level_growth: f64,
}

impl ScoreProgression {
    pub fn new(base_score_to_level: u64, level_growth: f64) -> Self {
        Self {
            current_level: 1,
            total_score: 0,
            level_score: 0,
            base_score_to_level,
            level_growth,
        }
    }

    pub fn from_config(config: &ProgressionConfig) -> Self {
        Self::new(config.base_score_to_level, config.level_growth)
    }

    /// Points needed to clear `level` (1-based). Rounds half to even and
    /// never returns less than one. Saturates at `u64::MAX`.
    pub fn threshold_for(&self, level: u32) -> u64 {
        let factor = i32::try_from(level.saturating_sub(1))
            .map(|exponent| self.level_growth.powi(exponent))
            .unwrap_or(f64::INFINITY);
        let raw = self.base_score_to_level as f64 * factor;
        (raw.round_ties_even() as u64).max(1)
    }

    /// Add `points` and apply every level-up they pay for.
    /// Returns the number of levels gained.
    pub fn award(&mut self, points: u64) -> u32 {
        self.total_score = self.total_score.saturating_add(points);
        self.level_score = self.level_score.saturating_add(points);

        let mut gained: u32 = 0;
        loop {
            let need = self.threshold_for(self.current_level);
            if self.level_score < need {
                break;
            }
            // The top level absorbs everything awarded after it.
            let Some(next) = self.current_level.checked_add(1) else {
                break;
            };
            self.level_score -= need;
            self.current_level = next;
            gained += 1;
        }
        gained
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    pub fn level_score(&self) -> u64 {
        self.level_score
    }

    /// Points needed to clear the current level.
    pub fn threshold(&self) -> u64 {
        self.threshold_for(self.current_level)
    }

    /// Fraction of the current level completed, clamped to [0, 1].
    pub fn progress(&self) -> f64 {
        (self.level_score as f64 / self.threshold() as f64).clamp(0.0, 1.0)
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            current_level: self.current_level,
            total_score: self.total_score,
            level_score: self.level_score,
            threshold: self.threshold(),
            progress: self.progress(),
        }
    }
}
