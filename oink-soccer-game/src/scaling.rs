//! Rating → probability weight transform.
//!
//! Raw ratings are too flat for a random game: an 84 would barely beat an 80.
//! The scaler maps each integer rating through a Gompertz-shaped curve so the
//! absolute weight gap widens sharply towards the top of the scale. The curve
//! ships as a precomputed table (no transcendental math at runtime) and is
//! versioned by name so replays can pin the exact table they ran with.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::constants::{SCALE_CEILING, SCALE_FLOOR};
use crate::numbers::round_f64_to_rating;

/// `round(100 * P(x) / P(100))` with `P(x) = 1 - exp(-exp(5x/100 - 5))`, floored at 1.
const GOMPERTZ_V1: [u32; 101] = [
    1, 1, 1, 1, 1, 1, 1, 2, 2, 2, // 0-9
    2, 2, 2, 2, 2, 2, 2, 2, 3, 3, // 10-19
    3, 3, 3, 3, 3, 4, 4, 4, 4, 4, // 20-29
    5, 5, 5, 5, 6, 6, 6, 7, 7, 7, // 30-39
    8, 8, 8, 9, 9, 10, 10, 11, 11, 12, // 40-49
    12, 13, 14, 14, 15, 16, 17, 17, 18, 19, // 50-59
    20, 21, 22, 23, 24, 25, 26, 28, 29, 30, // 60-69
    32, 33, 35, 36, 38, 39, 41, 43, 45, 47, // 70-79
    49, 51, 53, 55, 57, 60, 62, 64, 67, 69, // 80-89
    72, 75, 77, 80, 83, 86, 88, 91, 94, 97, // 90-99
    100,
];

pub const GOMPERTZ_V1_NAME: &str = "gompertz-k5-v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingCurve {
    #[serde(default = "ScalingCurve::default_version")]
    pub version: String,
    #[serde(default = "ScalingCurve::default_weights")]
    pub weights: Vec<u32>,
    #[serde(default = "ScalingCurve::default_floor")]
    pub floor: u32,
    #[serde(default = "ScalingCurve::default_ceiling")]
    pub ceiling: u32,
}

impl ScalingCurve {
    fn default_version() -> String {
        GOMPERTZ_V1_NAME.to_string()
    }

    fn default_weights() -> Vec<u32> {
        GOMPERTZ_V1.to_vec()
    }

    const fn default_floor() -> u32 {
        SCALE_FLOOR
    }

    const fn default_ceiling() -> u32 {
        SCALE_CEILING
    }

    /// Weight for an integer rating; ratings above 100 read the top entry.
    #[must_use]
    pub fn scale(&self, rating: u8) -> u32 {
        let idx = usize::from(rating.min(100));
        let raw = self
            .weights
            .get(idx)
            .or_else(|| self.weights.last())
            .copied()
            .unwrap_or(self.floor);
        // Floor wins over a reversed ceiling instead of panicking.
        raw.min(self.ceiling).max(self.floor)
    }

    /// Weight for a derived (possibly boosted, fractional) score.
    #[must_use]
    pub fn scale_score(&self, score: f64) -> u32 {
        self.scale(round_f64_to_rating(score))
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if the table does not cover 0..=100, decreases
    /// anywhere, or has a zero floor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.weights.len() != 101 {
            return Err(ConfigError::ScalingTableLength {
                len: self.weights.len(),
            });
        }
        if self.floor == 0 || self.floor > self.ceiling {
            return Err(ConfigError::ScalingBounds {
                floor: self.floor,
                ceiling: self.ceiling,
            });
        }
        if let Some(rating) = self
            .weights
            .windows(2)
            .position(|pair| pair[1] < pair[0])
        {
            return Err(ConfigError::ScalingNotMonotonic { rating: rating + 1 });
        }
        Ok(())
    }
}

impl Default for ScalingCurve {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            weights: Self::default_weights(),
            floor: Self::default_floor(),
            ceiling: Self::default_ceiling(),
        }
    }
}

/// Probability that `attack` beats `defense` in a two-outcome weighted draw.
#[must_use]
pub fn goal_probability(attack_weight: u32, defense_weight: u32) -> f64 {
    let total = f64::from(attack_weight) + f64::from(defense_weight);
    if total <= 0.0 {
        return 0.0;
    }
    f64::from(attack_weight) / total
}
