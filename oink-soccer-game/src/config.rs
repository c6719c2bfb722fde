//! Match configuration: every tuning table the engine reads, grouped in one
//! serde-friendly structure.
//!
//! The engine never mutates configuration. Callers either use
//! [`MatchConfig::default_config`] or deserialize an overlay where every
//! missing field falls back to the shipped defaults.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::boosts::BoostConfig;
use crate::chance::ChanceWeights;
use crate::formation::{EventRangeTable, FormationCatalog};
use crate::game::{MinuteBuckets, ShooterWeights};
use crate::injuries::InjuryConfig;
use crate::player::PlayerScoring;
use crate::scaling::ScalingCurve;
use crate::team::TeamWeights;

/// Errors raised when match configuration invariants are violated.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least {min:.2} (got {value:.2})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("scaling table must cover ratings 0..=100 (got {len} entries)")]
    ScalingTableLength { len: usize },
    #[error("scaling bounds invalid (floor {floor}, ceiling {ceiling})")]
    ScalingBounds { floor: u32, ceiling: u32 },
    #[error("scaling table decreases at rating {rating}")]
    ScalingNotMonotonic { rating: usize },
    #[error("table `{table}` has no positive weights")]
    EmptyTable { table: &'static str },
    #[error("injury `{name}` recovery window invalid (min {min} > max {max})")]
    RecoveryDays { name: String, min: u32, max: u32 },
    #[error("event range for {label} invalid (min {min} > max {max})")]
    EventRange { label: String, min: u32, max: u32 },
    #[error("minute bucket {start}..={end} is outside the match clock or reversed")]
    MinuteBucket { start: u8, end: u8 },
    #[error("formation {formation} is missing from the catalog")]
    MissingFormation { formation: String },
}

impl ConfigError {
    /// The configuration table the failure belongs to.
    #[must_use]
    pub fn table(&self) -> &'static str {
        match self {
            Self::MinViolation { field, .. } | Self::RangeViolation { field, .. } => field,
            Self::ScalingTableLength { .. }
            | Self::ScalingBounds { .. }
            | Self::ScalingNotMonotonic { .. } => "scaling",
            Self::EmptyTable { table } => table,
            Self::RecoveryDays { .. } => "injuries.catalog",
            Self::EventRange { .. } => "event_ranges",
            Self::MinuteBucket { .. } => "minute_buckets",
            Self::MissingFormation { .. } => "formations",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MatchConfig {
    #[serde(default)]
    pub scoring: PlayerScoring,
    #[serde(default)]
    pub team_weights: TeamWeights,
    #[serde(default)]
    pub formations: FormationCatalog,
    #[serde(default)]
    pub event_ranges: EventRangeTable,
    #[serde(default)]
    pub boosts: BoostConfig,
    #[serde(default)]
    pub chance_weights: ChanceWeights,
    #[serde(default)]
    pub minute_buckets: MinuteBuckets,
    #[serde(default)]
    pub shooter_weights: ShooterWeights,
    #[serde(default)]
    pub injuries: InjuryConfig,
    #[serde(default)]
    pub scaling: ScalingCurve,
}

impl MatchConfig {
    /// Shared, lazily-built default configuration.
    #[must_use]
    pub fn default_config() -> &'static Self {
        static CONFIG: OnceLock<MatchConfig> = OnceLock::new();
        CONFIG.get_or_init(Self::default)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Validate configuration values against their documented bounds.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found, checking tables in field order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.team_weights.validate()?;
        self.formations.validate()?;
        self.event_ranges.validate()?;
        self.boosts.validate()?;
        self.chance_weights.validate()?;
        self.minute_buckets.validate()?;
        self.shooter_weights.validate()?;
        self.injuries.validate()?;
        self.scaling.validate()?;
        Ok(())
    }
}
