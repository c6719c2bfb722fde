//! Oink Soccer match engine
//!
//! Deterministic five-a-side match simulation. Given two lineups, a kickoff
//! time and a seeded random stream, the engine produces the timed goal/miss
//! events, per-team stats and post-match injuries. The same seed and inputs
//! always replay the same match.

pub mod boosts;
pub mod chance;
pub mod chooser;
pub mod config;
mod constants;
pub mod error;
pub mod events;
pub mod formation;
pub mod game;
pub mod injuries;
pub mod numbers;
pub mod player;
pub mod sample;
pub mod scaling;
pub mod seed;
pub mod team;

// Re-export commonly used types
pub use boosts::{Boost, BoostConfig, BoostType, team_boost};
pub use chance::{ChanceType, ChanceWeights, determine_chance_type};
pub use chooser::WeightedChooser;
pub use config::{ConfigError, MatchConfig};
pub use error::MatchError;
pub use events::{
    EventPayload, GameEvent, GameOutcomeType, GameStats, ShotDetails, TeamStats, TeamType,
};
pub use formation::{
    EventRange, EventRangeTable, FormationCatalog, FormationConfig, FormationModifiers,
    FormationStyle, FormationType,
};
pub use game::{MatchEngine, MatchOutcome, MinuteBuckets, ShooterWeights, TeamChance, run_game};
pub use injuries::{
    AggressionCoupling, Injury, InjuryCatalog, InjuryConfig, InjuryEvent, InjurySeverity,
    InjuryWeights, apply_injuries,
};
pub use player::{PlayerAttributes, PlayerLevel, PlayerPosition, PlayerScoring, SelectedPlayer};
pub use scaling::{GOMPERTZ_V1_NAME, ScalingCurve, goal_probability};
pub use seed::{CountingRng, MatchRng, derive_match_seed, rng_from_seed, seed_from_entropy};
pub use team::{
    GameLineup, PositionWeights, Team, TeamWeights, team_control_score, team_defense_score,
};
