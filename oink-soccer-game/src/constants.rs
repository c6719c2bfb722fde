//! Centralized balance and tuning constants for the match engine.
//!
//! These are the defaults behind [`crate::config::MatchConfig`]. Rebalancing
//! happens here (or through a serialized config overlay), never inside the
//! pipeline code.

// Player scoring -----------------------------------------------------------
pub(crate) const CONTROL_WEIGHT: u32 = 4;
pub(crate) const ATTACK_WEIGHT: u32 = 3;
pub(crate) const DEFENSE_WEIGHT: u32 = 5;
pub(crate) const OUT_OF_POSITION_PENALTY: f64 = 0.85;
pub(crate) const HIGH_SEVERITY_THRESHOLD: f64 = 0.85;

// Overall rating blends (primary rating weight : speed weight) -------------
pub(crate) const OVERALL_GOALKEEPER_BLEND: (u32, u32) = (5, 1);
pub(crate) const OVERALL_DEFENSE_BLEND: (u32, u32) = (5, 2);
pub(crate) const OVERALL_MIDFIELD_BLEND: (u32, u32) = (2, 1);
pub(crate) const OVERALL_ATTACK_BLEND: (u32, u32) = (3, 1);

// Team aggregation ---------------------------------------------------------
pub(crate) const CONTROL_POSITION_WEIGHTS: [f64; 4] = [0.05, 0.15, 0.65, 0.15];
pub(crate) const DEFENSE_POSITION_WEIGHTS: [f64; 4] = [0.35, 0.40, 0.20, 0.05];
pub(crate) const BOX_CONTROL_POSITION_WEIGHTS: [f64; 4] = [0.05, 0.35, 0.0, 0.60];
pub(crate) const BOX_DEFENSE_POSITION_WEIGHTS: [f64; 4] = [0.35, 0.50, 0.0, 0.15];
pub(crate) const TEAM_DEFENSE_CEILING: f64 = 100.0;

// Boosts -------------------------------------------------------------------
pub(crate) const BOOST_DECAY_PER_APPLICATION: f64 = 0.85;
pub(crate) const BOOST_MIN_MULTIPLIER: f64 = 0.35;

// Event counts (inclusive ranges per home/away style) ----------------------
pub(crate) const DEFAULT_MIN_EVENTS: u32 = 4;
pub(crate) const DEFAULT_MAX_EVENTS: u32 = 12;
pub(crate) const ATTACKING_VS_ATTACKING_EVENTS: (u32, u32) = (7, 15);
pub(crate) const ATTACKING_VS_BALANCED_EVENTS: (u32, u32) = (6, 13);
pub(crate) const ATTACKING_VS_DEFENSIVE_EVENTS: (u32, u32) = (5, 11);
pub(crate) const BALANCED_VS_BALANCED_EVENTS: (u32, u32) = (4, 12);
pub(crate) const BALANCED_VS_DEFENSIVE_EVENTS: (u32, u32) = (3, 9);
pub(crate) const DEFENSIVE_VS_DEFENSIVE_EVENTS: (u32, u32) = (1, 6);

// Formation modifiers (attack, defense, control) ---------------------------
pub(crate) const PYRAMID_MODIFIERS: (f64, f64, f64) = (0.9, 1.1, 1.0);
pub(crate) const DIAMOND_MODIFIERS: (f64, f64, f64) = (1.0, 1.0, 1.0);
pub(crate) const Y_MODIFIERS: (f64, f64, f64) = (1.1, 0.9, 1.0);
pub(crate) const BOX_MODIFIERS: (f64, f64, f64) = (1.05, 1.0, 0.9);
pub(crate) const MIN_FORMATION_MODIFIER: f64 = 0.5;
pub(crate) const MAX_FORMATION_MODIFIER: f64 = 1.5;

// Chance types (declaration order) -----------------------------------------
pub(crate) const CORNER_WEIGHT: u32 = 3;
pub(crate) const CROSS_WEIGHT: u32 = 4;
pub(crate) const OPEN_PLAY_WEIGHT: u32 = 7;
pub(crate) const GOALKEEPER_SHOT_WEIGHT: u32 = 1;
pub(crate) const LONG_RANGE_WEIGHT: u32 = 4;
pub(crate) const FREE_KICK_WEIGHT: u32 = 3;
pub(crate) const PENALTY_WEIGHT: u32 = 2;

// Match clock --------------------------------------------------------------
pub(crate) const MIN_GAME_MINUTE: u8 = 1;
pub(crate) const MAX_GAME_MINUTE: u8 = 98;
/// `(first minute, last minute, weight)`; later buckets are favoured.
pub(crate) const MINUTE_BUCKETS: [(u8, u8, u32); 6] = [
    (1, 15, 12),
    (16, 30, 14),
    (31, 45, 16),
    (46, 60, 16),
    (61, 75, 18),
    (76, 98, 24),
];

// Shooter selection (goalkeeper, defense, midfield, attack) ---------------
pub(crate) const SHOOTER_POSITION_WEIGHTS: [u32; 4] = [2, 10, 20, 70];
pub(crate) const NO_MIDFIELD_SHOOTER_POSITION_WEIGHTS: [u32; 4] = [2, 10, 0, 88];

// Rating scaler ------------------------------------------------------------
pub(crate) const SCALE_FLOOR: u32 = 1;
pub(crate) const SCALE_CEILING: u32 = 100;

// Injuries -----------------------------------------------------------------
pub(crate) const INJURY_PRONE_TAG: &str = "injury-prone";
pub(crate) const NOT_INJURED_WEIGHT: u32 = 30;
pub(crate) const INJURY_PRONE_NOT_INJURED_WEIGHT: u32 = 15;
pub(crate) const INJURED_WEIGHT: u32 = 1;
pub(crate) const NEUTRAL_AGGRESSION: u32 = 50;
pub(crate) const MIN_NOT_INJURED_WEIGHT: u32 = 4;
