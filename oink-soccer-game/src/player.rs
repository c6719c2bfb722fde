//! Player ratings and the derived control/attack/defense scores.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::constants::{
    ATTACK_WEIGHT, CONTROL_WEIGHT, DEFENSE_WEIGHT, HIGH_SEVERITY_THRESHOLD, INJURY_PRONE_TAG,
    OUT_OF_POSITION_PENALTY, OVERALL_ATTACK_BLEND, OVERALL_DEFENSE_BLEND,
    OVERALL_GOALKEEPER_BLEND, OVERALL_MIDFIELD_BLEND,
};
use crate::injuries::InjuryEvent;
use crate::numbers::round_f64_to_rating;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum PlayerPosition {
    Goalkeeper,
    Defense,
    Midfield,
    Attack,
    /// Free agent: eligible for every slot.
    #[default]
    Any,
}

impl PlayerPosition {
    /// Concrete positions a formation slot can ask for, in weight-table order.
    pub const SLOTS: [Self; 4] = [Self::Goalkeeper, Self::Defense, Self::Midfield, Self::Attack];

    /// Index into four-entry position weight tables; `None` for the wildcard.
    #[must_use]
    pub const fn slot_index(self) -> Option<usize> {
        match self {
            Self::Goalkeeper => Some(0),
            Self::Defense => Some(1),
            Self::Midfield => Some(2),
            Self::Attack => Some(3),
            Self::Any => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerLevel {
    Legendary,
    #[serde(rename = "World class")]
    WorldClass,
    Professional,
    #[serde(rename = "Semi Professional")]
    SemiProfessional,
    Amateur,
}

/// Source ratings for a player, all on a 0-100 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerAttributes {
    #[serde(default)]
    pub goalkeeper_rating: u8,
    #[serde(default)]
    pub defense_rating: u8,
    #[serde(default, alias = "speed_rating")]
    pub physical_rating: u8,
    #[serde(default)]
    pub control_rating: u8,
    #[serde(default)]
    pub attack_rating: u8,
    #[serde(default)]
    pub aggression_rating: u8,
    #[serde(default)]
    pub player_level: Option<PlayerLevel>,
    #[serde(default, alias = "position")]
    pub primary_position: PlayerPosition,
    #[serde(default)]
    pub positions: Vec<PlayerPosition>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub based_on_player: String,
    #[serde(default)]
    pub based_on_player_url: String,
}

impl PlayerAttributes {
    /// Positions the player may fill without penalty; falls back to the primary position.
    #[must_use]
    pub fn playable_positions(&self) -> &[PlayerPosition] {
        if self.positions.is_empty() {
            std::slice::from_ref(&self.primary_position)
        } else {
            &self.positions
        }
    }

    #[must_use]
    pub fn can_play(&self, position: PlayerPosition) -> bool {
        self.playable_positions()
            .iter()
            .any(|p| *p == position || *p == PlayerPosition::Any)
    }

    #[must_use]
    pub fn is_goalkeeper(&self) -> bool {
        self.playable_positions().contains(&PlayerPosition::Goalkeeper)
    }

    #[must_use]
    pub fn is_injury_prone(&self) -> bool {
        self.tags
            .iter()
            .any(|tag| tag.trim().eq_ignore_ascii_case(INJURY_PRONE_TAG))
    }

    /// `round((control * w + speed) / (w + 1))`
    #[must_use]
    pub fn control_score(&self, scoring: &PlayerScoring) -> f64 {
        blend(self.control_rating, self.physical_rating, scoring.control_weight)
    }

    /// `round((attack * w + speed) / (w + 1))`
    #[must_use]
    pub fn attack_score(&self, scoring: &PlayerScoring) -> f64 {
        blend(self.attack_rating, self.physical_rating, scoring.attack_weight)
    }

    /// Goalkeepers defend with their goalkeeping rating, everyone else with defense.
    #[must_use]
    pub fn defense_score(&self, scoring: &PlayerScoring) -> f64 {
        let rating = if self.is_goalkeeper() {
            self.goalkeeper_rating
        } else {
            self.defense_rating
        };
        blend(rating, self.physical_rating, scoring.defense_weight)
    }

    /// Single 0-100 number for display and ranking; never used to resolve chances.
    #[must_use]
    pub fn overall_rating(&self) -> u8 {
        match self.primary_position {
            PlayerPosition::Goalkeeper => self.overall_for(PlayerPosition::Goalkeeper),
            PlayerPosition::Defense => self.overall_for(PlayerPosition::Defense),
            PlayerPosition::Midfield => self.overall_for(PlayerPosition::Midfield),
            PlayerPosition::Attack => self.overall_for(PlayerPosition::Attack),
            PlayerPosition::Any => PlayerPosition::SLOTS
                .iter()
                .map(|position| self.overall_for(*position))
                .max()
                .unwrap_or(0),
        }
    }

    fn overall_for(&self, position: PlayerPosition) -> u8 {
        let (rating, (weight, speed_weight)) = match position {
            PlayerPosition::Goalkeeper => (self.goalkeeper_rating, OVERALL_GOALKEEPER_BLEND),
            PlayerPosition::Defense => (self.defense_rating, OVERALL_DEFENSE_BLEND),
            PlayerPosition::Midfield => (self.control_rating, OVERALL_MIDFIELD_BLEND),
            PlayerPosition::Attack | PlayerPosition::Any => {
                (self.attack_rating, OVERALL_ATTACK_BLEND)
            }
        };
        let total = f64::from(capped(rating)) * f64::from(weight)
            + f64::from(capped(self.physical_rating)) * f64::from(speed_weight);
        round_f64_to_rating(total / f64::from(weight + speed_weight))
    }
}

const fn capped(rating: u8) -> u8 {
    if rating > 100 { 100 } else { rating }
}

fn blend(rating: u8, speed: u8, weight: u32) -> f64 {
    let total = f64::from(capped(rating)) * f64::from(weight) + f64::from(capped(speed));
    (total / f64::from(weight + 1)).round()
}

/// A player bound to a concrete slot for one match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedPlayer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub attributes: PlayerAttributes,
    #[serde(rename = "position")]
    pub selected_position: PlayerPosition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury: Option<InjuryEvent>,
}

impl SelectedPlayer {
    #[must_use]
    pub fn is_out_of_position(&self) -> bool {
        !self.attributes.can_play(self.selected_position)
    }

    /// Combined out-of-position and injury multiplier applied to every derived score.
    #[must_use]
    pub fn penalty_factor(&self, scoring: &PlayerScoring) -> f64 {
        let position = if self.is_out_of_position() {
            scoring.out_of_position_penalty
        } else {
            1.0
        };
        position * self.injury_factor(scoring)
    }

    /// Only injuries at or past the high-severity threshold dent the scores.
    #[must_use]
    pub fn injury_factor(&self, scoring: &PlayerScoring) -> f64 {
        self.injury
            .as_ref()
            .map(|event| event.injury.stats_reduction)
            .filter(|reduction| *reduction <= scoring.high_severity_threshold)
            .unwrap_or(1.0)
    }

    #[must_use]
    pub fn control_score(&self, scoring: &PlayerScoring) -> f64 {
        self.attributes.control_score(scoring) * self.penalty_factor(scoring)
    }

    #[must_use]
    pub fn attack_score(&self, scoring: &PlayerScoring) -> f64 {
        self.attributes.attack_score(scoring) * self.penalty_factor(scoring)
    }

    #[must_use]
    pub fn defense_score(&self, scoring: &PlayerScoring) -> f64 {
        self.attributes.defense_score(scoring) * self.penalty_factor(scoring)
    }
}

/// Blend ratios and penalty factors for derived player scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScoring {
    #[serde(default = "PlayerScoring::default_control_weight")]
    pub control_weight: u32,
    #[serde(default = "PlayerScoring::default_attack_weight")]
    pub attack_weight: u32,
    #[serde(default = "PlayerScoring::default_defense_weight")]
    pub defense_weight: u32,
    #[serde(default = "PlayerScoring::default_out_of_position_penalty")]
    pub out_of_position_penalty: f64,
    #[serde(default = "PlayerScoring::default_high_severity_threshold")]
    pub high_severity_threshold: f64,
}

impl PlayerScoring {
    const fn default_control_weight() -> u32 {
        CONTROL_WEIGHT
    }

    const fn default_attack_weight() -> u32 {
        ATTACK_WEIGHT
    }

    const fn default_defense_weight() -> u32 {
        DEFENSE_WEIGHT
    }

    const fn default_out_of_position_penalty() -> f64 {
        OUT_OF_POSITION_PENALTY
    }

    const fn default_high_severity_threshold() -> f64 {
        HIGH_SEVERITY_THRESHOLD
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("control_weight", self.control_weight),
            ("attack_weight", self.attack_weight),
            ("defense_weight", self.defense_weight),
        ] {
            if value == 0 {
                return Err(ConfigError::MinViolation {
                    field,
                    min: 1.0,
                    value: 0.0,
                });
            }
        }
        for (field, value) in [
            ("out_of_position_penalty", self.out_of_position_penalty),
            ("high_severity_threshold", self.high_severity_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RangeViolation {
                    field,
                    min: 0.0,
                    max: 1.0,
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for PlayerScoring {
    fn default() -> Self {
        Self {
            control_weight: Self::default_control_weight(),
            attack_weight: Self::default_attack_weight(),
            defense_weight: Self::default_defense_weight(),
            out_of_position_penalty: Self::default_out_of_position_penalty(),
            high_severity_threshold: Self::default_high_severity_threshold(),
        }
    }
}
