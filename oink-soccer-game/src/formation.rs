//! Formations: slot templates, modifiers, and the style-pair event ranges.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ConfigError;
use crate::constants::{
    ATTACKING_VS_ATTACKING_EVENTS, ATTACKING_VS_BALANCED_EVENTS, ATTACKING_VS_DEFENSIVE_EVENTS,
    BALANCED_VS_BALANCED_EVENTS, BALANCED_VS_DEFENSIVE_EVENTS, BOX_MODIFIERS, DEFAULT_MAX_EVENTS,
    DEFAULT_MIN_EVENTS, DEFENSIVE_VS_DEFENSIVE_EVENTS, DIAMOND_MODIFIERS, MAX_FORMATION_MODIFIER,
    MIN_FORMATION_MODIFIER, PYRAMID_MODIFIERS, Y_MODIFIERS,
};
use crate::error::MatchError;
use crate::player::PlayerPosition;
use crate::team::TeamWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationType {
    #[serde(rename = "The Pyramid")]
    Pyramid,
    #[serde(rename = "The Diamond")]
    Diamond,
    #[serde(rename = "The Y")]
    Y,
    #[serde(rename = "The Box")]
    Box,
}

impl FormationType {
    pub const ALL: [Self; 4] = [Self::Pyramid, Self::Diamond, Self::Y, Self::Box];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pyramid => "The Pyramid",
            Self::Diamond => "The Diamond",
            Self::Y => "The Y",
            Self::Box => "The Box",
        }
    }
}

impl fmt::Display for FormationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationStyle {
    Attacking,
    Balanced,
    Defensive,
}

/// Multipliers centred on 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormationModifiers {
    pub attack: f64,
    pub defense: f64,
    pub control: f64,
}

impl FormationModifiers {
    const fn from_table((attack, defense, control): (f64, f64, f64)) -> Self {
        Self {
            attack,
            defense,
            control,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationConfig {
    pub formation: FormationType,
    pub style: FormationStyle,
    /// Slot 1 through 5, goalkeeper first.
    pub slots: Vec<PlayerPosition>,
    pub modifiers: FormationModifiers,
    /// Replaces the default position weights for shapes that drop a line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_overrides: Option<TeamWeights>,
}

impl FormationConfig {
    #[must_use]
    pub fn has_midfield(&self) -> bool {
        self.slots.contains(&PlayerPosition::Midfield)
    }

    /// How many slots ask for `position`.
    #[must_use]
    pub fn slots_for(&self, position: PlayerPosition) -> usize {
        self.slots.iter().filter(|slot| **slot == position).count()
    }

    /// Position weights for this formation, falling back to `defaults`.
    #[must_use]
    pub fn team_weights<'a>(&'a self, defaults: &'a TeamWeights) -> &'a TeamWeights {
        self.weight_overrides.as_ref().unwrap_or(defaults)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.slots.len() != 5 || self.slots.contains(&PlayerPosition::Any) {
            return Err(ConfigError::RangeViolation {
                field: "formations.slots",
                min: 5.0,
                max: 5.0,
                value: crate::numbers::usize_to_f64(self.slots.len()),
            });
        }
        for (field, value) in [
            ("formations.modifiers.attack", self.modifiers.attack),
            ("formations.modifiers.defense", self.modifiers.defense),
            ("formations.modifiers.control", self.modifiers.control),
        ] {
            if !(MIN_FORMATION_MODIFIER..=MAX_FORMATION_MODIFIER).contains(&value) {
                return Err(ConfigError::RangeViolation {
                    field,
                    min: MIN_FORMATION_MODIFIER,
                    max: MAX_FORMATION_MODIFIER,
                    value,
                });
            }
        }
        if let Some(weights) = &self.weight_overrides {
            weights.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationCatalog {
    #[serde(default = "FormationCatalog::default_formations")]
    pub formations: Vec<FormationConfig>,
}

impl FormationCatalog {
    fn default_formations() -> Vec<FormationConfig> {
        use PlayerPosition::{Attack, Defense, Goalkeeper, Midfield};
        vec![
            FormationConfig {
                formation: FormationType::Pyramid,
                style: FormationStyle::Defensive,
                slots: vec![Goalkeeper, Defense, Defense, Midfield, Attack],
                modifiers: FormationModifiers::from_table(PYRAMID_MODIFIERS),
                weight_overrides: None,
            },
            FormationConfig {
                formation: FormationType::Diamond,
                style: FormationStyle::Balanced,
                slots: vec![Goalkeeper, Defense, Midfield, Midfield, Attack],
                modifiers: FormationModifiers::from_table(DIAMOND_MODIFIERS),
                weight_overrides: None,
            },
            FormationConfig {
                formation: FormationType::Y,
                style: FormationStyle::Attacking,
                slots: vec![Goalkeeper, Defense, Midfield, Attack, Attack],
                modifiers: FormationModifiers::from_table(Y_MODIFIERS),
                weight_overrides: None,
            },
            FormationConfig {
                formation: FormationType::Box,
                style: FormationStyle::Attacking,
                slots: vec![Goalkeeper, Defense, Defense, Attack, Attack],
                modifiers: FormationModifiers::from_table(BOX_MODIFIERS),
                weight_overrides: Some(TeamWeights::without_midfield()),
            },
        ]
    }

    #[must_use]
    pub fn get(&self, formation: FormationType) -> Option<&FormationConfig> {
        self.formations
            .iter()
            .find(|config| config.formation == formation)
    }

    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] when the catalog has no
    /// entry for `formation`.
    pub fn config(&self, formation: FormationType) -> Result<&FormationConfig, MatchError> {
        self.get(formation)
            .ok_or(MatchError::InvalidConfiguration { pool: "formations" })
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for formation in FormationType::ALL {
            let config = self.get(formation).ok_or_else(|| ConfigError::MissingFormation {
                formation: formation.to_string(),
            })?;
            config.validate()?;
        }
        Ok(())
    }
}

impl Default for FormationCatalog {
    fn default() -> Self {
        Self {
            formations: Self::default_formations(),
        }
    }
}

/// Inclusive chance-count window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRange {
    pub min: u32,
    pub max: u32,
}

impl EventRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn contains(&self, count: u32) -> bool {
        count >= self.min && count <= self.max
    }

    /// Uniform count in `min..=max`.
    pub fn draw<R>(&self, rng: &mut R) -> u32
    where
        R: Rng + ?Sized,
    {
        rng.gen_range(self.min.min(self.max)..=self.max.max(self.min))
    }
}

/// Directional entry: home style first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePairRange {
    pub home: FormationStyle,
    pub away: FormationStyle,
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRangeTable {
    #[serde(default = "EventRangeTable::default_fallback")]
    pub fallback: EventRange,
    #[serde(default = "EventRangeTable::default_pairs")]
    pub pairs: Vec<StylePairRange>,
}

impl EventRangeTable {
    const fn default_fallback() -> EventRange {
        EventRange::new(DEFAULT_MIN_EVENTS, DEFAULT_MAX_EVENTS)
    }

    fn default_pairs() -> Vec<StylePairRange> {
        use FormationStyle::{Attacking, Balanced, Defensive};
        [
            (Attacking, Attacking, ATTACKING_VS_ATTACKING_EVENTS),
            (Attacking, Balanced, ATTACKING_VS_BALANCED_EVENTS),
            (Attacking, Defensive, ATTACKING_VS_DEFENSIVE_EVENTS),
            (Balanced, Attacking, ATTACKING_VS_BALANCED_EVENTS),
            (Balanced, Balanced, BALANCED_VS_BALANCED_EVENTS),
            (Balanced, Defensive, BALANCED_VS_DEFENSIVE_EVENTS),
            (Defensive, Attacking, ATTACKING_VS_DEFENSIVE_EVENTS),
            (Defensive, Balanced, BALANCED_VS_DEFENSIVE_EVENTS),
            (Defensive, Defensive, DEFENSIVE_VS_DEFENSIVE_EVENTS),
        ]
        .into_iter()
        .map(|(home, away, (min, max))| StylePairRange {
            home,
            away,
            min,
            max,
        })
        .collect()
    }

    /// Range for a style pair, or the fallback when the table has no entry.
    #[must_use]
    pub fn range_for(&self, home: FormationStyle, away: FormationStyle) -> EventRange {
        self.pairs
            .iter()
            .find(|pair| pair.home == home && pair.away == away)
            .map_or(self.fallback, |pair| EventRange::new(pair.min, pair.max))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback.min > self.fallback.max {
            return Err(ConfigError::EventRange {
                label: "fallback".to_string(),
                min: self.fallback.min,
                max: self.fallback.max,
            });
        }
        for pair in &self.pairs {
            if pair.min > pair.max {
                return Err(ConfigError::EventRange {
                    label: format!("{:?} vs {:?}", pair.home, pair.away),
                    min: pair.min,
                    max: pair.max,
                });
            }
        }
        Ok(())
    }
}

impl Default for EventRangeTable {
    fn default() -> Self {
        Self {
            fallback: Self::default_fallback(),
            pairs: Self::default_pairs(),
        }
    }
}
