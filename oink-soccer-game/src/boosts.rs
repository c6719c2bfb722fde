//! Item boosts: random multipliers with diminishing returns on reuse.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::constants::{BOOST_DECAY_PER_APPLICATION, BOOST_MIN_MULTIPLIER};
use crate::player::PlayerPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoostType {
    #[serde(rename = "Team Boost")]
    Team,
    #[serde(rename = "Position Boost")]
    Position,
}

/// An active item boost supplied by the inventory for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boost {
    pub boost_type: BoostType,
    /// Only meaningful for [`BoostType::Position`].
    #[serde(default)]
    pub boost_position: PlayerPosition,
    pub min_boost: f64,
    pub max_boost: f64,
    #[serde(default)]
    pub note: String,
    /// Times this boost has already been used; owned by the inventory.
    #[serde(default)]
    pub applications: u32,
}

impl Boost {
    #[must_use]
    pub fn team(min_boost: f64, max_boost: f64) -> Self {
        Self {
            boost_type: BoostType::Team,
            boost_position: PlayerPosition::Any,
            min_boost,
            max_boost,
            note: String::new(),
            applications: 0,
        }
    }

    #[must_use]
    pub fn position(position: PlayerPosition, min_boost: f64, max_boost: f64) -> Self {
        Self {
            boost_type: BoostType::Position,
            boost_position: position,
            ..Self::team(min_boost, max_boost)
        }
    }

    #[must_use]
    pub const fn with_applications(mut self, applications: u32) -> Self {
        self.applications = applications;
        self
    }

    /// One use of the boost: a uniform roll in `[min, max)` shaped by the decay curve.
    pub fn draw<R>(&self, config: &BoostConfig, rng: &mut R) -> f64
    where
        R: Rng + ?Sized,
    {
        let u = rng.r#gen::<f64>();
        let raw = self.min_boost + u * (self.max_boost - self.min_boost);
        config.shape(raw, self.applications)
    }

    fn targets(&self, position: PlayerPosition) -> bool {
        self.boost_type == BoostType::Position && self.boost_position == position
    }
}

/// Diminishing-returns curve parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostConfig {
    #[serde(default = "BoostConfig::default_decay")]
    pub decay_per_application: f64,
    #[serde(default = "BoostConfig::default_min_multiplier")]
    pub min_multiplier: f64,
}

impl BoostConfig {
    const fn default_decay() -> f64 {
        BOOST_DECAY_PER_APPLICATION
    }

    const fn default_min_multiplier() -> f64 {
        BOOST_MIN_MULTIPLIER
    }

    /// `decay ^ applications`, never below the floor.
    #[must_use]
    pub fn diminishing_multiplier(&self, applications: u32) -> f64 {
        let exponent = i32::try_from(applications).unwrap_or(i32::MAX);
        self.decay_per_application
            .powi(exponent)
            .max(self.min_multiplier)
    }

    /// Buffs only lose the part above 1.0; debuff rolls scale as a whole.
    #[must_use]
    pub fn shape(&self, raw: f64, applications: u32) -> f64 {
        let decay = self.diminishing_multiplier(applications);
        if raw >= 1.0 {
            1.0 + (raw - 1.0) * decay
        } else {
            raw * decay
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("decay_per_application", self.decay_per_application),
            ("min_multiplier", self.min_multiplier),
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

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            decay_per_application: Self::default_decay(),
            min_multiplier: Self::default_min_multiplier(),
        }
    }
}

/// Product of every team boost, one draw each in declaration order; 1.0 with none.
pub fn team_boost<R>(config: &BoostConfig, boosts: &[Boost], rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    boosts
        .iter()
        .filter(|boost| boost.boost_type == BoostType::Team)
        .fold(1.0, |acc, boost| acc * boost.draw(config, rng))
}

/// First position boost aimed at `position`, if any.
#[must_use]
pub fn position_boost(boosts: &[Boost], position: PlayerPosition) -> Option<&Boost> {
    boosts.iter().find(|boost| boost.targets(position))
}

/// Draw the position boost for one player, 1.0 (and no draw) when none applies.
pub fn draw_position_boost<R>(
    config: &BoostConfig,
    boosts: &[Boost],
    position: PlayerPosition,
    rng: &mut R,
) -> f64
where
    R: Rng + ?Sized,
{
    position_boost(boosts, position).map_or(1.0, |boost| boost.draw(config, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn no_boosts_is_exactly_neutral() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert!((team_boost(&BoostConfig::default(), &[], &mut rng) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn team_boosts_stack_multiplicatively() {
        let config = BoostConfig::default();
        let boosts = [Boost::team(2.0, 2.0), Boost::team(2.0, 2.0)];
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        assert!((team_boost(&config, &boosts, &mut rng) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn position_boosts_do_not_count_as_team_boosts() {
        let config = BoostConfig::default();
        let boosts = [Boost::position(PlayerPosition::Attack, 3.0, 3.0)];
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        assert!((team_boost(&config, &boosts, &mut rng) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn decay_hits_the_floor() {
        let config = BoostConfig::default();
        assert!((config.diminishing_multiplier(0) - 1.0).abs() < f64::EPSILON);
        assert!((config.diminishing_multiplier(1) - 0.85).abs() < 1e-12);
        for applications in 0..200 {
            assert!(config.diminishing_multiplier(applications) >= 0.35);
        }
        assert!((config.diminishing_multiplier(50) - 0.35).abs() < f64::EPSILON);
    }

    #[test]
    fn overused_buffs_never_become_penalties() {
        let config = BoostConfig::default();
        let boost = Boost::team(1.0, 1.5).with_applications(40);
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        for _ in 0..500 {
            let value = boost.draw(&config, &mut rng);
            assert!(value >= 1.0, "buff decayed to {value}");
            assert!(value <= 1.0 + 0.5 * 0.35 + 1e-12);
        }
    }

    #[test]
    fn debuff_rolls_scale_whole_value() {
        let config = BoostConfig::default();
        assert!((config.shape(0.8, 0) - 0.8).abs() < 1e-12);
        assert!((config.shape(0.8, 1) - 0.68).abs() < 1e-12);
        assert!((config.shape(1.2, 1) - 1.17).abs() < 1e-12);
    }

    #[test]
    fn first_matching_position_boost_wins() {
        let boosts = [
            Boost::team(1.5, 1.5),
            Boost::position(PlayerPosition::Defense, 1.1, 1.1),
            Boost::position(PlayerPosition::Attack, 1.2, 1.2),
            Boost::position(PlayerPosition::Attack, 1.9, 1.9),
        ];
        let found = position_boost(&boosts, PlayerPosition::Attack).expect("attack boost");
        assert!((found.min_boost - 1.2).abs() < f64::EPSILON);
        assert!(position_boost(&boosts, PlayerPosition::Midfield).is_none());

        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let config = BoostConfig::default();
        let value = draw_position_boost(&config, &boosts, PlayerPosition::Midfield, &mut rng);
        assert!((value - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn boost_json_uses_display_names() {
        let json = r#"{
            "boost_type": "Position Boost",
            "boost_position": "Attack",
            "min_boost": 1.05,
            "max_boost": 1.15,
            "note": "Golden Truffle"
        }"#;
        let boost: Boost = serde_json::from_str(json).unwrap();
        assert_eq!(boost.boost_type, BoostType::Position);
        assert_eq!(boost.boost_position, PlayerPosition::Attack);
        assert_eq!(boost.applications, 0);
    }
}
