//! Kind of scoring chance behind each event.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chooser::WeightedChooser;
use crate::config::ConfigError;
use crate::constants::{
    CORNER_WEIGHT, CROSS_WEIGHT, FREE_KICK_WEIGHT, GOALKEEPER_SHOT_WEIGHT, LONG_RANGE_WEIGHT,
    OPEN_PLAY_WEIGHT, PENALTY_WEIGHT,
};
use crate::error::MatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChanceType {
    Corner,
    Cross,
    OpenPlay,
    GoalkeeperShot,
    LongRange,
    FreeKick,
    Penalty,
}

impl ChanceType {
    /// Declaration order; also the chooser's candidate order.
    pub const ALL: [Self; 7] = [
        Self::Corner,
        Self::Cross,
        Self::OpenPlay,
        Self::GoalkeeperShot,
        Self::LongRange,
        Self::FreeKick,
        Self::Penalty,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChanceWeights {
    #[serde(default = "ChanceWeights::default_corner")]
    pub corner: u32,
    #[serde(default = "ChanceWeights::default_cross")]
    pub cross: u32,
    #[serde(default = "ChanceWeights::default_open_play")]
    pub open_play: u32,
    #[serde(default = "ChanceWeights::default_goalkeeper_shot")]
    pub goalkeeper_shot: u32,
    #[serde(default = "ChanceWeights::default_long_range")]
    pub long_range: u32,
    #[serde(default = "ChanceWeights::default_free_kick")]
    pub free_kick: u32,
    #[serde(default = "ChanceWeights::default_penalty")]
    pub penalty: u32,
}

impl ChanceWeights {
    const fn default_corner() -> u32 {
        CORNER_WEIGHT
    }

    const fn default_cross() -> u32 {
        CROSS_WEIGHT
    }

    const fn default_open_play() -> u32 {
        OPEN_PLAY_WEIGHT
    }

    const fn default_goalkeeper_shot() -> u32 {
        GOALKEEPER_SHOT_WEIGHT
    }

    const fn default_long_range() -> u32 {
        LONG_RANGE_WEIGHT
    }

    const fn default_free_kick() -> u32 {
        FREE_KICK_WEIGHT
    }

    const fn default_penalty() -> u32 {
        PENALTY_WEIGHT
    }

    #[must_use]
    pub const fn weight(&self, chance: ChanceType) -> u32 {
        match chance {
            ChanceType::Corner => self.corner,
            ChanceType::Cross => self.cross,
            ChanceType::OpenPlay => self.open_play,
            ChanceType::GoalkeeperShot => self.goalkeeper_shot,
            ChanceType::LongRange => self.long_range,
            ChanceType::FreeKick => self.free_kick,
            ChanceType::Penalty => self.penalty,
        }
    }

    fn chooser(
        &self,
        excluded: Option<ChanceType>,
    ) -> Result<WeightedChooser<ChanceType>, MatchError> {
        WeightedChooser::new(
            "chance_type",
            ChanceType::ALL
                .into_iter()
                .filter(|chance| Some(*chance) != excluded)
                .map(|chance| (chance, self.weight(chance))),
        )
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let positive = ChanceType::ALL
            .into_iter()
            .filter(|chance| self.weight(*chance) > 0)
            .count();
        // A single usable kind would force a repeat on every other event.
        if positive < 2 {
            return Err(ConfigError::EmptyTable {
                table: "chance_weights",
            });
        }
        Ok(())
    }
}

impl Default for ChanceWeights {
    fn default() -> Self {
        Self {
            corner: Self::default_corner(),
            cross: Self::default_cross(),
            open_play: Self::default_open_play(),
            goalkeeper_shot: Self::default_goalkeeper_shot(),
            long_range: Self::default_long_range(),
            free_kick: Self::default_free_kick(),
            penalty: Self::default_penalty(),
        }
    }
}

/// Draw a chance type that differs from `previous`.
///
/// A repeat on the first draw is redrawn from the table without `previous`.
///
/// # Errors
///
/// Returns [`MatchError::InvalidConfiguration`] when the table (or the table
/// minus `previous`) has no positive weight.
pub fn determine_chance_type<R>(
    weights: &ChanceWeights,
    previous: Option<ChanceType>,
    rng: &mut R,
) -> Result<ChanceType, MatchError>
where
    R: Rng + ?Sized,
{
    let chance = weights.chooser(None)?.pick_copied(rng);
    if previous != Some(chance) {
        return Ok(chance);
    }
    Ok(weights.chooser(previous)?.pick_copied(rng))
}
