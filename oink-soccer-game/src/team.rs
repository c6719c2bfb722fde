//! Lineups and the team-level control/defense aggregates.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;

use crate::boosts::{Boost, draw_position_boost, team_boost};
use crate::config::{ConfigError, MatchConfig};
use crate::constants::{
    BOX_CONTROL_POSITION_WEIGHTS, BOX_DEFENSE_POSITION_WEIGHTS, CONTROL_POSITION_WEIGHTS,
    DEFENSE_POSITION_WEIGHTS, TEAM_DEFENSE_CEILING,
};
use crate::error::MatchError;
use crate::events::TeamType;
use crate::formation::{FormationConfig, FormationType};
use crate::numbers::usize_to_f64;
use crate::player::{PlayerPosition, PlayerScoring, SelectedPlayer};

/// Players grouped by selected position, lineup order kept inside each group.
pub type PositionGroups<'a> = [SmallVec<[&'a SelectedPlayer; 5]>; 4];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub custom_name: String,
    pub formation: FormationType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLineup {
    pub team: Team,
    pub players: Vec<SelectedPlayer>,
    #[serde(default)]
    pub item_boosts: Vec<Boost>,
}

impl GameLineup {
    #[must_use]
    pub fn find_player(&self, player_id: &str) -> Option<&SelectedPlayer> {
        self.players.iter().find(|player| player.id == player_id)
    }

    /// The lineup as it takes the field at `kickoff`: injuries that have run
    /// out by then are dropped. Borrows when nothing changes.
    #[must_use]
    pub fn active_at(&self, kickoff: DateTime<Utc>) -> Cow<'_, Self> {
        let expired = |player: &SelectedPlayer| {
            player
                .injury
                .as_ref()
                .is_some_and(|event| !event.is_active_at(kickoff))
        };
        if !self.players.iter().any(expired) {
            return Cow::Borrowed(self);
        }
        let mut lineup = self.clone();
        for player in &mut lineup.players {
            if expired(player) {
                player.injury = None;
            }
        }
        Cow::Owned(lineup)
    }

    #[must_use]
    pub fn position_groups(&self) -> PositionGroups<'_> {
        let mut groups: PositionGroups<'_> = Default::default();
        for player in &self.players {
            if let Some(idx) = player.selected_position.slot_index() {
                groups[idx].push(player);
            }
        }
        groups
    }

    /// Check that the lineup fills `formation` exactly: one player per slot and
    /// no player left in the wildcard position.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::MalformedLineup`] tagged with `side`.
    pub fn validate(&self, side: TeamType, formation: &FormationConfig) -> Result<(), MatchError> {
        if self.players.len() != formation.slots.len() {
            return Err(MatchError::malformed(
                side,
                format!(
                    "{} needs {} players, got {}",
                    formation.formation,
                    formation.slots.len(),
                    self.players.len()
                ),
            ));
        }
        if let Some(player) = self
            .players
            .iter()
            .find(|player| player.selected_position == PlayerPosition::Any)
        {
            return Err(MatchError::malformed(
                side,
                format!("player {} has no selected position", player.id),
            ));
        }
        let groups = self.position_groups();
        for position in PlayerPosition::SLOTS {
            let wanted = formation.slots_for(position);
            let got = position.slot_index().map_or(0, |idx| groups[idx].len());
            if wanted != got {
                return Err(MatchError::malformed(
                    side,
                    format!(
                        "{} needs {wanted} {position:?} players, got {got}",
                        formation.formation
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Share of each position group in a team aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionWeights {
    pub goalkeeper: f64,
    pub defense: f64,
    pub midfield: f64,
    pub attack: f64,
}

impl PositionWeights {
    const fn from_table([goalkeeper, defense, midfield, attack]: [f64; 4]) -> Self {
        Self {
            goalkeeper,
            defense,
            midfield,
            attack,
        }
    }

    #[must_use]
    pub const fn for_position(&self, position: PlayerPosition) -> f64 {
        match position {
            PlayerPosition::Goalkeeper => self.goalkeeper,
            PlayerPosition::Defense => self.defense,
            PlayerPosition::Midfield => self.midfield,
            PlayerPosition::Attack => self.attack,
            PlayerPosition::Any => 0.0,
        }
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        for value in [self.goalkeeper, self.defense, self.midfield, self.attack] {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamWeights {
    #[serde(default = "TeamWeights::default_control")]
    pub control: PositionWeights,
    #[serde(default = "TeamWeights::default_defense")]
    pub defense: PositionWeights,
    #[serde(default = "TeamWeights::default_defense_ceiling")]
    pub defense_ceiling: f64,
}

impl TeamWeights {
    const fn default_control() -> PositionWeights {
        PositionWeights::from_table(CONTROL_POSITION_WEIGHTS)
    }

    const fn default_defense() -> PositionWeights {
        PositionWeights::from_table(DEFENSE_POSITION_WEIGHTS)
    }

    const fn default_defense_ceiling() -> f64 {
        TEAM_DEFENSE_CEILING
    }

    /// Weights for shapes with no midfield line; the midfield share moves forward and back.
    #[must_use]
    pub const fn without_midfield() -> Self {
        Self {
            control: PositionWeights::from_table(BOX_CONTROL_POSITION_WEIGHTS),
            defense: PositionWeights::from_table(BOX_DEFENSE_POSITION_WEIGHTS),
            defense_ceiling: TEAM_DEFENSE_CEILING,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.control.validate("team_weights.control")?;
        self.defense.validate("team_weights.defense")?;
        if self.defense_ceiling < 1.0 {
            return Err(ConfigError::MinViolation {
                field: "team_weights.defense_ceiling",
                min: 1.0,
                value: self.defense_ceiling,
            });
        }
        Ok(())
    }
}

impl Default for TeamWeights {
    fn default() -> Self {
        Self {
            control: Self::default_control(),
            defense: Self::default_defense(),
            defense_ceiling: Self::default_defense_ceiling(),
        }
    }
}

/// Team control score: weighted position averages, formation control modifier
/// and team boost.
///
/// # Errors
///
/// Returns [`MatchError::InvalidConfiguration`] if the formation is missing
/// from the catalog.
pub fn team_control_score<R>(
    config: &MatchConfig,
    lineup: &GameLineup,
    rng: &mut R,
) -> Result<f64, MatchError>
where
    R: Rng + ?Sized,
{
    let formation = config.formations.config(lineup.team.formation)?;
    let weights = formation.team_weights(&config.team_weights);
    let base = weighted_average(
        config,
        lineup,
        &weights.control,
        SelectedPlayer::control_score,
        rng,
    );
    let boost = team_boost(&config.boosts, &lineup.item_boosts, rng);
    Ok(base * formation.modifiers.control * boost)
}

/// Team defense score, capped at the configured ceiling after boosting.
///
/// # Errors
///
/// Returns [`MatchError::InvalidConfiguration`] if the formation is missing
/// from the catalog.
pub fn team_defense_score<R>(
    config: &MatchConfig,
    lineup: &GameLineup,
    rng: &mut R,
) -> Result<f64, MatchError>
where
    R: Rng + ?Sized,
{
    let formation = config.formations.config(lineup.team.formation)?;
    let weights = formation.team_weights(&config.team_weights);
    let base = weighted_average(
        config,
        lineup,
        &weights.defense,
        SelectedPlayer::defense_score,
        rng,
    );
    let boost = team_boost(&config.boosts, &lineup.item_boosts, rng);
    Ok((base * formation.modifiers.defense * boost).min(weights.defense_ceiling))
}

/// Empty groups contribute nothing; each player draws their own position boost.
fn weighted_average<R, F>(
    config: &MatchConfig,
    lineup: &GameLineup,
    weights: &PositionWeights,
    score: F,
    rng: &mut R,
) -> f64
where
    R: Rng + ?Sized,
    F: Fn(&SelectedPlayer, &PlayerScoring) -> f64,
{
    let groups = lineup.position_groups();
    let mut total = 0.0;
    for (position, players) in PlayerPosition::SLOTS.into_iter().zip(&groups) {
        if players.is_empty() {
            continue;
        }
        let mut sum = 0.0;
        for player in players {
            let boost =
                draw_position_boost(&config.boosts, &lineup.item_boosts, position, rng);
            sum += boost * score(*player, &config.scoring);
        }
        total += sum / usize_to_f64(players.len()) * weights.for_position(position);
    }
    total
}
