//! The match pipeline.
//!
//! A match is one synchronous pass over a caller-supplied random stream:
//!
//! 1. event count from the formation style pair,
//! 2. possession and chance type per event,
//! 3. minutes, drawn by bucket then sorted,
//! 4. shooter selection and goal/miss resolution per event,
//! 5. stats, then injuries for the home side followed by the away side.
//!
//! Draw order is part of the replay contract: the same seed and inputs always
//! consume the stream in the same order and produce the same outcome.

use chrono::{DateTime, Utc};
use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;

use crate::boosts::{draw_position_boost, team_boost};
use crate::chance::{ChanceType, determine_chance_type};
use crate::chooser::WeightedChooser;
use crate::config::{ConfigError, MatchConfig};
use crate::constants::{
    MAX_GAME_MINUTE, MIN_GAME_MINUTE, MINUTE_BUCKETS, NO_MIDFIELD_SHOOTER_POSITION_WEIGHTS,
    SHOOTER_POSITION_WEIGHTS,
};
use crate::error::MatchError;
use crate::events::{EventPayload, GameEvent, GameStats, ShotDetails, TeamType};
use crate::formation::FormationConfig;
use crate::injuries::{InjuryEvent, apply_injuries};
use crate::player::{PlayerPosition, SelectedPlayer};
use crate::team::{GameLineup, team_control_score, team_defense_score};

/// One stretch of the match clock and how likely chances fall inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteBucket {
    pub start: u8,
    pub end: u8,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteBuckets {
    #[serde(default = "MinuteBuckets::default_buckets")]
    pub buckets: Vec<MinuteBucket>,
}

impl MinuteBuckets {
    fn default_buckets() -> Vec<MinuteBucket> {
        MINUTE_BUCKETS
            .into_iter()
            .map(|(start, end, weight)| MinuteBucket { start, end, weight })
            .collect()
    }

    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] when no bucket has weight.
    pub fn chooser(&self) -> Result<WeightedChooser<MinuteBucket>, MatchError> {
        WeightedChooser::new(
            "minute_buckets",
            self.buckets.iter().map(|bucket| (*bucket, bucket.weight)),
        )
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for bucket in &self.buckets {
            if bucket.start > bucket.end
                || bucket.start < MIN_GAME_MINUTE
                || bucket.end > MAX_GAME_MINUTE
            {
                return Err(ConfigError::MinuteBucket {
                    start: bucket.start,
                    end: bucket.end,
                });
            }
        }
        if self.buckets.iter().all(|bucket| bucket.weight == 0) {
            return Err(ConfigError::EmptyTable {
                table: "minute_buckets",
            });
        }
        Ok(())
    }
}

impl Default for MinuteBuckets {
    fn default() -> Self {
        Self {
            buckets: Self::default_buckets(),
        }
    }
}

/// Shot share per position (goalkeeper, defense, midfield, attack).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShooterWeights {
    #[serde(default = "ShooterWeights::default_with_midfield")]
    pub with_midfield: [u32; 4],
    #[serde(default = "ShooterWeights::default_without_midfield")]
    pub without_midfield: [u32; 4],
}

impl ShooterWeights {
    const fn default_with_midfield() -> [u32; 4] {
        SHOOTER_POSITION_WEIGHTS
    }

    const fn default_without_midfield() -> [u32; 4] {
        NO_MIDFIELD_SHOOTER_POSITION_WEIGHTS
    }

    #[must_use]
    pub fn for_formation(&self, formation: &FormationConfig) -> &[u32; 4] {
        if formation.has_midfield() {
            &self.with_midfield
        } else {
            &self.without_midfield
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.with_midfield.iter().all(|w| *w == 0) {
            return Err(ConfigError::EmptyTable {
                table: "shooter_weights.with_midfield",
            });
        }
        if self.without_midfield.iter().all(|w| *w == 0) {
            return Err(ConfigError::EmptyTable {
                table: "shooter_weights.without_midfield",
            });
        }
        Ok(())
    }
}

impl Default for ShooterWeights {
    fn default() -> Self {
        Self {
            with_midfield: Self::default_with_midfield(),
            without_midfield: Self::default_without_midfield(),
        }
    }
}

/// Everything a match produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub events: Vec<GameEvent>,
    pub stats: GameStats,
    pub home_injuries: Vec<InjuryEvent>,
    pub away_injuries: Vec<InjuryEvent>,
}

impl MatchOutcome {
    /// `(team, player id, minute)` for every goal, in match order.
    #[must_use]
    pub fn scorers(&self) -> Vec<(TeamType, &str, u8)> {
        self.events
            .iter()
            .filter(|event| event.is_goal())
            .map(|event| (event.team(), event.player_id(), event.minute))
            .collect()
    }

    /// SHA-256 hex digest of the serialized outcome, for comparing replays.
    ///
    /// # Errors
    ///
    /// Returns an error if the outcome cannot be serialized.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(self)?;
        let digest = Sha256::digest(&bytes);
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            let _ = write!(hex, "{byte:02x}");
        }
        Ok(hex)
    }
}

/// Possession and chance kind for one event, before it has a minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamChance {
    pub team: TeamType,
    pub chance_type: ChanceType,
}

/// Runs matches against a borrowed configuration.
#[derive(Debug, Clone, Copy)]
pub struct MatchEngine<'a> {
    config: &'a MatchConfig,
}

impl Default for MatchEngine<'static> {
    fn default() -> Self {
        Self::new(MatchConfig::default_config())
    }
}

impl<'a> MatchEngine<'a> {
    #[must_use]
    pub const fn new(config: &'a MatchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &'a MatchConfig {
        self.config
    }

    /// Simulate one match.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] if the configuration fails
    /// validation or a weight table has nothing to draw from, or
    /// [`MatchError::MalformedLineup`] if either lineup does not fill its
    /// formation. No partial outcome is produced. Injuries that expired before
    /// `kickoff` carry no penalty.
    pub fn run<R>(
        &self,
        home: &GameLineup,
        away: &GameLineup,
        kickoff: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<MatchOutcome, MatchError>
    where
        R: Rng + ?Sized,
    {
        self.config.validate()?;
        let home_formation = self.config.formations.config(home.team.formation)?;
        let away_formation = self.config.formations.config(away.team.formation)?;
        home.validate(TeamType::Home, home_formation)?;
        away.validate(TeamType::Away, away_formation)?;
        let home = &*home.active_at(kickoff);
        let away = &*away.active_at(kickoff);

        let count = self.event_count(home_formation, away_formation, rng);
        let chances = self.team_chances(home, away, count, rng)?;
        let minutes = self.event_minutes(chances.len(), rng)?;

        let mut events = Vec::with_capacity(chances.len());
        for (chance, minute) in chances.into_iter().zip(minutes) {
            let event = self.resolve_chance(chance, home, away, minute, rng)?;
            trace!(
                "minute {minute}: {:?} {:?} by {} -> {}",
                event.team(),
                event.chance_type(),
                event.player_id(),
                if event.is_goal() { "goal" } else { "miss" }
            );
            events.push(event);
        }

        let stats = GameStats::from_events(&events);
        debug!(
            "full time {} {} - {} {} ({} chances)",
            home.team.id,
            stats.home_team_stats.goals,
            stats.away_team_stats.goals,
            away.team.id,
            events.len()
        );

        let home_injuries = apply_injuries(&self.config.injuries, home, away, kickoff, rng)?;
        let away_injuries = apply_injuries(&self.config.injuries, away, home, kickoff, rng)?;
        if !home_injuries.is_empty() || !away_injuries.is_empty() {
            debug!(
                "injuries: {} home, {} away",
                home_injuries.len(),
                away_injuries.len()
            );
        }

        Ok(MatchOutcome {
            events,
            stats,
            home_injuries,
            away_injuries,
        })
    }

    /// Number of chances, uniform in the style pair's range.
    pub fn event_count<R>(
        &self,
        home: &FormationConfig,
        away: &FormationConfig,
        rng: &mut R,
    ) -> u32
    where
        R: Rng + ?Sized,
    {
        let range = self.config.event_ranges.range_for(home.style, away.style);
        let count = range.draw(rng);
        debug!(
            "{:?} vs {:?}: {count} chances (range {}..={})",
            home.style, away.style, range.min, range.max
        );
        count
    }

    /// Possessing team and chance kind for each of `count` events.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] for an unusable chance
    /// table or formation catalog.
    pub fn team_chances<R>(
        &self,
        home: &GameLineup,
        away: &GameLineup,
        count: u32,
        rng: &mut R,
    ) -> Result<Vec<TeamChance>, MatchError>
    where
        R: Rng + ?Sized,
    {
        let scaling = &self.config.scaling;
        let home_control = team_control_score(self.config, home, rng)?;
        let away_control = team_control_score(self.config, away, rng)?;
        let possession = WeightedChooser::new(
            "possession",
            [
                (TeamType::Home, scaling.scale_score(home_control)),
                (TeamType::Away, scaling.scale_score(away_control)),
            ],
        )?;
        debug!(
            "control {home_control:.1} vs {away_control:.1} (weights {} / {})",
            scaling.scale_score(home_control),
            scaling.scale_score(away_control)
        );

        let mut chances = Vec::new();
        let mut previous = None;
        for _ in 0..count {
            let team = possession.pick_copied(rng);
            let chance_type = determine_chance_type(&self.config.chance_weights, previous, rng)?;
            previous = Some(chance_type);
            chances.push(TeamChance { team, chance_type });
        }
        Ok(chances)
    }

    /// `count` minutes in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] if no bucket has weight or
    /// a drawn bucket is reversed.
    pub fn event_minutes<R>(&self, count: usize, rng: &mut R) -> Result<Vec<u8>, MatchError>
    where
        R: Rng + ?Sized,
    {
        let buckets = self.config.minute_buckets.chooser()?;
        let mut minutes: Vec<u8> = Vec::with_capacity(count);
        for _ in 0..count {
            let bucket = buckets.pick(rng);
            if bucket.start > bucket.end {
                return Err(MatchError::InvalidConfiguration {
                    pool: "minute_buckets",
                });
            }
            minutes.push(rng.gen_range(bucket.start..=bucket.end));
        }
        minutes.sort_unstable();
        Ok(minutes)
    }

    /// Pick a shooter for `lineup`: a position by shot share, then a player
    /// uniformly within it. Positions with no players never win the draw.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::MalformedLineup`] if no populated position has a
    /// positive shot share.
    pub fn select_shooter<'l, R>(
        &self,
        side: TeamType,
        lineup: &'l GameLineup,
        rng: &mut R,
    ) -> Result<&'l SelectedPlayer, MatchError>
    where
        R: Rng + ?Sized,
    {
        let formation = self.config.formations.config(lineup.team.formation)?;
        let weights = self.config.shooter_weights.for_formation(formation);
        let groups = lineup.position_groups();
        let candidates = PlayerPosition::SLOTS
            .into_iter()
            .zip(weights.iter().copied())
            .zip(&groups)
            .filter(|(_, players)| !players.is_empty())
            .map(|((position, weight), _)| (position, weight));
        let positions = WeightedChooser::new("shooter_position", candidates)
            .map_err(|_| MatchError::malformed(side, "no players in any shooting position"))?;
        let position = positions.pick_copied(rng);
        let group = position
            .slot_index()
            .and_then(|idx| groups.get(idx))
            .filter(|players| !players.is_empty())
            .ok_or_else(|| MatchError::malformed(side, format!("no {position:?} players")))?;
        let idx = rng.gen_range(0..group.len());
        Ok(group[idx])
    }

    fn resolve_chance<R>(
        &self,
        chance: TeamChance,
        home: &GameLineup,
        away: &GameLineup,
        minute: u8,
        rng: &mut R,
    ) -> Result<GameEvent, MatchError>
    where
        R: Rng + ?Sized,
    {
        let (attacking, defending) = match chance.team {
            TeamType::Home => (home, away),
            TeamType::Away => (away, home),
        };
        let formation = self.config.formations.config(attacking.team.formation)?;
        let shooter = self.select_shooter(chance.team, attacking, rng)?;

        let position_boost = draw_position_boost(
            &self.config.boosts,
            &attacking.item_boosts,
            shooter.selected_position,
            rng,
        );
        let boost = team_boost(&self.config.boosts, &attacking.item_boosts, rng);
        let attack = shooter.attack_score(&self.config.scoring)
            * position_boost
            * formation.modifiers.attack
            * boost;
        let defense = team_defense_score(self.config, defending, rng)?;

        let scaling = &self.config.scaling;
        let outcome = WeightedChooser::new(
            "goal_or_miss",
            [
                (true, scaling.scale_score(attack)),
                (false, scaling.scale_score(defense)),
            ],
        )?;
        let details = ShotDetails {
            player_id: shooter.id.clone(),
            team_type: chance.team,
            chance_type: chance.chance_type,
        };
        let payload = if outcome.pick_copied(rng) {
            EventPayload::Goal(details)
        } else {
            EventPayload::Miss(details)
        };
        Ok(GameEvent { payload, minute })
    }
}

/// Simulate with the shared default configuration.
///
/// # Errors
///
/// See [`MatchEngine::run`].
pub fn run_game<R>(
    home: &GameLineup,
    away: &GameLineup,
    kickoff: DateTime<Utc>,
    rng: &mut R,
) -> Result<MatchOutcome, MatchError>
where
    R: Rng + ?Sized,
{
    MatchEngine::default().run(home, away, kickoff, rng)
}
