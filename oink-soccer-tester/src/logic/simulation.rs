use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::debug;
use oink_soccer_game::numbers::{u64_to_f64, usize_to_u64};
use oink_soccer_game::sample::lineup_for;
use oink_soccer_game::{
    ChanceType, FormationType, GameLineup, GameOutcomeType, MatchEngine, MatchOutcome,
    PlayerPosition, SelectedPlayer, TeamType, derive_match_seed, rng_from_seed,
};
use rayon::prelude::*;
use serde::Serialize;

use super::SeedInfo;

/// Goals split by the scorer's selected position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScorerShare {
    pub goalkeeper: u64,
    pub defense: u64,
    pub midfield: u64,
    pub attack: u64,
}

impl ScorerShare {
    fn record(&mut self, position: PlayerPosition) {
        match position {
            PlayerPosition::Goalkeeper => self.goalkeeper += 1,
            PlayerPosition::Defense => self.defense += 1,
            PlayerPosition::Midfield => self.midfield += 1,
            PlayerPosition::Attack => self.attack += 1,
            PlayerPosition::Any => {}
        }
    }

    const fn merge(self, other: Self) -> Self {
        Self {
            goalkeeper: self.goalkeeper + other.goalkeeper,
            defense: self.defense + other.defense,
            midfield: self.midfield + other.midfield,
            attack: self.attack + other.attack,
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.goalkeeper + self.defense + self.midfield + self.attack
    }

    /// `(label, goals)` in slot order.
    #[must_use]
    pub const fn entries(&self) -> [(&'static str, u64); 4] {
        [
            ("Goalkeeper", self.goalkeeper),
            ("Defense", self.defense),
            ("Midfield", self.midfield),
            ("Attack", self.attack),
        ]
    }
}

/// Summed results over a batch of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchCounts {
    pub home_wins: u64,
    pub away_wins: u64,
    pub draws: u64,
    pub home_goals: u64,
    pub away_goals: u64,
    pub chances: u64,
    pub home_injuries: u64,
    pub away_injuries: u64,
    pub scorers: ScorerShare,
}

impl MatchCounts {
    fn from_outcome(outcome: &MatchOutcome, home: &GameLineup, away: &GameLineup) -> Self {
        let mut counts = Self::default();
        match outcome.stats.outcome_for(TeamType::Home) {
            GameOutcomeType::Won => counts.home_wins = 1,
            GameOutcomeType::Lost => counts.away_wins = 1,
            GameOutcomeType::Drawn => counts.draws = 1,
        }
        counts.home_goals = u64::from(outcome.stats.home_team_stats.goals);
        counts.away_goals = u64::from(outcome.stats.away_team_stats.goals);
        counts.chances = usize_to_u64(outcome.events.len());
        counts.home_injuries = usize_to_u64(outcome.home_injuries.len());
        counts.away_injuries = usize_to_u64(outcome.away_injuries.len());

        for (team, player_id, _) in outcome.scorers() {
            let side = match team {
                TeamType::Home => home,
                TeamType::Away => away,
            };
            if let Some(player) = side.find_player(player_id) {
                counts.scorers.record(player.selected_position);
            }
        }
        counts
    }

    const fn merge(self, other: Self) -> Self {
        Self {
            home_wins: self.home_wins + other.home_wins,
            away_wins: self.away_wins + other.away_wins,
            draws: self.draws + other.draws,
            home_goals: self.home_goals + other.home_goals,
            away_goals: self.away_goals + other.away_goals,
            chances: self.chances + other.chances,
            home_injuries: self.home_injuries + other.home_injuries,
            away_injuries: self.away_injuries + other.away_injuries,
            scorers: self.scorers.merge(other.scorers),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub home_team: String,
    pub away_team: String,
    pub home_formation: FormationType,
    pub away_formation: FormationType,
    pub base_seed: u64,
    pub matches: u64,
    #[serde(flatten)]
    pub counts: MatchCounts,
}

impl SimulationSummary {
    fn per_match(&self, value: u64) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            u64_to_f64(value) / u64_to_f64(self.matches)
        }
    }

    #[must_use]
    pub fn home_win_rate(&self) -> f64 {
        self.per_match(self.counts.home_wins)
    }

    #[must_use]
    pub fn away_win_rate(&self) -> f64 {
        self.per_match(self.counts.away_wins)
    }

    #[must_use]
    pub fn draw_rate(&self) -> f64 {
        self.per_match(self.counts.draws)
    }

    #[must_use]
    pub fn goals_per_game(&self) -> f64 {
        self.per_match(self.counts.home_goals + self.counts.away_goals)
    }

    #[must_use]
    pub fn chances_per_game(&self) -> f64 {
        self.per_match(self.counts.chances)
    }

    #[must_use]
    pub fn injuries_per_game(&self) -> f64 {
        self.per_match(self.counts.home_injuries + self.counts.away_injuries)
    }

    /// Share of all goals scored from `goals` in one position.
    #[must_use]
    pub fn scorer_fraction(&self, goals: u64) -> f64 {
        let total = self.counts.scorers.total();
        if total == 0 {
            0.0
        } else {
            u64_to_f64(goals) / u64_to_f64(total)
        }
    }
}

/// Play `matches` games, match `i` seeded with `derive_match_seed(base_seed, i)`.
///
/// Trials run in parallel; the totals do not depend on scheduling.
pub fn simulate(
    engine: &MatchEngine<'_>,
    home: &GameLineup,
    away: &GameLineup,
    base_seed: u64,
    matches: u64,
    kickoff: DateTime<Utc>,
) -> Result<SimulationSummary> {
    debug!(
        "simulating {matches} matches: {} ({}) vs {} ({}), base seed {base_seed:#x}",
        home.team.id, home.team.formation, away.team.id, away.team.formation
    );
    let counts = (0..matches)
        .into_par_iter()
        .map(|index| {
            let mut rng = rng_from_seed(derive_match_seed(base_seed, index));
            engine
                .run(home, away, kickoff, &mut rng)
                .map(|outcome| MatchCounts::from_outcome(&outcome, home, away))
        })
        .try_reduce(MatchCounts::default, |a, b| Ok(a.merge(b)))
        .with_context(|| format!("{} vs {} could not be played", home.team.id, away.team.id))?;

    Ok(SimulationSummary {
        home_team: home.team.custom_name.clone(),
        away_team: away.team.custom_name.clone(),
        home_formation: home.team.formation,
        away_formation: away.team.formation,
        base_seed,
        matches,
        counts,
    })
}

/// Every home/away formation pairing for two squads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormationMatrix {
    pub base_seed: u64,
    pub matches_per_pair: u64,
    pub pairs: Vec<SimulationSummary>,
}

/// Slot both squads into each formation pair and simulate every pairing.
///
/// Pair `k` uses `derive_match_seed(base_seed, k)` as its own base seed.
pub fn simulate_formations(
    engine: &MatchEngine<'_>,
    home_squad: &[SelectedPlayer],
    away_squad: &[SelectedPlayer],
    base_seed: u64,
    matches: u64,
    kickoff: DateTime<Utc>,
) -> Result<FormationMatrix> {
    let mut pairs = Vec::with_capacity(FormationType::ALL.len() * FormationType::ALL.len());
    let mut pair_index = 0_u64;
    for home_shape in FormationType::ALL {
        for away_shape in FormationType::ALL {
            let home = lineup_for("home", home_shape, home_squad);
            let away = lineup_for("away", away_shape, away_squad);
            let pair_seed = derive_match_seed(base_seed, pair_index);
            pairs.push(simulate(engine, &home, &away, pair_seed, matches, kickoff)?);
            pair_index += 1;
        }
    }
    Ok(FormationMatrix {
        base_seed,
        matches_per_pair: matches,
        pairs,
    })
}

/// One event with the shooter's display name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub minute: u8,
    pub team: TeamType,
    pub player_id: String,
    pub player_name: String,
    pub chance_type: ChanceType,
    pub goal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub seed: SeedInfo,
    pub home_team: String,
    pub away_team: String,
    pub kickoff: DateTime<Utc>,
    pub timeline: Vec<TimelineEntry>,
    pub outcome: MatchOutcome,
    pub fingerprint: String,
}

/// Replay a single match from a resolved seed.
pub fn replay(
    engine: &MatchEngine<'_>,
    home: &GameLineup,
    away: &GameLineup,
    seed: SeedInfo,
    kickoff: DateTime<Utc>,
) -> Result<ReplayReport> {
    let mut rng = rng_from_seed(seed.seed);
    let outcome = engine
        .run(home, away, kickoff, &mut rng)
        .with_context(|| format!("replay of seed {} failed", seed.seed))?;
    let fingerprint = outcome
        .fingerprint()
        .context("failed to fingerprint outcome")?;

    let timeline = outcome
        .events
        .iter()
        .map(|event| {
            let side = match event.team() {
                TeamType::Home => home,
                TeamType::Away => away,
            };
            let player_name = side
                .find_player(event.player_id())
                .map(|player| player.name.clone())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| event.player_id().to_string());
            TimelineEntry {
                minute: event.minute,
                team: event.team(),
                player_id: event.player_id().to_string(),
                player_name,
                chance_type: event.chance_type(),
                goal: event.is_goal(),
            }
        })
        .collect();

    Ok(ReplayReport {
        seed,
        home_team: home.team.custom_name.clone(),
        away_team: away.team.custom_name.clone(),
        kickoff,
        timeline,
        outcome,
        fingerprint,
    })
}
