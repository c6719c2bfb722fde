//! Post-match injury assignment.

use chrono::{DateTime, Days, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::chooser::WeightedChooser;
use crate::config::ConfigError;
use crate::constants::{
    INJURED_WEIGHT, INJURY_PRONE_NOT_INJURED_WEIGHT, MIN_NOT_INJURED_WEIGHT, NEUTRAL_AGGRESSION,
    NOT_INJURED_WEIGHT,
};
use crate::error::MatchError;
use crate::numbers::{round_f64_to_u32, usize_to_f64};
use crate::player::SelectedPlayer;
use crate::team::GameLineup;

const DEFAULT_INJURY_DATA: &str = include_str!("../assets/injuries.json");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InjurySeverity {
    #[default]
    #[serde(rename = "Low Severity")]
    Low,
    #[serde(rename = "Mid Severity")]
    Mid,
    #[serde(rename = "High Severity")]
    High,
}

/// Catalog entry describing one kind of injury.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Injury {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: InjurySeverity,
    /// Multiplier applied to derived scores, 0.8 = 20% reduction.
    pub stats_reduction: f64,
    #[serde(rename = "min_recovery_days")]
    pub min_days: u32,
    #[serde(rename = "max_recovery_days")]
    pub max_days: u32,
    #[serde(rename = "selection_weight", default = "default_weight")]
    pub weight: u32,
}

impl Default for Injury {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            severity: InjurySeverity::Low,
            stats_reduction: 1.0,
            min_days: 1,
            max_days: 1,
            weight: default_weight(),
        }
    }
}

const fn default_weight() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InjuryCatalog {
    #[serde(default)]
    pub injuries: Vec<Injury>,
}

impl InjuryCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_INJURY_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<InjuryCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into an injury catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Injury> {
        self.injuries.iter().find(|injury| injury.name == name)
    }

    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] when no entry carries weight.
    pub fn chooser(&self) -> Result<WeightedChooser<&Injury>, MatchError> {
        WeightedChooser::new(
            "injury_catalog",
            self.injuries.iter().map(|injury| (injury, injury.weight)),
        )
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.injuries.iter().all(|injury| injury.weight == 0) {
            return Err(ConfigError::EmptyTable {
                table: "injury_catalog",
            });
        }
        for injury in &self.injuries {
            if injury.min_days > injury.max_days {
                return Err(ConfigError::RecoveryDays {
                    name: injury.name.clone(),
                    min: injury.min_days,
                    max: injury.max_days,
                });
            }
            if !(injury.stats_reduction > 0.0 && injury.stats_reduction <= 1.0) {
                return Err(ConfigError::RangeViolation {
                    field: "stats_reduction",
                    min: 0.0,
                    max: 1.0,
                    value: injury.stats_reduction,
                });
            }
        }
        Ok(())
    }
}

/// An injury sustained in a match, handed to the roster store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryEvent {
    pub team_id: String,
    pub player_id: String,
    pub injury: Injury,
    pub expires: DateTime<Utc>,
}

impl InjuryEvent {
    #[cfg(test)]
    pub(crate) fn for_testing(injury: Injury) -> Self {
        Self {
            team_id: "team".to_string(),
            player_id: "player".to_string(),
            injury,
            expires: DateTime::<Utc>::MAX_UTC,
        }
    }

    /// Whether the injury is still in effect at `at`.
    #[must_use]
    pub fn is_active_at(&self, at: DateTime<Utc>) -> bool {
        self.expires > at
    }
}

/// `{NotInjured: not_injured, Injured: injured}` odds for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryWeights {
    pub not_injured: u32,
    pub injured: u32,
}

impl InjuryWeights {
    #[must_use]
    pub const fn new(not_injured: u32, injured: u32) -> Self {
        Self {
            not_injured,
            injured,
        }
    }
}

/// Scales the not-injured weight by how aggressive the opposition plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggressionCoupling {
    #[serde(default = "AggressionCoupling::default_neutral")]
    pub neutral_aggression: u32,
    #[serde(default = "AggressionCoupling::default_min_weight")]
    pub min_not_injured_weight: u32,
}

impl AggressionCoupling {
    const fn default_neutral() -> u32 {
        NEUTRAL_AGGRESSION
    }

    const fn default_min_weight() -> u32 {
        MIN_NOT_INJURED_WEIGHT
    }

    #[must_use]
    pub fn adjust(&self, not_injured: u32, opponent_aggression: f64) -> u32 {
        let opponent = opponent_aggression.max(1.0);
        let scaled = f64::from(not_injured) * f64::from(self.neutral_aggression) / opponent;
        round_f64_to_u32(scaled).max(self.min_not_injured_weight)
    }
}

impl Default for AggressionCoupling {
    fn default() -> Self {
        Self {
            neutral_aggression: Self::default_neutral(),
            min_not_injured_weight: Self::default_min_weight(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryConfig {
    #[serde(default = "InjuryConfig::default_weights")]
    pub default_weights: InjuryWeights,
    #[serde(default = "InjuryConfig::default_prone_weights")]
    pub injury_prone_weights: InjuryWeights,
    /// `None` keeps the static odds regardless of the opponent.
    #[serde(default = "InjuryConfig::default_coupling")]
    pub aggression_coupling: Option<AggressionCoupling>,
    #[serde(default = "InjuryCatalog::load_from_static")]
    pub catalog: InjuryCatalog,
}

impl InjuryConfig {
    const fn default_weights() -> InjuryWeights {
        InjuryWeights::new(NOT_INJURED_WEIGHT, INJURED_WEIGHT)
    }

    const fn default_prone_weights() -> InjuryWeights {
        InjuryWeights::new(INJURY_PRONE_NOT_INJURED_WEIGHT, INJURED_WEIGHT)
    }

    #[allow(clippy::unnecessary_wraps)]
    fn default_coupling() -> Option<AggressionCoupling> {
        Some(AggressionCoupling::default())
    }

    /// Static variant: fixed odds, no opponent coupling.
    #[must_use]
    pub fn without_aggression(mut self) -> Self {
        self.aggression_coupling = None;
        self
    }

    #[must_use]
    pub fn weights_for(&self, player: &SelectedPlayer, opponent_aggression: f64) -> InjuryWeights {
        let base = if player.attributes.is_injury_prone() {
            self.injury_prone_weights
        } else {
            self.default_weights
        };
        match self.aggression_coupling {
            Some(coupling) => InjuryWeights {
                not_injured: coupling.adjust(base.not_injured, opponent_aggression),
                injured: base.injured,
            },
            None => base,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, weights) in [
            ("default_weights", self.default_weights),
            ("injury_prone_weights", self.injury_prone_weights),
        ] {
            if weights.not_injured == 0 && weights.injured == 0 {
                return Err(ConfigError::EmptyTable { table: field });
            }
        }
        self.catalog.validate()
    }
}

impl Default for InjuryConfig {
    fn default() -> Self {
        Self {
            default_weights: Self::default_weights(),
            injury_prone_weights: Self::default_prone_weights(),
            aggression_coupling: Self::default_coupling(),
            catalog: InjuryCatalog::load_from_static(),
        }
    }
}

/// Mean aggression rating across a lineup (0 for an empty lineup).
#[must_use]
pub fn average_aggression(lineup: &GameLineup) -> f64 {
    if lineup.players.is_empty() {
        return 0.0;
    }
    let total: f64 = lineup
        .players
        .iter()
        .map(|player| f64::from(player.attributes.aggression_rating.min(100)))
        .sum();
    total / usize_to_f64(lineup.players.len())
}

/// Roll post-match injuries for every player of `lineup`, in lineup order.
///
/// # Errors
///
/// Returns [`MatchError::InvalidConfiguration`] when the odds or the catalog
/// have no positive weights.
pub fn apply_injuries<R>(
    config: &InjuryConfig,
    lineup: &GameLineup,
    opponent: &GameLineup,
    kickoff: DateTime<Utc>,
    rng: &mut R,
) -> Result<Vec<InjuryEvent>, MatchError>
where
    R: Rng + ?Sized,
{
    let catalog = config.catalog.chooser()?;
    let opponent_aggression = average_aggression(opponent);
    let mut events = Vec::new();
    for player in &lineup.players {
        let weights = config.weights_for(player, opponent_aggression);
        if !roll_injured(weights, rng)? {
            continue;
        }
        let injury = *catalog.pick(rng);
        events.push(InjuryEvent {
            team_id: lineup.team.id.clone(),
            player_id: player.id.clone(),
            injury: injury.clone(),
            expires: recovery_expiry(injury, kickoff, rng),
        });
    }
    Ok(events)
}

/// One `{NotInjured, Injured}` draw.
///
/// # Errors
///
/// Returns [`MatchError::InvalidConfiguration`] if both weights are zero.
pub fn roll_injured<R>(weights: InjuryWeights, rng: &mut R) -> Result<bool, MatchError>
where
    R: Rng + ?Sized,
{
    let chooser = WeightedChooser::new(
        "injury_odds",
        [(false, weights.not_injured), (true, weights.injured)],
    )?;
    Ok(chooser.pick_copied(rng))
}

/// Kickoff plus a uniform number of recovery days, pushed to the end of that day.
pub fn recovery_expiry<R>(injury: &Injury, kickoff: DateTime<Utc>, rng: &mut R) -> DateTime<Utc>
where
    R: Rng + ?Sized,
{
    let min = injury.min_days.min(injury.max_days);
    let max = injury.max_days.max(injury.min_days);
    let days = rng.gen_range(min..=max);
    let shifted = kickoff
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    shifted
        .date_naive()
        .and_hms_opt(23, 59, 59)
        .map_or(shifted, |end_of_day| end_of_day.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formation::FormationType;
    use crate::sample::{strong_team_players, weak_team_players};
    use crate::team::Team;
    use chrono::{TimeZone, Timelike};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn lineup(id: &str, players: Vec<SelectedPlayer>) -> GameLineup {
        GameLineup {
            team: Team {
                id: id.to_string(),
                custom_name: id.to_string(),
                formation: FormationType::Diamond,
            },
            players,
            item_boosts: Vec::new(),
        }
    }

    #[test]
    fn static_catalog_loads_and_validates() {
        let catalog = InjuryCatalog::default_catalog();
        assert!(!catalog.injuries.is_empty());
        catalog.validate().expect("bundled catalog is valid");
        let squirrel = catalog.find_by_name("Squirrel Scare").expect("entry exists");
        assert_eq!(squirrel.severity, InjurySeverity::Low);
        let low: u32 = catalog
            .injuries
            .iter()
            .filter(|i| i.severity == InjurySeverity::Low)
            .map(|i| i.weight)
            .sum();
        let high: u32 = catalog
            .injuries
            .iter()
            .filter(|i| i.severity == InjurySeverity::High)
            .map(|i| i.weight)
            .sum();
        assert!(low > high * 10);
    }

    #[test]
    fn injury_prone_players_get_tighter_odds() {
        let config = InjuryConfig::default().without_aggression();
        let mut player = strong_team_players()[1].clone();
        assert_eq!(config.weights_for(&player, 50.0), InjuryWeights::new(30, 1));
        player.attributes.tags.push("injury-prone".to_string());
        assert_eq!(config.weights_for(&player, 90.0), InjuryWeights::new(15, 1));
    }

    #[test]
    fn aggressive_opponents_raise_injury_odds() {
        let config = InjuryConfig::default();
        let player = strong_team_players()[1].clone();
        assert_eq!(config.weights_for(&player, 50.0).not_injured, 30);
        assert_eq!(config.weights_for(&player, 75.0).not_injured, 20);
        assert_eq!(config.weights_for(&player, 25.0).not_injured, 60);
        assert_eq!(
            config.weights_for(&player, 1000.0).not_injured,
            MIN_NOT_INJURED_WEIGHT
        );
    }

    #[test]
    fn expiry_lands_at_end_of_day_within_recovery_window() {
        let injury = Injury {
            min_days: 3,
            max_days: 5,
            ..Injury::default()
        };
        let kickoff = Utc.with_ymd_and_hms(2024, 5, 1, 15, 30, 0).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..50 {
            let expiry = recovery_expiry(&injury, kickoff, &mut rng);
            assert_eq!((expiry.hour(), expiry.minute(), expiry.second()), (23, 59, 59));
            let days = (expiry.date_naive() - kickoff.date_naive()).num_days();
            assert!((3..=5).contains(&days), "days {days}");
        }
    }

    #[test]
    fn certain_injury_rolls_attach_team_and_player() {
        let mut config = InjuryConfig::default().without_aggression();
        config.default_weights = InjuryWeights::new(0, 1);
        let home = lineup("home", strong_team_players());
        let away = lineup("away", weak_team_players());
        let kickoff = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let events = apply_injuries(&config, &home, &away, kickoff, &mut rng).unwrap();
        assert_eq!(events.len(), home.players.len());
        for (event, player) in events.iter().zip(&home.players) {
            assert_eq!(event.team_id, "home");
            assert_eq!(event.player_id, player.id);
            assert!(event.is_active_at(kickoff));
        }
    }

    #[test]
    fn never_injured_odds_produce_no_events() {
        let mut config = InjuryConfig::default().without_aggression();
        config.default_weights = InjuryWeights::new(1, 0);
        let home = lineup("home", strong_team_players());
        let away = lineup("away", strong_team_players());
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let events = apply_injuries(&config, &home, &away, Utc::now(), &mut rng).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn zero_odds_are_a_configuration_error() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert!(matches!(
            roll_injured(InjuryWeights::new(0, 0), &mut rng),
            Err(MatchError::InvalidConfiguration { pool: "injury_odds" })
        ));
    }

    #[test]
    fn average_aggression_covers_whole_lineup() {
        let mut players = strong_team_players();
        for (idx, player) in players.iter_mut().enumerate() {
            player.attributes.aggression_rating = u8::try_from(idx * 10).unwrap();
        }
        let lineup = lineup("home", players);
        assert!((average_aggression(&lineup) - 20.0).abs() < 1e-12);
    }
}
