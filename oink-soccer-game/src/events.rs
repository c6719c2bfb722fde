//! Match events and the per-team stats folded from them.

use serde::{Deserialize, Serialize};

use crate::chance::ChanceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamType {
    Home,
    Away,
}

impl TeamType {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Home => Self::Away,
            Self::Away => Self::Home,
        }
    }
}

/// Who took the shot, for which side, from what kind of chance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotDetails {
    pub player_id: String,
    pub team_type: TeamType,
    pub chance_type: ChanceType,
}

/// Serialized as `"type": "Goal" | "Miss"` with the details under `"event"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "event")]
pub enum EventPayload {
    Goal(ShotDetails),
    Miss(ShotDetails),
}

impl EventPayload {
    #[must_use]
    pub const fn details(&self) -> &ShotDetails {
        match self {
            Self::Goal(details) | Self::Miss(details) => details,
        }
    }

    #[must_use]
    pub const fn is_goal(&self) -> bool {
        matches!(self, Self::Goal(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    #[serde(flatten)]
    pub payload: EventPayload,
    pub minute: u8,
}

impl GameEvent {
    #[must_use]
    pub const fn team(&self) -> TeamType {
        self.payload.details().team_type
    }

    #[must_use]
    pub fn player_id(&self) -> &str {
        &self.payload.details().player_id
    }

    #[must_use]
    pub const fn chance_type(&self) -> ChanceType {
        self.payload.details().chance_type
    }

    #[must_use]
    pub const fn is_goal(&self) -> bool {
        self.payload.is_goal()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcomeType {
    Won,
    Lost,
    Drawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team_type: TeamType,
    pub shots: u32,
    pub goals: u32,
}

impl TeamStats {
    #[must_use]
    pub const fn new(team_type: TeamType) -> Self {
        Self {
            team_type,
            shots: 0,
            goals: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub home_team_stats: TeamStats,
    pub away_team_stats: TeamStats,
}

impl GameStats {
    /// Every event is a shot; only goals bump the goal counter.
    #[must_use]
    pub fn from_events(events: &[GameEvent]) -> Self {
        let mut stats = Self {
            home_team_stats: TeamStats::new(TeamType::Home),
            away_team_stats: TeamStats::new(TeamType::Away),
        };
        for event in events {
            let side = match event.team() {
                TeamType::Home => &mut stats.home_team_stats,
                TeamType::Away => &mut stats.away_team_stats,
            };
            side.shots += 1;
            if event.is_goal() {
                side.goals += 1;
            }
        }
        stats
    }

    #[must_use]
    pub const fn for_team(&self, team: TeamType) -> &TeamStats {
        match team {
            TeamType::Home => &self.home_team_stats,
            TeamType::Away => &self.away_team_stats,
        }
    }

    #[must_use]
    pub const fn outcome_for(&self, team: TeamType) -> GameOutcomeType {
        let own = self.for_team(team).goals;
        let other = self.for_team(team.opponent()).goals;
        if own > other {
            GameOutcomeType::Won
        } else if own < other {
            GameOutcomeType::Lost
        } else {
            GameOutcomeType::Drawn
        }
    }
}
