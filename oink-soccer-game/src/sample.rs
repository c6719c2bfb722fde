//! Built-in squads for demos, the tester, and tests.

use crate::config::MatchConfig;
use crate::formation::FormationType;
use crate::player::{PlayerAttributes, PlayerPosition, SelectedPlayer};
use crate::team::{GameLineup, Team};

struct Ratings {
    goalkeeper: u8,
    speed: u8,
    defense: u8,
    control: u8,
    attack: u8,
    aggression: u8,
}

fn player(id: &str, name: &str, position: PlayerPosition, ratings: &Ratings) -> SelectedPlayer {
    SelectedPlayer {
        id: id.to_string(),
        name: name.to_string(),
        attributes: PlayerAttributes {
            goalkeeper_rating: ratings.goalkeeper,
            defense_rating: ratings.defense,
            physical_rating: ratings.speed,
            control_rating: ratings.control,
            attack_rating: ratings.attack,
            aggression_rating: ratings.aggression,
            primary_position: position,
            positions: vec![position],
            ..PlayerAttributes::default()
        },
        selected_position: position,
        injury: None,
    }
}

/// Goalkeeper, defender, two midfielders, attacker.
#[must_use]
pub fn strong_team_players() -> Vec<SelectedPlayer> {
    use PlayerPosition::{Attack, Defense, Goalkeeper, Midfield};
    vec![
        player("1", "Truffles", Goalkeeper, &Ratings {
            goalkeeper: 88,
            speed: 74,
            defense: 33,
            control: 21,
            attack: 37,
            aggression: 60,
        }),
        player("2", "Hamhock", Defense, &Ratings {
            goalkeeper: 14,
            speed: 80,
            defense: 90,
            control: 81,
            attack: 37,
            aggression: 55,
        }),
        player("3", "Porkington", Midfield, &Ratings {
            goalkeeper: 14,
            speed: 80,
            defense: 55,
            control: 85,
            attack: 91,
            aggression: 48,
        }),
        player("4", "Snoutley", Midfield, &Ratings {
            goalkeeper: 11,
            speed: 81,
            defense: 75,
            control: 81,
            attack: 71,
            aggression: 52,
        }),
        player("5", "Bacon Bolt", Attack, &Ratings {
            goalkeeper: 14,
            speed: 80,
            defense: 22,
            control: 85,
            attack: 93,
            aggression: 45,
        }),
    ]
}

/// Same shape as [`strong_team_players`], lower ratings throughout.
#[must_use]
pub fn weak_team_players() -> Vec<SelectedPlayer> {
    use PlayerPosition::{Attack, Defense, Goalkeeper, Midfield};
    vec![
        player("6", "Mudlark", Goalkeeper, &Ratings {
            goalkeeper: 65,
            speed: 55,
            defense: 12,
            control: 33,
            attack: 2,
            aggression: 40,
        }),
        player("7", "Grunter", Defense, &Ratings {
            goalkeeper: 14,
            speed: 56,
            defense: 75,
            control: 81,
            attack: 11,
            aggression: 62,
        }),
        player("8", "Slopbucket", Midfield, &Ratings {
            goalkeeper: 14,
            speed: 68,
            defense: 65,
            control: 76,
            attack: 72,
            aggression: 50,
        }),
        player("9", "Trotter", Midfield, &Ratings {
            goalkeeper: 11,
            speed: 71,
            defense: 67,
            control: 71,
            attack: 55,
            aggression: 47,
        }),
        player("10", "Curly", Attack, &Ratings {
            goalkeeper: 14,
            speed: 68,
            defense: 22,
            control: 67,
            attack: 74,
            aggression: 55,
        }),
    ]
}

/// Put `squad` into `formation`, player `i` taking slot `i`.
///
/// Players keep their own playable positions, so a squad built for one shape
/// picks up out-of-position penalties in another.
#[must_use]
pub fn lineup_for(id: &str, formation: FormationType, squad: &[SelectedPlayer]) -> GameLineup {
    let slots = MatchConfig::default_config()
        .formations
        .get(formation)
        .map(|config| config.slots.clone())
        .unwrap_or_default();
    let players = squad
        .iter()
        .enumerate()
        .map(|(idx, player)| {
            let mut player = player.clone();
            if let Some(slot) = slots.get(idx) {
                player.selected_position = *slot;
            }
            player
        })
        .collect();
    GameLineup {
        team: Team {
            id: id.to_string(),
            custom_name: id.to_string(),
            formation,
        },
        players,
        item_boosts: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TeamType;

    #[test]
    fn squads_fill_the_diamond() {
        let config = MatchConfig::default_config();
        let diamond = config.formations.config(FormationType::Diamond).unwrap();
        for squad in [strong_team_players(), weak_team_players()] {
            let lineup = lineup_for("side", FormationType::Diamond, &squad);
            lineup.validate(TeamType::Home, diamond).unwrap();
            assert!(lineup.players.iter().all(|p| !p.is_out_of_position()));
        }
    }

    #[test]
    fn other_shapes_reassign_slots() {
        let lineup = lineup_for("side", FormationType::Y, &strong_team_players());
        assert_eq!(lineup.players[3].selected_position, PlayerPosition::Attack);
        assert!(lineup.players[3].is_out_of_position());
        assert_eq!(lineup.team.formation, FormationType::Y);
    }
}
