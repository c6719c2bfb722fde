use chrono::{TimeZone, Utc};
use oink_soccer_game::sample::{lineup_for, strong_team_players, weak_team_players};
use oink_soccer_game::{
    BoostType, FormationType, GameLineup, InjuryCatalog, MatchConfig, MatchEngine, PlayerLevel,
    PlayerPosition, rng_from_seed,
};
use serde_json::{Value, json};

#[test]
fn lineup_parses_from_roster_json() {
    let lineup: GameLineup = serde_json::from_value(json!({
        "team": { "id": "t-1", "custom_name": "Mud Kings", "formation": "The Box" },
        "players": [
            {
                "id": "p1",
                "name": "Keeper",
                "position": "Goalkeeper",
                "attributes": {
                    "goalkeeper_rating": 80, "speed_rating": 60, "control_rating": 30,
                    "position": "Goalkeeper", "player_level": "Professional"
                }
            },
            {
                "id": "p2",
                "position": "Defense",
                "attributes": { "defense_rating": 77, "positions": ["Defense", "Midfield"] }
            }
        ],
        "item_boosts": [
            { "boost_type": "Team Boost", "min_boost": 1.0, "max_boost": 1.2, "applications": 3 }
        ]
    }))
    .unwrap();

    assert_eq!(lineup.team.formation, FormationType::Box);
    assert_eq!(lineup.players.len(), 2);
    let keeper = &lineup.players[0];
    assert_eq!(keeper.selected_position, PlayerPosition::Goalkeeper);
    assert_eq!(keeper.attributes.physical_rating, 60);
    assert_eq!(keeper.attributes.player_level, Some(PlayerLevel::Professional));
    assert!(keeper.injury.is_none());
    assert!(lineup.players[1].attributes.can_play(PlayerPosition::Midfield));
    assert_eq!(lineup.item_boosts[0].boost_type, BoostType::Team);
    assert_eq!(lineup.item_boosts[0].applications, 3);
}

#[test]
fn outcome_serializes_with_wire_field_names() {
    let home = lineup_for("home", FormationType::Y, &strong_team_players());
    let away = lineup_for("away", FormationType::Y, &weak_team_players());
    let kickoff = Utc.with_ymd_and_hms(2024, 7, 4, 18, 0, 0).unwrap();
    let outcome = MatchEngine::default()
        .run(&home, &away, kickoff, &mut rng_from_seed(314))
        .unwrap();
    let value = serde_json::to_value(&outcome).unwrap();

    let events = value["events"].as_array().unwrap();
    assert!(!events.is_empty());
    for event in events {
        let kind = event["type"].as_str().unwrap();
        assert!(kind == "Goal" || kind == "Miss");
        assert!(event["minute"].is_u64());
        let details = &event["event"];
        assert!(details["player_id"].is_string());
        assert!(matches!(details["team_type"].as_str(), Some("Home" | "Away")));
        assert!(details["chance_type"].is_string());
    }
    for side in ["home_team_stats", "away_team_stats"] {
        let stats = &value["stats"][side];
        assert!(stats["shots"].is_u64());
        assert!(stats["goals"].is_u64());
    }
    assert!(value["home_injuries"].is_array());

    let back: oink_soccer_game::MatchOutcome = serde_json::from_value(value).unwrap();
    assert_eq!(back, outcome);
}

#[test]
fn bundled_injury_catalog_has_expected_shape() {
    let raw: Value =
        serde_json::from_str(include_str!("../assets/injuries.json")).expect("asset is JSON");
    let entries = raw["injuries"].as_array().expect("injuries array");
    assert_eq!(entries.len(), InjuryCatalog::default_catalog().injuries.len());
    for entry in entries {
        for field in [
            "name",
            "severity",
            "stats_reduction",
            "min_recovery_days",
            "max_recovery_days",
            "selection_weight",
        ] {
            assert!(entry.get(field).is_some(), "missing {field} in {entry}");
        }
    }
}

#[test]
fn config_round_trips_through_json() {
    let config = MatchConfig::default_config();
    let json = serde_json::to_string_pretty(config).unwrap();
    let parsed = MatchConfig::from_json(&json).unwrap();
    assert_eq!(&parsed, config);
    parsed.validate().unwrap();
}
