use chrono::{TimeZone, Utc};
use oink_soccer_game::sample::{lineup_for, strong_team_players, weak_team_players};
use oink_soccer_game::{
    FormationType, MatchConfig, MatchEngine, PlayerScoring, ScalingCurve, SelectedPlayer,
    TeamType, derive_match_seed, goal_probability, rng_from_seed,
};

#[test]
fn every_formation_pair_respects_clock_count_and_chance_rules() {
    let config = MatchConfig::default_config();
    let engine = MatchEngine::new(config);
    let kickoff = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    for home_shape in FormationType::ALL {
        for away_shape in FormationType::ALL {
            let home = lineup_for("home", home_shape, &strong_team_players());
            let away = lineup_for("away", away_shape, &weak_team_players());
            let range = config.event_ranges.range_for(
                config.formations.config(home_shape).unwrap().style,
                config.formations.config(away_shape).unwrap().style,
            );
            for index in 0..150 {
                let mut rng = rng_from_seed(derive_match_seed(0xF0F0, index));
                let outcome = engine.run(&home, &away, kickoff, &mut rng).unwrap();
                let events = &outcome.events;

                let count = u32::try_from(events.len()).unwrap();
                assert!(
                    range.contains(count),
                    "{home_shape} vs {away_shape}: {count} outside {range:?}"
                );
                assert!(events.iter().all(|e| (1..=98).contains(&e.minute)));
                assert!(events.windows(2).all(|w| w[0].minute <= w[1].minute));
                assert!(
                    events
                        .windows(2)
                        .all(|w| w[0].chance_type() != w[1].chance_type())
                );

                let stats = &outcome.stats;
                assert_eq!(
                    (stats.home_team_stats.shots + stats.away_team_stats.shots) as usize,
                    events.len()
                );
                for event in events {
                    let side = match event.team() {
                        TeamType::Home => &home,
                        TeamType::Away => &away,
                    };
                    assert!(side.find_player(event.player_id()).is_some());
                }
                assert!(outcome.home_injuries.iter().all(|i| i.team_id == "home"));
                assert!(outcome.away_injuries.iter().all(|i| i.team_id == "away"));
            }
        }
    }
}

#[test]
fn defensive_pair_stays_cagey_and_attacking_pair_stays_open() {
    let engine = MatchEngine::default();
    let kickoff = Utc.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap();
    let pyramids = (
        lineup_for("home", FormationType::Pyramid, &strong_team_players()),
        lineup_for("away", FormationType::Pyramid, &strong_team_players()),
    );
    let ys = (
        lineup_for("home", FormationType::Y, &strong_team_players()),
        lineup_for("away", FormationType::Y, &strong_team_players()),
    );
    for seed in 0..300 {
        let cagey = engine
            .run(&pyramids.0, &pyramids.1, kickoff, &mut rng_from_seed(seed))
            .unwrap();
        assert!((1..=6).contains(&cagey.events.len()));
        let open = engine
            .run(&ys.0, &ys.1, kickoff, &mut rng_from_seed(seed))
            .unwrap();
        assert!((7..=15).contains(&open.events.len()));
    }
}

#[test]
fn higher_attack_rating_never_lowers_goal_probability() {
    let scoring = PlayerScoring::default();
    let curve = ScalingCurve::default();
    let mut shooter: SelectedPlayer = strong_team_players()[4].clone();
    for defense in [40_u32, 66, 80, 100] {
        let mut last = 0.0;
        for attack in 0..=100_u8 {
            shooter.attributes.attack_rating = attack;
            let weight = curve.scale_score(shooter.attack_score(&scoring));
            let p = goal_probability(weight, curve.scale(u8::try_from(defense).unwrap()));
            assert!(p >= last, "attack {attack} dropped to {p} vs defense {defense}");
            last = p;
        }
    }
}

#[test]
fn out_of_position_penalty_is_exact_for_every_score() {
    let scoring = PlayerScoring::default();
    let natural = strong_team_players()[2].clone();
    let mut displaced = natural.clone();
    displaced.selected_position = oink_soccer_game::PlayerPosition::Goalkeeper;
    assert!(displaced.is_out_of_position());
    for (base, moved) in [
        (natural.control_score(&scoring), displaced.control_score(&scoring)),
        (natural.attack_score(&scoring), displaced.attack_score(&scoring)),
        (natural.defense_score(&scoring), displaced.defense_score(&scoring)),
    ] {
        assert!((base * 0.85 - moved).abs() < 1e-9);
    }
}
