use chrono::{DateTime, TimeZone, Utc};
use oink_soccer_game::sample::{lineup_for, strong_team_players, weak_team_players};
use oink_soccer_game::{
    Boost, CountingRng, FormationType, MatchEngine, MatchOutcome, PlayerPosition, rng_from_seed,
    seed_from_entropy,
};

fn kickoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 18, 14, 30, 0).unwrap()
}

fn play(seed: u64) -> MatchOutcome {
    let mut home = lineup_for("hogs", FormationType::Y, &strong_team_players());
    home.item_boosts = vec![
        Boost::team(1.0, 1.1).with_applications(2),
        Boost::position(PlayerPosition::Attack, 1.05, 1.2),
    ];
    let away = lineup_for("boars", FormationType::Pyramid, &weak_team_players());
    MatchEngine::default()
        .run(&home, &away, kickoff(), &mut rng_from_seed(seed))
        .expect("valid lineups")
}

#[test]
fn same_seed_replays_byte_identical() {
    for seed in [0_u64, 1, 42, 0xDEAD_BEEF, u64::MAX] {
        let first = play(seed);
        let second = play(seed);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
    }
}

#[test]
fn different_seeds_produce_different_matches() {
    let prints: std::collections::BTreeSet<String> = (0..20_u64)
        .map(|seed| play(seed).fingerprint().unwrap())
        .collect();
    assert!(prints.len() > 15, "only {} distinct outcomes", prints.len());
}

#[test]
fn entropy_seeded_matches_replay() {
    let seed = seed_from_entropy(b"block 31337 hash");
    assert_eq!(play(seed), play(seed_from_entropy(b"block 31337 hash")));
}

#[test]
fn replay_consumes_the_same_number_of_draws() {
    let home = lineup_for("hogs", FormationType::Diamond, &strong_team_players());
    let away = lineup_for("boars", FormationType::Diamond, &weak_team_players());
    let engine = MatchEngine::default();

    let mut first = CountingRng::from_seed(9);
    let mut second = CountingRng::from_seed(9);
    let a = engine.run(&home, &away, kickoff(), &mut first).unwrap();
    let b = engine.run(&home, &away, kickoff(), &mut second).unwrap();
    assert_eq!(a, b);
    assert!(first.draws() > 0);
    assert_eq!(first.draws(), second.draws());
}
