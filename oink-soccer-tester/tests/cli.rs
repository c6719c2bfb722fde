use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "oink-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn run_json(args: &[&str], label: &str) -> serde_json::Value {
    let exe = env!("CARGO_BIN_EXE_oink-soccer-tester");
    let output_path = temp_path(label);
    let status = Command::new(exe)
        .args(args)
        .args(["--report", "json", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(&output_path).expect("read output");
    let _ = std::fs::remove_file(output_path);
    serde_json::from_str(&content).expect("json report")
}

#[test]
fn cli_simulation_writes_json_summary() {
    let report = run_json(&["--matches", "200", "--seed", "0x2a"], "simulate");
    assert_eq!(report["matches"], 200);
    assert_eq!(report["base_seed"], 42);
    let total = report["home_wins"].as_u64().unwrap()
        + report["away_wins"].as_u64().unwrap()
        + report["draws"].as_u64().unwrap();
    assert_eq!(total, 200);
}

#[test]
fn cli_replay_is_stable_across_runs() {
    let args = ["--mode", "replay", "--seed", "hash:block 800000"];
    let first = run_json(&args, "replay-a");
    let second = run_json(&args, "replay-b");
    assert_eq!(first["fingerprint"], second["fingerprint"]);
    assert_eq!(first["seed"]["source"]["kind"], "Entropy");
    assert!(first["outcome"]["events"].is_array());
}

#[test]
fn cli_formations_covers_sixteen_pairs() {
    let report = run_json(&["--mode", "formations", "--matches", "10"], "formations");
    assert_eq!(report["pairs"].as_array().map(Vec::len), Some(16));
}

#[test]
fn cli_rejects_bad_seed() {
    let exe = env!("CARGO_BIN_EXE_oink-soccer-tester");
    let output = Command::new(exe)
        .args(["--seed", "not-a-seed", "--report", "json", "--matches", "1"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unrecognized seed token"));
}

#[test]
fn cli_rejects_unknown_formation() {
    let exe = env!("CARGO_BIN_EXE_oink-soccer-tester");
    let output = Command::new(exe)
        .args(["--home-formation", "4-4-2"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown formation"));
}
