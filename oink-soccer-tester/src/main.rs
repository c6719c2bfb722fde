mod logic;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use oink_soccer_game::sample::{strong_team_players, weak_team_players};
use oink_soccer_game::{FormationType, MatchConfig, MatchEngine, SelectedPlayer};
use std::fs::{self, File};
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use logic::reports::{Report, ReportFormat, write_report};
use logic::{
    parse_formation, parse_seed_token, replay, resolve_lineup, simulate, simulate_formations,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Monte Carlo batch between two lineups
    Simulate,
    /// Play one match from a seed and print its timeline
    Replay,
    /// Every formation pairing for two squads
    Formations,
}

#[derive(Debug, Parser)]
#[command(name = "oink-soccer-tester", version = "0.1.0")]
#[command(about = "Simulate, replay and compare Oink Soccer matches")]
struct Args {
    /// What to run
    #[arg(long, value_enum, default_value_t = Mode::Simulate)]
    mode: Mode,

    /// Home lineup: `strong`, `weak`, or a lineup JSON file
    #[arg(long, default_value = "strong")]
    home: String,

    /// Away lineup: `strong`, `weak`, or a lineup JSON file
    #[arg(long, default_value = "weak")]
    away: String,

    /// Formation for a built-in home squad
    #[arg(long, value_parser = parse_formation)]
    home_formation: Option<FormationType>,

    /// Formation for a built-in away squad
    #[arg(long, value_parser = parse_formation)]
    away_formation: Option<FormationType>,

    /// Matches to simulate (per pair in formations mode)
    #[arg(long, default_value_t = 10_000)]
    matches: u64,

    /// Seed: decimal, 0x hex, or hash:<text>
    #[arg(long, default_value = "1337")]
    seed: String,

    /// Kickoff time used for injury expiry
    #[arg(long, default_value = "2024-01-01T15:00:00Z")]
    kickoff: DateTime<Utc>,

    /// Optional match configuration JSON overriding the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.report == ReportFormat::Console {
        announce_banner();
    }

    let start_time = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let engine = MatchEngine::new(&config);
    let report = run(&args, &engine)?;

    let mut output_target = OutputTarget::new(args.output.clone())?;
    write_report(&mut output_target, &report, args.report, start_time.elapsed())?;
    output_target.flush_inner()?;
    Ok(())
}

fn announce_banner() {
    println!("{}", "🐷 Oink Soccer Tester".bright_cyan().bold());
    println!("{}", "=====================".cyan());
}

fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    let Some(path) = path else {
        return Ok(MatchConfig::default_config().clone());
    };
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config = MatchConfig::from_json(&raw)
        .with_context(|| format!("failed to parse config from {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config in {}", path.display()))?;
    Ok(config)
}

fn run(args: &Args, engine: &MatchEngine<'_>) -> Result<Report> {
    let seed = parse_seed_token(&args.seed)?;
    match args.mode {
        Mode::Simulate => {
            if args.matches == 0 {
                bail!("--matches must be at least 1");
            }
            let home = resolve_lineup(&args.home, "home", args.home_formation)?;
            let away = resolve_lineup(&args.away, "away", args.away_formation)?;
            let summary = simulate(engine, &home, &away, seed.seed, args.matches, args.kickoff)?;
            Ok(Report::Simulation(summary))
        }
        Mode::Replay => {
            let home = resolve_lineup(&args.home, "home", args.home_formation)?;
            let away = resolve_lineup(&args.away, "away", args.away_formation)?;
            let result = replay(engine, &home, &away, seed, args.kickoff)?;
            Ok(Report::Replay(Box::new(result)))
        }
        Mode::Formations => {
            if args.matches == 0 {
                bail!("--matches must be at least 1");
            }
            let home = resolve_squad(&args.home)?;
            let away = resolve_squad(&args.away)?;
            let matrix =
                simulate_formations(engine, &home, &away, seed.seed, args.matches, args.kickoff)?;
            Ok(Report::Formations(matrix))
        }
    }
}

/// Players only; formations mode re-slots them into every shape.
fn resolve_squad(source: &str) -> Result<Vec<SelectedPlayer>> {
    match source {
        "strong" => Ok(strong_team_players()),
        "weak" => Ok(weak_team_players()),
        path => Ok(resolve_lineup(path, "squad", None)?.players),
    }
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args::parse_from(["oink-soccer-tester"])
    }

    #[test]
    fn defaults_match_documented_values() {
        let args = base_args();
        assert_eq!(args.mode, Mode::Simulate);
        assert_eq!(args.matches, 10_000);
        assert_eq!(args.seed, "1337");
        assert_eq!(args.report, ReportFormat::Console);
        assert!(args.home_formation.is_none());
    }

    #[test]
    fn parses_formation_flags() {
        let args = Args::parse_from([
            "oink-soccer-tester",
            "--mode",
            "formations",
            "--home-formation",
            "the-y",
            "--away-formation",
            "pyramid",
        ]);
        assert_eq!(args.mode, Mode::Formations);
        assert_eq!(args.home_formation, Some(FormationType::Y));
        assert_eq!(args.away_formation, Some(FormationType::Pyramid));
    }

    #[test]
    fn rejects_zero_matches() {
        let args = Args {
            matches: 0,
            ..base_args()
        };
        let engine = MatchEngine::default();
        assert!(run(&args, &engine).is_err());
    }

    #[test]
    fn replay_mode_honours_formations() {
        let args = Args {
            mode: Mode::Replay,
            home_formation: Some(FormationType::Box),
            ..base_args()
        };
        let engine = MatchEngine::default();
        let Report::Replay(result) = run(&args, &engine).unwrap() else {
            panic!("expected replay report");
        };
        assert_eq!(result.seed.seed, 1337);
        assert!(!result.fingerprint.is_empty());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("oink-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "scoring": { "out_of_position_penalty": 0.9 } }"#).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert!((config.scoring.out_of_position_penalty - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.formations, MatchConfig::default_config().formations);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn writes_report_to_file() {
        let path = std::env::temp_dir().join(format!("oink-report-{}.json", std::process::id()));
        let args = Args {
            matches: 25,
            report: ReportFormat::Json,
            output: Some(path.clone()),
            ..base_args()
        };
        let engine = MatchEngine::default();
        let report = run(&args, &engine).unwrap();
        let mut target = OutputTarget::new(args.output.clone()).unwrap();
        write_report(&mut target, &report, args.report, std::time::Duration::ZERO).unwrap();
        target.flush_inner().unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"matches\": 25"));
        let _ = fs::remove_file(path);
    }
}
