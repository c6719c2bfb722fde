use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use oink_soccer_game::TeamType;
use std::io::Write;
use std::time::Duration;

use super::{FormationMatrix, ReplayReport, SeedSource, SimulationSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

/// Result of one tester run, ready to render.
#[derive(Debug)]
pub enum Report {
    Simulation(SimulationSummary),
    Formations(FormationMatrix),
    Replay(Box<ReplayReport>),
}

pub fn write_report(
    out: &mut dyn Write,
    report: &Report,
    format: ReportFormat,
    elapsed: Duration,
) -> Result<()> {
    match (format, report) {
        (ReportFormat::Json, Report::Simulation(summary)) => write_json(out, summary),
        (ReportFormat::Json, Report::Formations(matrix)) => write_json(out, matrix),
        (ReportFormat::Json, Report::Replay(replay)) => write_json(out, replay.as_ref()),
        (ReportFormat::Markdown, Report::Simulation(summary)) => {
            generate_markdown_simulation(out, summary)
        }
        (ReportFormat::Markdown, Report::Formations(matrix)) => {
            generate_markdown_formations(out, matrix)
        }
        (ReportFormat::Markdown, Report::Replay(replay)) => generate_markdown_replay(out, replay),
        (ReportFormat::Console, report) => {
            match report {
                Report::Simulation(summary) => generate_console_simulation(out, summary)?,
                Report::Formations(matrix) => generate_console_formations(out, matrix)?,
                Report::Replay(replay) => generate_console_replay(out, replay)?,
            }
            writeln!(out)?;
            writeln!(out, "🏁 Total time: {elapsed:?}")?;
            Ok(())
        }
    }
}

fn write_json<T: serde::Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn pct(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

fn generate_console_simulation(out: &mut dyn Write, summary: &SimulationSummary) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Simulation Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;
    writeln!(
        out,
        "{} ({}) vs {} ({})",
        summary.home_team.bold(),
        summary.home_formation,
        summary.away_team.bold(),
        summary.away_formation
    )?;
    writeln!(
        out,
        "Matches: {} (base seed {:#x})",
        summary.matches, summary.base_seed
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Home wins: {}",
        pct(summary.home_win_rate()).green()
    )?;
    writeln!(out, "Draws:     {}", pct(summary.draw_rate()).yellow())?;
    writeln!(out, "Away wins: {}", pct(summary.away_win_rate()).red())?;
    writeln!(out)?;
    writeln!(out, "Goals per game:    {:.2}", summary.goals_per_game())?;
    writeln!(out, "Chances per game:  {:.2}", summary.chances_per_game())?;
    writeln!(out, "Injuries per game: {:.3}", summary.injuries_per_game())?;
    writeln!(out)?;
    writeln!(out, "{}", "⚽ Scorers by position".bright_yellow().bold())?;
    for (label, goals) in summary.counts.scorers.entries() {
        writeln!(
            out,
            "  {label:12} {goals:>7}  {}",
            pct(summary.scorer_fraction(goals))
        )?;
    }
    Ok(())
}

fn generate_markdown_simulation(out: &mut dyn Write, summary: &SimulationSummary) -> Result<()> {
    writeln!(out, "# Oink Soccer Simulation\n")?;
    writeln!(
        out,
        "**{}** ({}) vs **{}** ({}), {} matches, base seed `{:#x}`\n",
        summary.home_team,
        summary.home_formation,
        summary.away_team,
        summary.away_formation,
        summary.matches,
        summary.base_seed
    )?;
    writeln!(out, "## Results\n")?;
    writeln!(out, "- **Home wins**: {}", pct(summary.home_win_rate()))?;
    writeln!(out, "- **Draws**: {}", pct(summary.draw_rate()))?;
    writeln!(out, "- **Away wins**: {}", pct(summary.away_win_rate()))?;
    writeln!(out, "- **Goals per game**: {:.2}", summary.goals_per_game())?;
    writeln!(out, "- **Chances per game**: {:.2}", summary.chances_per_game())?;
    writeln!(out, "- **Injuries per game**: {:.3}\n", summary.injuries_per_game())?;
    writeln!(out, "## Scorers by position\n")?;
    writeln!(out, "| Position | Goals | Share |")?;
    writeln!(out, "|---|---:|---:|")?;
    for (label, goals) in summary.counts.scorers.entries() {
        writeln!(
            out,
            "| {label} | {goals} | {} |",
            pct(summary.scorer_fraction(goals))
        )?;
    }
    Ok(())
}

fn generate_console_formations(out: &mut dyn Write, matrix: &FormationMatrix) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "🧮 Formation Matrix".bright_cyan().bold())?;
    writeln!(out, "{}", "===================".cyan())?;
    writeln!(
        out,
        "{} matches per pair (base seed {:#x})",
        matrix.matches_per_pair, matrix.base_seed
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<13} {:<13} {:>7} {:>7} {:>7} {:>8}",
        "Home", "Away", "Win", "Draw", "Loss", "Shots"
    )?;
    for pair in &matrix.pairs {
        writeln!(
            out,
            "{:<13} {:<13} {:>7} {:>7} {:>7} {:>8.2}",
            pair.home_formation.name(),
            pair.away_formation.name(),
            pct(pair.home_win_rate()),
            pct(pair.draw_rate()),
            pct(pair.away_win_rate()),
            pair.chances_per_game()
        )?;
    }
    Ok(())
}

fn generate_markdown_formations(out: &mut dyn Write, matrix: &FormationMatrix) -> Result<()> {
    writeln!(out, "# Oink Soccer Formation Matrix\n")?;
    writeln!(
        out,
        "{} matches per pair, base seed `{:#x}`\n",
        matrix.matches_per_pair, matrix.base_seed
    )?;
    writeln!(out, "| Home | Away | Win | Draw | Loss | Shots/game |")?;
    writeln!(out, "|---|---|---:|---:|---:|---:|")?;
    for pair in &matrix.pairs {
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {:.2} |",
            pair.home_formation,
            pair.away_formation,
            pct(pair.home_win_rate()),
            pct(pair.draw_rate()),
            pct(pair.away_win_rate()),
            pair.chances_per_game()
        )?;
    }
    Ok(())
}

fn seed_label(replay: &ReplayReport) -> String {
    match &replay.seed.source {
        SeedSource::Numeric => replay.seed.seed.to_string(),
        SeedSource::Hex => format!("{:#x}", replay.seed.seed),
        SeedSource::Entropy(text) => format!("hash:{text} ({})", replay.seed.seed),
    }
}

fn team_label(replay: &ReplayReport, team: TeamType) -> &str {
    match team {
        TeamType::Home => &replay.home_team,
        TeamType::Away => &replay.away_team,
    }
}

fn generate_console_replay(out: &mut dyn Write, replay: &ReplayReport) -> Result<()> {
    let stats = &replay.outcome.stats;
    writeln!(out)?;
    writeln!(out, "{}", "🎬 Match Replay".bright_cyan().bold())?;
    writeln!(out, "{}", "===============".cyan())?;
    writeln!(out, "Seed: {}", seed_label(replay))?;
    writeln!(out, "Kickoff: {}", replay.kickoff.to_rfc3339())?;
    writeln!(out)?;
    for entry in &replay.timeline {
        let result = if entry.goal {
            "GOAL".green().bold()
        } else {
            "miss".dimmed()
        };
        writeln!(
            out,
            "{:>3}'  {:<14} {:<20} {:?} {}",
            entry.minute,
            team_label(replay, entry.team),
            entry.player_name,
            entry.chance_type,
            result
        )?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "{} {} - {} {}",
        replay.home_team.bold(),
        stats.home_team_stats.goals,
        stats.away_team_stats.goals,
        replay.away_team.bold()
    )?;
    writeln!(
        out,
        "Shots: {} - {}",
        stats.home_team_stats.shots, stats.away_team_stats.shots
    )?;
    for injury in replay
        .outcome
        .home_injuries
        .iter()
        .chain(&replay.outcome.away_injuries)
    {
        writeln!(
            out,
            "{} {} ({}): {} until {}",
            "🩹".yellow(),
            injury.player_id,
            injury.team_id,
            injury.injury.name,
            injury.expires.date_naive()
        )?;
    }
    writeln!(out, "Fingerprint: {}", replay.fingerprint)?;
    Ok(())
}

fn generate_markdown_replay(out: &mut dyn Write, replay: &ReplayReport) -> Result<()> {
    let stats = &replay.outcome.stats;
    writeln!(
        out,
        "# {} {} - {} {}\n",
        replay.home_team,
        stats.home_team_stats.goals,
        stats.away_team_stats.goals,
        replay.away_team
    )?;
    writeln!(out, "- **Seed**: `{}`", seed_label(replay))?;
    writeln!(out, "- **Kickoff**: {}", replay.kickoff.to_rfc3339())?;
    writeln!(out, "- **Fingerprint**: `{}`\n", replay.fingerprint)?;
    writeln!(out, "| Minute | Team | Player | Chance | Result |")?;
    writeln!(out, "|---:|---|---|---|---|")?;
    for entry in &replay.timeline {
        writeln!(
            out,
            "| {} | {} | {} | {:?} | {} |",
            entry.minute,
            team_label(replay, entry.team),
            entry.player_name,
            entry.chance_type,
            if entry.goal { "Goal" } else { "Miss" }
        )?;
    }
    Ok(())
}
