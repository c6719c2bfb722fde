use anyhow::{Context, Result};
use log::warn;
use oink_soccer_game::sample::{lineup_for, strong_team_players, weak_team_players};
use oink_soccer_game::{FormationType, GameLineup};
use std::fs;
use std::path::Path;

const DEFAULT_FORMATION: FormationType = FormationType::Diamond;

/// clap value parser for formation names: `pyramid`, `the-diamond`, `The Y`, ...
pub fn parse_formation(raw: &str) -> Result<FormationType, String> {
    let normalized = raw.trim().to_ascii_lowercase().replace(['-', '_'], " ");
    let name = normalized.strip_prefix("the ").unwrap_or(&normalized);
    match name {
        "pyramid" => Ok(FormationType::Pyramid),
        "diamond" => Ok(FormationType::Diamond),
        "y" => Ok(FormationType::Y),
        "box" => Ok(FormationType::Box),
        _ => Err(format!(
            "unknown formation `{raw}` (expected pyramid, diamond, y or box)"
        )),
    }
}

/// Build a lineup from `strong`, `weak`, or a path to a lineup JSON file.
///
/// Built-in squads are slotted into `formation` (Diamond when unset). File
/// lineups keep the formation they declare.
pub fn resolve_lineup(
    source: &str,
    team_id: &str,
    formation: Option<FormationType>,
) -> Result<GameLineup> {
    let shape = formation.unwrap_or(DEFAULT_FORMATION);
    match source {
        "strong" => Ok(lineup_for(team_id, shape, &strong_team_players())),
        "weak" => Ok(lineup_for(team_id, shape, &weak_team_players())),
        path => {
            let lineup = load_lineup_file(Path::new(path))?;
            if let Some(requested) = formation
                && requested != lineup.team.formation
            {
                warn!(
                    "{path} declares {}; ignoring requested {requested}",
                    lineup.team.formation
                );
            }
            Ok(lineup)
        }
    }
}

fn load_lineup_file(path: &Path) -> Result<GameLineup> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse lineup from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_formation_spellings() {
        assert_eq!(parse_formation("pyramid"), Ok(FormationType::Pyramid));
        assert_eq!(parse_formation("The Diamond"), Ok(FormationType::Diamond));
        assert_eq!(parse_formation("the-y"), Ok(FormationType::Y));
        assert_eq!(parse_formation(" BOX "), Ok(FormationType::Box));
        assert!(parse_formation("4-4-2").is_err());
    }

    #[test]
    fn builtin_squads_take_requested_shape() {
        let lineup = resolve_lineup("strong", "home", Some(FormationType::Y)).unwrap();
        assert_eq!(lineup.team.formation, FormationType::Y);
        assert_eq!(lineup.team.id, "home");
        assert_eq!(lineup.players.len(), 5);

        let default = resolve_lineup("weak", "away", None).unwrap();
        assert_eq!(default.team.formation, FormationType::Diamond);
    }

    #[test]
    fn file_lineups_round_trip() {
        let lineup = resolve_lineup("weak", "file-side", Some(FormationType::Box)).unwrap();
        let path = std::env::temp_dir().join(format!(
            "oink-lineup-{}.json",
            std::process::id()
        ));
        fs::write(&path, serde_json::to_string(&lineup).unwrap()).unwrap();
        let loaded = resolve_lineup(path.to_str().unwrap(), "ignored", Some(FormationType::Y))
            .unwrap();
        assert_eq!(loaded, lineup);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = resolve_lineup("/no/such/lineup.json", "home", None).unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/lineup.json"));
    }
}
