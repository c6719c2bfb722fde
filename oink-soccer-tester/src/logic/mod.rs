pub mod lineups;
pub mod reports;
pub mod seeds;
pub mod simulation;

pub use lineups::{parse_formation, resolve_lineup};
pub use seeds::{SeedInfo, SeedSource, parse_seed_token};
pub use simulation::{
    FormationMatrix, ReplayReport, ScorerShare, SimulationSummary, replay, simulate,
    simulate_formations,
};
