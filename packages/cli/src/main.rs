#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for exploring the crime incident dashboard.
//!
//! ```text
//! crime_dashboard --data incidents.csv options [--json]
//! crime_dashboard --data incidents.csv summary [--city Delhi] [--year 2022] [--json]
//! ```
//!
//! Running with no subcommand enters interactive mode. The dataset path
//! may also come from `CRIME_DASHBOARD_DATA`.

mod interactive;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{ArgAction, Args, Parser, Subcommand};
use crime_dashboard::{Dashboard, DashboardConfig};
use crime_dashboard_cli_utils::{IndicatifProgress, MultiProgress};
use crime_dashboard_dataset::Dataset;
use crime_dashboard_filter_models::{FilterChange, FilterDimension, FilterError};

#[derive(Parser)]
#[command(
    name = "crime_dashboard",
    about = "Filter and summarize crime incident records"
)]
struct Cli {
    /// Incident dataset (.json array or .csv)
    #[arg(long, env = "CRIME_DASHBOARD_DATA", global = true)]
    data: Option<PathBuf>,

    /// Dashboard config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug, -vvv trace); `RUST_LOG` overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable values of every filter
    Options {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print every dashboard statistic for a selection
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

/// One optional flag per filter dimension; omitted flags mean "All".
#[derive(Args, Default)]
struct FilterArgs {
    /// City
    #[arg(long)]
    city: Option<String>,
    /// Crime description
    #[arg(long)]
    crime_type: Option<String>,
    /// Year of occurrence
    #[arg(long)]
    year: Option<String>,
    /// Weapon used
    #[arg(long)]
    weapon: Option<String>,
    /// Victim gender code (M, F, X)
    #[arg(long)]
    gender: Option<String>,
    /// Victim age group (0-18, 19-35, 36-50, 51-65, 65+)
    #[arg(long)]
    age_group: Option<String>,
}

impl FilterArgs {
    fn changes(&self) -> Result<Vec<FilterChange>, FilterError> {
        [
            (FilterDimension::City, &self.city),
            (FilterDimension::CrimeType, &self.crime_type),
            (FilterDimension::Year, &self.year),
            (FilterDimension::Weapon, &self.weapon),
            (FilterDimension::Gender, &self.gender),
            (FilterDimension::AgeGroup, &self.age_group),
        ]
        .into_iter()
        .filter_map(|(dimension, value)| {
            value
                .as_deref()
                .map(|value| FilterChange::parse(dimension, value))
        })
        .collect()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let multi = crime_dashboard_cli_utils::init_logger(
        crime_dashboard_cli_utils::verbosity_level(cli.verbose),
    );

    let Some(data) = cli.data.as_deref() else {
        return Err("No dataset given: pass --data or set CRIME_DASHBOARD_DATA".into());
    };

    let config = DashboardConfig::load_or_default(cli.config.as_deref())?;
    let dataset = load_dataset(data, &multi)?;
    let mut dashboard = Dashboard::from_config(dataset, &config)?;

    let Some(command) = cli.command else {
        return interactive::run(&mut dashboard);
    };

    match command {
        Commands::Options { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(dashboard.options().as_ref())?);
            } else {
                print!("{}", render::options(dashboard.options()));
            }
        }
        Commands::Summary { filters, json } => {
            let snapshot = dashboard.set_fields(filters.changes()?);
            if json {
                println!("{}", serde_json::to_string_pretty(snapshot.as_ref())?);
            } else {
                print!("{}", render::snapshot(&snapshot));
            }
        }
    }

    Ok(())
}

fn load_dataset(
    path: &Path,
    multi: &MultiProgress,
) -> Result<Arc<Dataset>, Box<dyn std::error::Error>> {
    let progress = IndicatifProgress::records_bar(multi, "Loading incidents");
    let dataset = Dataset::load(path, progress.as_ref())?;
    if dataset.is_empty() {
        log::warn!("{} contains no incident records", path.display());
    }
    Ok(Arc::new(dataset))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;
    use crime_dashboard_filter_models::Choice;
    use crime_dashboard_incident_models::AgeGroup;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn summary_flags_become_changes() {
        let cli = Cli::try_parse_from([
            "crime_dashboard",
            "--data",
            "incidents.csv",
            "summary",
            "--city",
            "Delhi",
            "--age-group",
            "65+",
            "--json",
        ])
        .unwrap();

        let Some(Commands::Summary { filters, json }) = cli.command else {
            panic!("expected summary");
        };
        assert!(json);
        assert_eq!(
            filters.changes().unwrap(),
            vec![
                FilterChange::City(Choice::Only("Delhi".to_string())),
                FilterChange::AgeGroup(Choice::Only(AgeGroup::Senior)),
            ]
        );
    }

    #[test]
    fn verbose_flag_counts_after_subcommand() {
        let cli = Cli::try_parse_from(["crime_dashboard", "options", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Commands::Options { json: false })));
    }

    #[test]
    fn bad_year_flag_is_rejected() {
        let filters = FilterArgs {
            year: Some("soon".to_string()),
            ..FilterArgs::default()
        };
        assert!(matches!(
            filters.changes(),
            Err(FilterError::InvalidYear { .. })
        ));
    }
}
