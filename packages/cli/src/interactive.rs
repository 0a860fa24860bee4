//! Interactive mode: pick filters from menus and watch every tile update.

use crime_dashboard::Dashboard;
use crime_dashboard_filter_models::{ALL, FilterChange, FilterDimension};
use dialoguer::Select;

use crate::render;

/// Top-level actions in the interactive menu.
enum Action {
    ChangeFilter,
    Reset,
    ShowOptions,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[Self::ChangeFilter, Self::Reset, Self::ShowOptions, Self::Quit];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::ChangeFilter => "Change a filter",
            Self::Reset => "Reset all filters",
            Self::ShowOptions => "List filter options",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive dashboard loop until the user quits.
///
/// Prints the unfiltered summary first, then the full summary again after
/// every transition.
///
/// # Errors
///
/// Returns an error if a prompt fails (e.g. the terminal is closed).
pub fn run(dashboard: &mut Dashboard) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crime Dashboard");
    println!("{} incident records loaded", dashboard.dataset().len());
    println!();
    print!("{}", render::snapshot(&dashboard.snapshot()));

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        println!();
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::ChangeFilter => {
                let change = pick_change(dashboard)?;
                print!("{}", render::snapshot(&dashboard.set_field(change)));
            }
            Action::Reset => {
                print!("{}", render::snapshot(&dashboard.reset()));
            }
            Action::ShowOptions => {
                print!("{}", render::options(dashboard.options()));
            }
            Action::Quit => return Ok(()),
        }
    }
}

/// Prompts for a dimension, then for one of its offered values.
fn pick_change(dashboard: &Dashboard) -> Result<FilterChange, Box<dyn std::error::Error>> {
    let dimensions = FilterDimension::all();
    let selection = dashboard.selection();

    let dimension_labels: Vec<String> = dimensions
        .iter()
        .map(|dimension| format!("{dimension} ({})", selection.value_label(*dimension)))
        .collect();

    let dimension = dimensions[Select::new()
        .with_prompt("Filter")
        .items(&dimension_labels)
        .default(0)
        .interact()?];

    let values = dashboard.options().labels(dimension);
    let mut value_labels = Vec::with_capacity(values.len() + 1);
    value_labels.push(dimension.wildcard_label().to_string());
    value_labels.extend(values.iter().cloned());

    let current = selection.value_label(dimension);
    let default = values
        .iter()
        .position(|value| *value == current)
        .map_or(0, |idx| idx + 1);

    let idx = Select::new()
        .with_prompt(dimension.wildcard_label().trim_start_matches("All "))
        .items(&value_labels)
        .default(default)
        .interact()?;

    let value = if idx == 0 { ALL } else { values[idx - 1].as_str() };

    Ok(FilterChange::parse(dimension, value)?)
}
