// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Thalassa CLI entrypoint.
//!
//! Loads a rows file (JSON array or delimited text), applies an optional
//! selection, and prints the derived snapshot as JSON — the same object the
//! rendering collaborator consumes.

use std::error::Error;

use thalassa::geo::StaticLocations;
use thalassa::model::fixtures::{demo_dataset, demo_locations};
use thalassa::model::{FlowMode, LocationCode, SourceTargetOperator};
use thalassa::store::{FlowStore, Loader};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <rows-file> [--locations <file>] [--flow-mode inflow|outflow|self] [--top-n <n>] [--or] [--focus-source <code>] [--focus-target <code>]\n  {program} --demo [selection flags]\n\nLoads flow rows (JSON array of objects, or delimited text with a header),\nderives the filtered/aggregated snapshot and prints it as JSON.\n\n--locations points at a JSON location table (code/name/longitude/latitude;\nthe country-capitals column names are also accepted).\n--or combines the source and target selections with OR instead of AND.\n--focus-source/--focus-target narrow the view to one location's flows.\n--demo uses a built-in demo table and cannot be combined with a rows file."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    rows_file: Option<String>,
    locations_file: Option<String>,
    flow_mode: Option<FlowMode>,
    top_n: Option<usize>,
    use_or: bool,
    focus_source: Option<String>,
    focus_target: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--locations" => {
                let value = args.next().ok_or(())?;
                if options.locations_file.replace(value).is_some() {
                    return Err(());
                }
            }
            "--flow-mode" => {
                let value = args.next().ok_or(())?;
                let mode = value.parse::<FlowMode>().map_err(|_| ())?;
                if options.flow_mode.replace(mode).is_some() {
                    return Err(());
                }
            }
            "--top-n" => {
                let value = args.next().ok_or(())?;
                let top_n = value.parse::<usize>().map_err(|_| ())?;
                if top_n == 0 || options.top_n.replace(top_n).is_some() {
                    return Err(());
                }
            }
            "--or" => {
                if options.use_or {
                    return Err(());
                }
                options.use_or = true;
            }
            "--focus-source" => {
                let value = args.next().ok_or(())?;
                if options.focus_source.replace(value).is_some() {
                    return Err(());
                }
            }
            "--focus-target" => {
                let value = args.next().ok_or(())?;
                if options.focus_target.replace(value).is_some() {
                    return Err(());
                }
            }
            other => {
                if other.starts_with('-') || options.rows_file.is_some() {
                    return Err(());
                }
                options.rows_file = Some(other.to_owned());
            }
        }
    }

    if options.demo == options.rows_file.is_some() {
        // Exactly one data source: the demo table or a rows file.
        return Err(());
    }
    Ok(options)
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "thalassa".to_owned());

    let Ok(options) = parse_options(args) else {
        print_usage(&program);
        std::process::exit(2);
    };

    let locations = if let Some(path) = &options.locations_file {
        StaticLocations::from_json_str(&std::fs::read_to_string(path)?)?
    } else if options.demo {
        demo_locations()
    } else {
        StaticLocations::default()
    };

    let dataset = if options.demo {
        demo_dataset()
    } else {
        let rows_file = options.rows_file.as_deref().expect("validated above");
        let loader = Loader::new();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime
            .block_on(loader.load_path(rows_file, &locations))?
            .expect("a single load is never superseded")
    };

    let mut store = FlowStore::new();
    store.commit_dataset(dataset);

    if let Some(code) = &options.focus_source {
        store.focus_source(LocationCode::new(code)?);
    }
    if let Some(code) = &options.focus_target {
        store.focus_target(LocationCode::new(code)?);
    }
    if let Some(mode) = options.flow_mode {
        store.update_selection(|selection| selection.set_flow_mode(mode));
    }
    if options.use_or {
        store.update_selection(|selection| {
            selection.set_operator(SourceTargetOperator::Or);
        });
    }
    if let Some(top_n) = options.top_n {
        store.set_top_n(top_n);
    }

    let snapshot = store.snapshot();
    println!("{}", serde_json::to_string_pretty(&*snapshot)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};
    use thalassa::model::FlowMode;

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn a_rows_file_or_demo_is_required_but_not_both() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["rows.csv", "--demo"]).is_err());
        assert!(parse(&["rows.csv"]).is_ok());
        assert!(parse(&["--demo"]).is_ok());
    }

    #[test]
    fn selection_flags_parse_into_options() {
        let options = parse(&[
            "--demo",
            "--flow-mode",
            "inflow",
            "--top-n",
            "5",
            "--or",
            "--focus-target",
            "NL",
        ])
        .expect("options");
        assert_eq!(options.flow_mode, Some(FlowMode::Inflow));
        assert_eq!(options.top_n, Some(5));
        assert!(options.use_or);
        assert_eq!(options.focus_target.as_deref(), Some("NL"));
    }

    #[test]
    fn invalid_values_and_duplicates_are_rejected() {
        assert!(parse(&["--demo", "--flow-mode", "sideways"]).is_err());
        assert!(parse(&["--demo", "--top-n", "0"]).is_err());
        assert!(parse(&["--demo", "--top-n"]).is_err());
        assert!(parse(&["--demo", "--or", "--or"]).is_err());
        assert!(parse(&["a.csv", "b.csv"]).is_err());
        assert!(parse(&["--demo", "--unknown-flag"]).is_err());
    }
}
