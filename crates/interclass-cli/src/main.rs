//! interclass-stats CLI: connectivity statistics between entity classes.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::Level;
use simple_logger::init_with_level;

use interclass_core::config::{StatsConfig, StatsReport};
use interclass_core::output::{export_tables, write_report, TablePaths};
use interclass_core::pipeline;

#[derive(Parser)]
#[command(
    name = "interclass-stats",
    about = "Count connections between classes of entities in a molecular network"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the pairwise class statistics and export the tables
    Run {
        /// Class definitions (JSON)
        classes: Option<PathBuf>,

        /// Interaction network (TSV)
        network: Option<PathBuf>,

        /// JSON configuration file; command line flags override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory the tables are written to
        #[arg(short, long)]
        tables_dir: Option<String>,

        /// Network label used in table names
        #[arg(short = 'n', long)]
        network_name: Option<String>,

        /// Comma-separated class scopes to keep (e.g. main,sub)
        #[arg(short, long)]
        scope: Option<String>,

        /// Count complexes as well as single proteins
        #[arg(long)]
        all_entities: bool,

        /// Regex recognising complex identifiers
        #[arg(long)]
        complex_pattern: Option<String>,

        /// Also write the full report as JSON
        #[arg(long)]
        json: Option<String>,

        /// Write tables directly into the tables directory
        #[arg(long)]
        no_timestamp_dirs: bool,

        /// Show per-phase timing breakdown
        #[arg(long)]
        verbose: bool,

        /// Suppress all output except errors
        #[arg(long)]
        quiet: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            classes,
            network,
            config,
            tables_dir,
            network_name,
            scope,
            all_entities,
            complex_pattern,
            json,
            no_timestamp_dirs,
            verbose,
            quiet,
        } => {
            let level = if quiet {
                Level::Error
            } else if verbose {
                Level::Debug
            } else {
                Level::Info
            };
            if let Err(e) = init_with_level(level) {
                eprintln!("Logger setup failed: {e}");
            }

            let mut config = match config {
                Some(path) => StatsConfig::from_json_file(&path).unwrap_or_else(|e| {
                    eprintln!("Invalid config {}: {e}", path.display());
                    std::process::exit(1);
                }),
                None => StatsConfig::default(),
            };

            if let Some(path) = classes {
                config.classes_path = path.to_string_lossy().to_string();
            }
            if let Some(path) = network {
                config.network_path = path.to_string_lossy().to_string();
            }
            if config.classes_path.is_empty() || config.network_path.is_empty() {
                eprintln!("Both a classes file and a network file are required");
                std::process::exit(2);
            }
            if let Some(dir) = tables_dir {
                config.tables_dir = dir;
            }
            if let Some(name) = network_name {
                config.network_name = name;
            }
            if let Some(scopes) = scope {
                config.class_scopes = Some(
                    scopes
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                );
            }
            if all_entities {
                config.only_proteins = false;
            }
            if let Some(pattern) = complex_pattern {
                config.complex_pattern = pattern;
            }
            if no_timestamp_dirs {
                config.timestamp_dirs = false;
            }
            config.verbose |= verbose;
            config.quiet |= quiet;

            if config.quiet {
                run_quiet(&config, json.as_deref());
            } else {
                run_with_progress(&config, json.as_deref(), config.verbose);
            }
        }
    }
}

/// Write every table, plus the JSON report when requested.
fn export(report: &StatsReport, config: &StatsConfig, json: Option<&str>) -> Vec<PathBuf> {
    let paths = TablePaths::today(config);
    let written = export_tables(report, config, &paths).unwrap_or_else(|e| {
        eprintln!("Error writing tables: {e}");
        std::process::exit(1);
    });
    if let Some(json_path) = json {
        if let Err(e) = write_report(report, json_path) {
            eprintln!("Error writing report: {e}");
            std::process::exit(1);
        }
    }
    written
}

fn run_quiet(config: &StatsConfig, json: Option<&str>) {
    match pipeline::run_from_config(config, None) {
        Ok(report) => {
            export(&report, config, json);
        }
        Err(e) => {
            eprintln!("Statistics failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run_with_progress(config: &StatsConfig, json: Option<&str>, verbose: bool) {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message("Loading inputs...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let progress: pipeline::ProgressCallback = {
        let pb = pb.clone();
        Box::new(move |_name, label| {
            pb.set_message(label.to_string());
        })
    };

    let start = Instant::now();
    let report = match pipeline::run_from_config(config, Some(progress)) {
        Ok(r) => r,
        Err(e) => {
            pb.finish_and_clear();
            eprintln!("Statistics failed: {e}");
            std::process::exit(1);
        }
    };
    pb.finish_and_clear();

    println!(
        "\n{}  Inter-class statistics: {}",
        style("✓").green().bold(),
        style(&config.network_name).bold()
    );
    for (label, key) in [
        ("Classes:", "classes"),
        ("In scope:", "in_scope_classes"),
        ("Entities:", "entities"),
        ("Interactions:", "interactions"),
        ("Class pairs:", "class_pairs"),
    ] {
        println!(
            "  {:<14} {}",
            label,
            report.stats.get(key).unwrap_or(&serde_json::json!(0))
        );
    }

    let duration = start.elapsed();
    println!(
        "  {:<14} {:.1}ms",
        "Duration:",
        duration.as_secs_f64() * 1000.0
    );

    if verbose {
        if let Some(serde_json::Value::Object(timings)) = report.metadata.get("phase_timings") {
            println!("\n  Phase Timings:");
            for (phase, secs) in timings {
                if let Some(val) = secs.as_f64() {
                    println!("    {:<14} {:.1}ms", phase, val * 1000.0);
                }
            }
        }
    }

    let written = export(&report, config, json);

    println!("\n  {}", style("Tables written:").green());
    for path in &written {
        println!("    {}", path.display());
    }
    if let Some(json_path) = json {
        println!("  {} {}", style("Report written to:").green(), json_path);
    }
}
