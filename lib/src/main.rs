//! Extrusion order CLI - apply a custom role order to planned layers
//!
//! Usage:
//!   extrusion-order order <layers.json> -c <order.json> -o <ordered.json>
//!   extrusion-order order <layers.json> --roles "Skirt,External perimeter" --preserve
//!   extrusion-order check <order.json>
//!   extrusion-order roles

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use extrusion_order::{
    custom_extrusion_roles_from_config, order_layers, Error, ExtrusionRole, LayerFile, PrintConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, LevelFilter};
use std::fs;
use std::path::PathBuf;

/// Reorder planned extrusions by a user-defined role priority
#[derive(Parser, Debug)]
#[command(name = "extrusion-order")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a custom role order to a layer file
    Order {
        /// Input layer file (JSON)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Order configuration file (JSON)
        #[arg(short, long, value_name = "CONFIG")]
        config: Option<PathBuf>,

        /// Output file (default: print to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Comma-separated role names, overrides the config file
        #[arg(long, value_name = "ROLES")]
        roles: Option<String>,

        /// Keep the custom order as final and skip the chaining pass
        #[arg(long)]
        preserve: bool,

        /// Number of threads to use (0 = auto)
        #[arg(short = 'j', long, default_value = "0")]
        threads: usize,
    },

    /// Validate an order configuration and print the effective role order
    Check {
        /// Order configuration file (JSON)
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },

    /// List recognized role names
    Roles,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.debug {
        LevelFilter::Debug
    } else if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Order {
            input,
            config,
            output,
            roles,
            preserve,
            threads,
        } => cmd_order(input, config, output, roles, preserve, threads),
        Commands::Check { config } => cmd_check(config),
        Commands::Roles => cmd_roles(),
    }
}

fn cmd_order(
    input: PathBuf,
    config_file: Option<PathBuf>,
    output: Option<PathBuf>,
    roles: Option<String>,
    preserve: bool,
    threads: usize,
) -> Result<()> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to initialize thread pool")?;
    }

    let mut config = match &config_file {
        Some(path) => {
            info!("Loading order config from: {}", path.display());
            PrintConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => PrintConfig::default(),
    };

    if let Some(list) = roles {
        config.custom_extrusion_role_order =
            Some(list.split(',').map(|s| s.trim().to_string()).collect());
    }
    if preserve {
        config.preserve_custom_order = true;
    }

    // The ordering pass drops bad names silently; tell the user here.
    if let Err(msg) = config.validate() {
        warn!("{}", msg);
    }
    info!("Using {}", config);

    let progress = ProgressBar::new(100);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );

    progress.set_message("Loading layers...");
    progress.set_position(10);

    let mut file = LayerFile::from_json_file(&input)
        .with_context(|| format!("Failed to load layer file {}", input.display()))?;
    info!(
        "Loaded {} layers, {} entities",
        file.layers.len(),
        file.entity_count()
    );

    progress.set_message("Ordering...");
    progress.set_position(40);

    let mut collections = file.to_collections();
    order_layers(&config, &mut collections);
    file.update_from_collections(&collections);

    progress.set_message("Writing output...");
    progress.set_position(90);

    let json = file.to_json().context("Failed to serialize layers")?;
    match &output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => println!("{}", json),
    }

    progress.finish_with_message("Done");

    if let Some(path) = output {
        info!("Ordered layers written to: {}", path.display());
    }
    Ok(())
}

fn cmd_check(config_file: PathBuf) -> Result<()> {
    let config = PrintConfig::from_json_file(&config_file)
        .with_context(|| format!("Failed to load config {}", config_file.display()))?;

    let effective = custom_extrusion_roles_from_config(&config);
    if !config.has_custom_extrusion_role_order() {
        println!("No custom_extrusion_role_order set; planner order is kept.");
    } else {
        println!("Effective role order:");
        for (rank, role) in effective.iter().enumerate() {
            println!("  {:>2}. {}", rank + 1, role);
        }
        let chaining = match (effective.is_empty(), config.preserve_custom_order) {
            (false, true) => "disabled",
            (true, true) => "left as planned",
            (_, false) => "enabled",
        };
        println!("Chaining pass: {}", chaining);
    }

    config.validate().map_err(Error::Config)?;
    println!("Configuration OK");
    Ok(())
}

fn cmd_roles() -> Result<()> {
    println!("Recognized extrusion roles:");
    for role in ExtrusionRole::CONCRETE {
        println!("  {:<28} ({})", role.name(), role.feature_name());
    }
    Ok(())
}
