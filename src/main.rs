use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use dialoguer::Input;

use relcalc::config::Config;
use relcalc::relativity::special::{VelocityFraction, add_velocities, calculate};
use relcalc::{logging, metrics, tui};

/// Relativistic effects calculator
#[derive(Parser)]
#[command(
    name = "relcalc",
    about = "Lorentz factor, time dilation, length contraction and energy for a given velocity"
)]
struct Cli {
    /// Config file (defaults to ./relcalc.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the relativistic effects for one velocity
    Calc {
        /// Velocity as a fraction of c, prompted for when omitted
        #[arg(allow_negative_numbers = true)]
        velocity: Option<f64>,
        /// Rest mass in kg, overriding the config
        #[arg(long)]
        mass: Option<f64>,
    },
    /// Add two collinear velocities relativistically
    Add {
        #[arg(allow_negative_numbers = true)]
        u: f64,
        #[arg(allow_negative_numbers = true)]
        w: f64,
    },
    /// Sweep velocities from 0 towards c and export CSV and plot
    Metrics {
        #[arg(long)]
        steps: Option<u32>,
        #[arg(long)]
        no_plot: bool,
    },
    /// Run interactive TUI simulation
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Calc { velocity, mass }) => {
            if let Some(mass) = mass {
                config.physics.rest_mass_kg = mass;
            }
            run_calc(&config, velocity)?
        }
        Some(Commands::Add { u, w }) => run_add(u, w)?,
        Some(Commands::Metrics { steps, no_plot }) => {
            if let Some(steps) = steps {
                config.sweep.steps = steps;
            }
            config.validate()?;
            run_metrics(&config, !no_plot)?
        }
        Some(Commands::Tui) => tui::start(&config)?,
        None => tui::start(&config)?, // default
    }

    Ok(())
}

fn run_calc(config: &Config, velocity: Option<f64>) -> Result<()> {
    let params = config.physical_params()?;
    let v = match velocity {
        Some(v) => v,
        None => Input::<f64>::new()
            .with_prompt("Enter velocity as fraction of c (0-0.99)")
            .interact_text()
            .context("Failed to read velocity")?,
    };

    let derived = calculate(v, &params).context("Velocity rejected")?;
    tracing::debug!(v, gamma = derived.gamma, "calculated");
    println!("{derived}");
    Ok(())
}

fn run_add(u: f64, w: f64) -> Result<()> {
    let u = VelocityFraction::new(u).context("First velocity rejected")?;
    let w = VelocityFraction::new(w).context("Second velocity rejected")?;

    let classical = u.get() + w.get();
    let relativistic = add_velocities(u, w);

    let verdict = if classical >= 1.0 { " (impossible!)" } else { "" };
    println!("Classical: {u} + {w} = {classical:.3}c{verdict}");
    println!("Relativistic: {u} ⊕ {w} = {:.3}c", relativistic.get());
    Ok(())
}

fn run_metrics(config: &Config, plot: bool) -> Result<()> {
    let log = metrics::sweep(
        config.sweep.steps,
        config.scenario.proper_time_years,
        config.scenario.proper_length_m,
    )?;

    let csv_path = config.output.metrics_csv_path();
    metrics::export_csv(&log, &csv_path)?;
    println!("✅ Metrics written to {}", csv_path.display());

    if plot {
        let plot_path = config.output.plot_path();
        metrics::plot_results(&log, &plot_path)?;
        println!("✅ Plot saved to {}", plot_path.display());
    }
    Ok(())
}
