use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

use crate::config::Config;
use crate::metrics::{self, DataPoint};
use crate::relativity::special::{DerivedQuantities, PhysicalParams, VelocityFraction};

/// Velocity is stepped in hundredths of c.
const MAX_HUNDREDTHS: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Throttle {
    hundredths: u32,
}

impl Throttle {
    pub fn faster(&mut self) {
        self.hundredths = (self.hundredths + 1).min(MAX_HUNDREDTHS);
    }

    pub fn slower(&mut self) {
        self.hundredths = self.hundredths.saturating_sub(1);
    }

    pub fn velocity(self) -> anyhow::Result<VelocityFraction> {
        Ok(VelocityFraction::new(f64::from(self.hundredths) / 100.0)?)
    }
}

fn panel_lines(
    derived: &DerivedQuantities,
    proper_time: f64,
    proper_length: f64,
) -> [String; 5] {
    [
        format!("Velocity: {}   (←/→ to change, q to quit)", derived.velocity),
        format!("Lorentz factor (γ): {:.4}", derived.gamma),
        format!(
            "Proper time: {:.1} years | Dilated time: {:.2} years",
            proper_time,
            proper_time * derived.time_dilation_factor
        ),
        format!(
            "Proper length: {:.1} m | Contracted length: {:.2} m",
            proper_length,
            proper_length * derived.length_contraction_factor
        ),
        format!(
            "Kinetic energy ({} kg): {:.3e} J",
            derived.rest_mass_kg, derived.kinetic_energy
        ),
    ]
}

pub fn start(config: &Config) -> anyhow::Result<()> {
    let params = config.physical_params()?;
    let proper_time = config.scenario.proper_time_years;
    let proper_length = config.scenario.proper_length_m;

    // Setup terminal
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    crossterm::terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    tracing::debug!("tui started");

    let result = run_loop(&mut terminal, &params, proper_time, proper_length);

    crossterm::terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let log = result?;
    if log.is_empty() {
        tracing::info!("no velocity changes recorded, skipping export");
        return Ok(());
    }

    let csv_path = config.output.realtime_csv_path();
    metrics::export_csv(&log, &csv_path)?;
    println!("✅ Data exported to {}", csv_path.display());

    let plot_path = config.output.plot_path();
    metrics::plot_results(&log, &plot_path)?;
    println!("✅ Plot saved to {}", plot_path.display());

    Ok(())
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    params: &PhysicalParams,
    proper_time: f64,
    proper_length: f64,
) -> anyhow::Result<Vec<DataPoint>> {
    let mut throttle = Throttle::default();
    let mut log: Vec<DataPoint> = Vec::new();

    loop {
        let derived = DerivedQuantities::new(throttle.velocity()?, params);
        let lines = panel_lines(&derived, proper_time, proper_length);

        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(2)
                .constraints([Constraint::Length(3); 5])
                .split(f.area());

            for (i, line) in lines.into_iter().enumerate() {
                let block = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
                f.render_widget(block, chunks[i]);
            }
        })?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Right => throttle.faster(),
            KeyCode::Left => throttle.slower(),
            KeyCode::Char('q') | KeyCode::Esc => return Ok(log),
            _ => continue,
        }

        let velocity = throttle.velocity()?;
        tracing::trace!(%velocity, "velocity changed");
        log.push(metrics::snapshot(velocity, proper_time, proper_length));
    }
}
