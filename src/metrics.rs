use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use plotters::prelude::*;
use serde::Serialize;

use crate::relativity::special::{
    VelocityFraction, length_contraction, lorentz_factor, time_dilation,
};

/// Upper bound on `sweep` steps.
pub const MAX_SWEEP_STEPS: u32 = 1_000_000;

const CSV_HEADER: [&str; 6] = [
    "velocity_fraction",
    "gamma",
    "proper_time",
    "dilated_time",
    "proper_length",
    "contracted_length",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DataPoint {
    pub velocity_fraction: f64,
    pub gamma: f64,
    pub proper_time: f64,
    pub dilated_time: f64,
    pub proper_length: f64,
    pub contracted_length: f64,
}

pub fn snapshot(velocity: VelocityFraction, proper_time: f64, proper_length: f64) -> DataPoint {
    DataPoint {
        velocity_fraction: velocity.get(),
        gamma: lorentz_factor(velocity),
        proper_time,
        dilated_time: time_dilation(proper_time, velocity),
        proper_length,
        contracted_length: length_contraction(proper_length, velocity),
    }
}

/// Samples v = i / steps for i in `0..steps`, so every point stays below c.
pub fn sweep(steps: u32, proper_time: f64, proper_length: f64) -> Result<Vec<DataPoint>> {
    if steps == 0 {
        bail!("sweep needs at least one step");
    }
    if steps > MAX_SWEEP_STEPS {
        bail!("sweep is limited to {MAX_SWEEP_STEPS} steps, got {steps}");
    }

    let mut points = Vec::with_capacity(steps as usize);
    for i in 0..steps {
        let velocity = VelocityFraction::new(f64::from(i) / f64::from(steps))?;
        points.push(snapshot(velocity, proper_time, proper_length));
    }
    tracing::debug!(steps, "velocity sweep computed");
    Ok(points)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

pub fn export_csv(log: &[DataPoint], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    for dp in log {
        writer.serialize(dp)?;
    }
    writer.flush()?;

    tracing::info!(rows = log.len(), path = %path.display(), "metrics exported");
    Ok(())
}

pub fn plot_results(log: &[DataPoint], path: &Path) -> Result<()> {
    if log.is_empty() {
        bail!("nothing to plot");
    }
    ensure_parent(path)?;

    let y_max = log
        .iter()
        .flat_map(|d| [d.gamma, d.dilated_time, d.contracted_length])
        .fold(1.0, f64::max)
        .ceil();

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Relativity Effects", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..1f64, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Velocity (fraction of c)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            log.iter().map(|d| (d.velocity_fraction, d.dilated_time)),
            &BLUE,
        ))?
        .label("Time Dilation")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            log.iter().map(|d| (d.velocity_fraction, d.contracted_length)),
            &RED,
        ))?
        .label("Length Contraction")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], RED));

    chart
        .draw_series(LineSeries::new(
            log.iter().map(|d| (d.velocity_fraction, d.gamma)),
            &GREEN,
        ))?
        .label("Lorentz Factor γ")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], GREEN));

    chart.configure_series_labels().border_style(BLACK).draw()?;
    root.present()?;

    tracing::info!(points = log.len(), path = %path.display(), "plot saved");
    Ok(())
}
