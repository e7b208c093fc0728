//! Plot BER curves from a sweep CSV
//!
//! Usage:
//!   plot_ber <results.csv> [--out <plot.png>] [--title <text>]
//!
//! The first CSV column is the x axis (`snr_db` or `p`); every column whose
//! name starts with `ber` becomes a curve on a logarithmic y axis. BSC sweeps
//! (`p` on x) are drawn against log10(p). Zero BER points are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use harq::tracing_init::init_tracing;
use tracing::{info, warn};

const COLORS: [RGBColor; 4] = [RED, BLUE, GREEN, MAGENTA];

struct PlotConfig {
    csv_path: PathBuf,
    out_path: PathBuf,
    title: String,
}

impl PlotConfig {
    fn parse_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();

        let mut csv_path = None;
        let mut out_path = None;
        let mut title = None;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-o" | "--out" => {
                    i += 1;
                    let value = args.get(i).ok_or("Missing value for --out")?;
                    out_path = Some(PathBuf::from(value));
                }
                "-t" | "--title" => {
                    i += 1;
                    let value = args.get(i).ok_or("Missing value for --title")?;
                    title = Some(value.clone());
                }
                "-h" | "--help" => {
                    eprintln!("Usage: {} <results.csv> [--out <plot.png>] [--title <text>]", args[0]);
                    std::process::exit(0);
                }
                arg if !arg.starts_with('-') && csv_path.is_none() => {
                    csv_path = Some(PathBuf::from(arg));
                }
                arg => return Err(format!("Unexpected argument: {}", arg)),
            }
            i += 1;
        }

        let csv_path = csv_path.ok_or("Missing CSV path")?;
        let out_path = out_path.unwrap_or_else(|| default_out_path(&csv_path));
        let title = title.unwrap_or_else(|| "BER".to_string());

        Ok(PlotConfig {
            csv_path,
            out_path,
            title,
        })
    }
}

fn default_out_path(csv_path: &Path) -> PathBuf {
    let stem = csv_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ber".to_string());
    csv_path.with_file_name(format!("{}_plot.png", stem))
}

struct Curve {
    name: String,
    points: Vec<(f64, f64)>,
}

/// Returns the x axis label and one curve per `ber*` column
fn load_curves(csv: &str) -> Result<(String, Vec<Curve>), String> {
    let mut lines = csv.lines().filter(|l| !l.trim().is_empty());
    let header: Vec<&str> = lines
        .next()
        .ok_or("CSV is empty")?
        .split(',')
        .map(str::trim)
        .collect();

    let x_name = header.first().copied().ok_or("CSV header is empty")?;
    let log_x = x_name == "p";
    let ber_columns: Vec<usize> = header
        .iter()
        .enumerate()
        .filter(|(_, name)| name.starts_with("ber"))
        .map(|(i, _)| i)
        .collect();
    if ber_columns.is_empty() {
        return Err("CSV has no BER column".to_string());
    }

    let mut curves: Vec<Curve> = ber_columns
        .iter()
        .map(|&i| Curve {
            name: header[i].to_string(),
            points: Vec::new(),
        })
        .collect();

    for (row, line) in lines.enumerate() {
        let values = line
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| format!("Invalid number in data row {}", row + 1))?;
        let x = values[0];
        let x = if log_x { x.log10() } else { x };
        for (curve, &col) in curves.iter_mut().zip(&ber_columns) {
            match values.get(col) {
                Some(&ber) if ber > 0.0 && x.is_finite() => curve.points.push((x, ber)),
                Some(_) => {}
                None => return Err(format!("Data row {} is too short", row + 1)),
            }
        }
    }

    let x_label = if log_x {
        "log10(p)".to_string()
    } else {
        x_name.to_string()
    };
    Ok((x_label, curves))
}

fn bounds(curves: &[Curve]) -> Option<((f64, f64), (f64, f64))> {
    let points = curves.iter().flat_map(|c| c.points.iter());
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !x_min.is_finite() {
        return None;
    }
    if x_max <= x_min {
        x_max = x_min + 1.0;
    }
    Some(((x_min, x_max), (y_min / 2.0, (y_max * 2.0).min(1.0))))
}

fn draw(config: &PlotConfig, x_label: &str, curves: &[Curve]) -> Result<(), String> {
    let ((x_min, x_max), (y_min, y_max)) =
        bounds(curves).ok_or("No positive BER values to plot")?;

    let root = BitMapBackend::new(&config.out_path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, (y_min..y_max).log_scale())
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc("BER")
        .draw()
        .map_err(|e| e.to_string())?;

    for (curve, &color) in curves.iter().zip(COLORS.iter().cycle()) {
        if curve.points.is_empty() {
            warn!(curve = %curve.name, "no positive BER values, skipping");
            continue;
        }
        chart
            .draw_series(LineSeries::new(curve.points.iter().copied(), &color))
            .map_err(|e| e.to_string())?
            .label(curve.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart
            .draw_series(
                curve
                    .points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )
            .map_err(|e| e.to_string())?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())?;
    Ok(())
}

fn main() -> Result<(), String> {
    init_tracing();
    let config = PlotConfig::parse_args()?;

    let csv = fs::read_to_string(&config.csv_path)
        .map_err(|e| format!("Cannot read {}: {}", config.csv_path.display(), e))?;
    let (x_label, curves) = load_curves(&csv)?;

    draw(&config, &x_label, &curves)?;
    info!(out = %config.out_path.display(), curves = curves.len(), "plot written");

    Ok(())
}
