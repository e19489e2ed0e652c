//! SVG charts of a season report.
//!
//! Two figures are produced: a 2×2 season breakdown and a scenario
//! comparison. Drawing is generic over the plotters backend; files are
//! written with the SVG backend.

use std::path::{Path, PathBuf};

use plotters::coord::ranged1d::SegmentValue;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use tracing::info;

use crate::config::ChartSettings;
use crate::emissions::Category;
use crate::error::{Error, Result};
use crate::report::{tonnes, SeasonReport};

/// File name of the season breakdown figure.
pub const BREAKDOWN_FILE: &str = "season_breakdown.svg";

/// File name of the scenario figure.
pub const SCENARIOS_FILE: &str = "scenarios.svg";

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const RACE_BAR: RGBColor = RGBColor(139, 0, 0);
const CUMULATIVE_LINE: RGBColor = RGBColor(0, 128, 0);
const EQUIVALENT_BAR: RGBColor = RGBColor(255, 165, 0);
const CURRENT_BAR: RGBColor = RGBColor(214, 39, 40);
const REDUCTION_BAR: RGBColor = RGBColor(44, 160, 44);

const CATEGORY_COLORS: [RGBColor; 5] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
];

/// Render both figures into `out_dir`, creating it if needed.
///
/// Returns the paths written, breakdown first.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a chart fails to render.
pub fn render_all(
    report: &SeasonReport,
    out_dir: &Path,
    settings: &ChartSettings,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).map_err(|source| Error::DirectoryCreate {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let breakdown = out_dir.join(BREAKDOWN_FILE);
    render_season_breakdown(
        report,
        &breakdown,
        (settings.breakdown_width, settings.breakdown_height),
    )?;

    let scenarios = out_dir.join(SCENARIOS_FILE);
    render_scenarios(
        report,
        &scenarios,
        (settings.scenario_width, settings.scenario_height),
    )?;

    Ok(vec![breakdown, scenarios])
}

/// Render the 2×2 season breakdown figure.
///
/// # Errors
///
/// Returns [`Error::ChartRender`] if drawing or writing the file fails.
pub fn render_season_breakdown(report: &SeasonReport, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw_season_breakdown(&root, report)
        .and_then(|()| root.present().map_err(Into::into))
        .map_err(|e| Error::chart(path, e.to_string()))?;
    info!(path = %path.display(), "Wrote season breakdown chart");
    Ok(())
}

/// Render the scenario comparison figure.
///
/// # Errors
///
/// Returns [`Error::ChartRender`] if drawing or writing the file fails.
pub fn render_scenarios(report: &SeasonReport, path: &Path, size: (u32, u32)) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    draw_scenarios(&root, report)
        .and_then(|()| root.present().map_err(Into::into))
        .map_err(|e| Error::chart(path, e.to_string()))?;
    info!(path = %path.display(), "Wrote scenario chart");
    Ok(())
}

fn draw_season_breakdown<DB>(root: &DrawingArea<DB, Shift>, report: &SeasonReport) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let title = format!(
        "{} Season Carbon Footprint Analysis | Total: {:.0} tonnes CO2",
        report.season_year,
        tonnes(report.total_kg)
    );
    let body = root.titled(&title, ("sans-serif", 28))?;
    let panels = body.split_evenly((2, 2));

    draw_race_bars(&panels[0], report)?;
    draw_category_pie(&panels[1], report)?;
    draw_cumulative(&panels[2], report)?;
    draw_equivalents(&panels[3], report)?;
    Ok(())
}

fn draw_race_bars<DB>(area: &DrawingArea<DB, Shift>, report: &SeasonReport) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let races = report.season.races();
    let names: Vec<&str> = races.iter().map(|r| r.race.as_str()).collect();
    let values: Vec<f64> = races.iter().map(|r| tonnes(r.total)).collect();
    let label = |v: &SegmentValue<usize>| segment_label(&names, v);

    let mut chart = ChartBuilder::on(area)
        .caption("Emissions by Race", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(110)
        .y_label_area_size(70)
        .build_cartesian_2d((0..races.len()).into_segmented(), 0.0..axis_max(&values))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(races.len())
        .x_label_formatter(&label)
        .x_label_style(
            ("sans-serif", 11)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_desc("Tonnes CO2")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RACE_BAR.filled())
            .margin(2)
            .data(values.iter().copied().enumerate()),
    )?;
    Ok(())
}

fn draw_category_pie<DB>(area: &DrawingArea<DB, Shift>, report: &SeasonReport) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let area = area.titled("Emissions by Category", ("sans-serif", 20))?;
    let (width, height) = area.dim_in_pixel();
    let center = (
        i32::try_from(width / 2).unwrap_or_default(),
        i32::try_from(height / 2).unwrap_or_default(),
    );
    let radius = f64::from(width.min(height)) * 0.32;

    let sizes: Vec<f64> = report
        .categories
        .iter()
        .map(|c| tonnes(c.emissions_kg))
        .collect();
    let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();

    let colors = CATEGORY_COLORS;
    let mut pie = Pie::new(&center, &radius, &sizes, &colors, labels.as_slice());
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 13).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 12).into_font().color(&WHITE));
    area.draw(&pie)?;
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn draw_cumulative<DB>(area: &DrawingArea<DB, Shift>, report: &SeasonReport) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let points: Vec<(f64, f64)> = report
        .season
        .cumulative_totals()
        .into_iter()
        .enumerate()
        .map(|(i, kg)| ((i + 1) as f64, tonnes(kg)))
        .collect();
    let values: Vec<f64> = points.iter().map(|&(_, y)| y).collect();
    let x_max = points.len().max(1) as f64 + 0.5;

    let mut chart = ChartBuilder::on(area)
        .caption("Race-by-Race Cumulative", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0.5..x_max, 0.0..axis_max(&values))?;

    chart
        .configure_mesh()
        .x_desc("Race Number")
        .y_desc("Cumulative Tonnes CO2")
        .x_label_formatter(&|x| format!("{x:.0}"))
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        CUMULATIVE_LINE.stroke_width(3),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|&p| Circle::new(p, 4, CUMULATIVE_LINE.filled())),
    )?;
    Ok(())
}

fn draw_equivalents<DB>(area: &DrawingArea<DB, Shift>, report: &SeasonReport) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let names = [
        "Homes Powered (Annual)",
        "Car Driving (thousand km)",
        "Transatlantic Flights",
    ];
    let values = [
        report.comparisons.homes_powered_annually,
        report.comparisons.car_driving_km / 1_000.0,
        report.comparisons.transatlantic_flights,
    ];
    let label = |v: &SegmentValue<usize>| segment_label(&names, v);

    let mut chart = ChartBuilder::on(area)
        .caption("Comparison with Daily Life", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d((0..names.len()).into_segmented(), 0.0..axis_max(&values))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(names.len())
        .x_label_formatter(&label)
        .y_desc("Equivalent Units")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(EQUIVALENT_BAR.filled())
            .margin(20)
            .data(values.iter().copied().enumerate()),
    )?;
    Ok(())
}

fn draw_scenarios<DB>(root: &DrawingArea<DB, Shift>, report: &SeasonReport) -> DrawResult<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let scenarios: Vec<_> = report.scenarios.iter().collect();
    let names: Vec<&str> = scenarios.iter().map(|s| s.kind.title()).collect();
    let label = |v: &SegmentValue<usize>| segment_label(&names, v);

    let mut chart = ChartBuilder::on(root)
        .caption(
            "Sustainability Scenarios - Potential CO2 Reductions",
            ("sans-serif", 24),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..scenarios.len()).into_segmented(), 0.0..110.0)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(scenarios.len())
        .x_label_formatter(&label)
        .x_desc("Scenario")
        .y_desc("Percentage")
        .draw()?;

    // The reduction bar is drawn narrower, over the full-height baseline.
    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(CURRENT_BAR.mix(0.8).filled())
                .margin(15)
                .data((0..scenarios.len()).map(|i| (i, 100.0))),
        )?
        .label("Current Emissions")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], CURRENT_BAR.filled()));

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(REDUCTION_BAR.filled())
                .margin(45)
                .data(
                    scenarios
                        .iter()
                        .enumerate()
                        .map(|(i, s)| (i, s.percentage_reduction)),
                ),
        )?
        .label("Potential Reduction")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], REDUCTION_BAR.filled()));

    chart.draw_series(scenarios.iter().enumerate().map(|(i, s)| {
        Text::new(
            format!("{:.1}%", s.percentage_reduction),
            (SegmentValue::CenterOf(i), s.percentage_reduction + 2.0),
            ("sans-serif", 14).into_font().color(&BLACK),
        )
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

fn segment_label(names: &[&str], value: &SegmentValue<usize>) -> String {
    match value {
        SegmentValue::CenterOf(i) => names.get(*i).map(ToString::to_string).unwrap_or_default(),
        _ => String::new(),
    }
}

/// Upper bound of a value axis with some headroom.
fn axis_max(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0, f64::max);
    if max.is_finite() && max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}
