//! Cumulative-activity line chart layout.
//!
//! Turns the per-day cumulative series into pixel geometry: a polyline over
//! a calendar x-axis and a linear y-axis starting at zero. No drawing
//! happens here; the SVG renderer consumes the layout as-is.

use reel_core::error::{ReelError, Result};
use reel_core::formatting::{format_count, format_date, format_month};
use reel_data::aggregator::CumulativeDailyCount;

use crate::scale::{CalendarScale, LinearScale};

/// Below this many days the x-axis labels full dates instead of months.
const MONTH_LABEL_THRESHOLD_DAYS: i64 = 60;

/// Pixel spacing targets for tick counts, one tick per this many pixels.
const X_TICK_SPACING: f64 = 80.0;
const Y_TICK_SPACING: f64 = 40.0;

// ── Options ───────────────────────────────────────────────────────────────────

/// Geometry inputs for [`LineChartLayout::build`].
#[derive(Debug, Clone)]
pub struct LineChartOptions {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    /// Label shown along the y-axis.
    pub y_label: String,
    pub stroke_width: f64,
}

impl Default for LineChartOptions {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 400.0,
            margin_top: 30.0,
            margin_right: 30.0,
            margin_bottom: 30.0,
            margin_left: 70.0,
            y_label: "Nombre de message cumulé".to_string(),
            stroke_width: 4.0,
        }
    }
}

impl LineChartOptions {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// One labelled axis tick at a pixel position.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Drawable geometry of the line chart.
#[derive(Debug, Clone)]
pub struct LineChartLayout {
    pub width: f64,
    pub height: f64,
    /// Polyline vertices in series order.
    pub points: Vec<(f64, f64)>,
    /// Bottom-axis ticks (x positions).
    pub x_ticks: Vec<Tick>,
    /// Left-axis ticks (y positions), with grid lines across the plot.
    pub y_ticks: Vec<Tick>,
    pub y_label: String,
    pub stroke_width: f64,
    /// Inner plot rectangle: (left, top, width, height).
    pub plot_area: (f64, f64, f64, f64),
}

impl LineChartLayout {
    /// Build the layout for a cumulative series.
    ///
    /// The x domain is the min/max day of the series (calendar extent, even
    /// when the series itself is in encounter order); the y domain is
    /// `0..max`. An empty series has no computable domain and fails with
    /// [`ReelError::InvalidDomain`].
    pub fn build(series: &[CumulativeDailyCount], opts: &LineChartOptions) -> Result<Self> {
        let first = series.first().ok_or_else(|| {
            ReelError::InvalidDomain("date extent of an empty series".to_string())
        })?;

        let mut day_min = first.day;
        let mut day_max = first.day;
        let mut y_max = 0u64;
        for entry in series {
            day_min = day_min.min(entry.day);
            day_max = day_max.max(entry.day);
            y_max = y_max.max(entry.cumulative_count);
        }
        if y_max == 0 {
            return Err(ReelError::InvalidDomain(
                "y maximum of the cumulative series is zero".to_string(),
            ));
        }

        let x_range = (opts.margin_left, opts.width - opts.margin_right);
        let y_range = (opts.height - opts.margin_bottom, opts.margin_top);
        let x_scale = CalendarScale::new((day_min, day_max), x_range);
        let y_scale = LinearScale::new((0.0, y_max as f64), y_range);

        let points = series
            .iter()
            .map(|entry| (x_scale.map(entry.day), y_scale.map(entry.cumulative_count as f64)))
            .collect();

        let x_tick_count = ((x_range.1 - x_range.0) / X_TICK_SPACING).max(1.0) as usize;
        let label_months = x_scale.span_days() > MONTH_LABEL_THRESHOLD_DAYS;
        let x_ticks = x_scale
            .ticks(x_tick_count)
            .into_iter()
            .map(|day| Tick {
                position: x_scale.map(day),
                label: if label_months {
                    format_month(day)
                } else {
                    format_date(day)
                },
            })
            .collect();

        // Never ask for more ticks than integer values in the domain, or the
        // 1/2/5 ladder goes fractional and the count labels all truncate.
        let y_tick_count =
            (((y_range.0 - y_range.1) / Y_TICK_SPACING).max(1.0) as usize).min(y_max as usize);
        let y_ticks = y_scale
            .ticks(y_tick_count)
            .into_iter()
            .map(|value| Tick {
                position: y_scale.map(value),
                label: format_count(value as u64),
            })
            .collect();

        Ok(Self {
            width: opts.width,
            height: opts.height,
            points,
            x_ticks,
            y_ticks,
            y_label: opts.y_label.clone(),
            stroke_width: opts.stroke_width,
            plot_area: (
                opts.margin_left,
                opts.margin_top,
                opts.width - opts.margin_left - opts.margin_right,
                opts.height - opts.margin_top - opts.margin_bottom,
            ),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(entries: &[(i32, u32, u32, u64)]) -> Vec<CumulativeDailyCount> {
        entries
            .iter()
            .map(|&(y, m, d, total)| CumulativeDailyCount {
                day: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                cumulative_count: total,
            })
            .collect()
    }

    #[test]
    fn test_build_basic_geometry() {
        let data = series(&[(2020, 1, 1, 2), (2020, 1, 11, 10)]);
        let layout =
            LineChartLayout::build(&data, &LineChartOptions::sized(1200.0, 500.0)).unwrap();

        assert_eq!(layout.points.len(), 2);
        // First day sits on the left edge of the plot, last on the right.
        assert_eq!(layout.points[0].0, 70.0);
        assert_eq!(layout.points[1].0, 1170.0);
        // y max touches the top margin, lower totals sit below it.
        assert_eq!(layout.points[1].1, 30.0);
        assert!(layout.points[0].1 > layout.points[1].1);
    }

    #[test]
    fn test_build_empty_series_is_invalid_domain() {
        let err = LineChartLayout::build(&[], &LineChartOptions::default()).unwrap_err();
        assert!(matches!(err, ReelError::InvalidDomain(_)));
    }

    #[test]
    fn test_build_single_point() {
        let data = series(&[(2020, 1, 1, 1)]);
        let layout = LineChartLayout::build(&data, &LineChartOptions::default()).unwrap();

        assert_eq!(layout.points.len(), 1);
        // Degenerate date extent centres the point in the plot.
        let (left, _, width, _) = layout.plot_area;
        assert!((layout.points[0].0 - (left + width / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_x_labels_switch_to_months_on_long_spans() {
        let short = series(&[(2020, 1, 1, 1), (2020, 1, 20, 5)]);
        let layout = LineChartLayout::build(&short, &LineChartOptions::default()).unwrap();
        assert!(layout.x_ticks[0].label.contains('/'));

        let long = series(&[(2020, 1, 1, 1), (2021, 6, 1, 500)]);
        let layout = LineChartLayout::build(&long, &LineChartOptions::default()).unwrap();
        assert!(layout.x_ticks[0].label.contains("2020"));
        assert!(!layout.x_ticks[0].label.contains('/'));
    }

    #[test]
    fn test_y_ticks_labelled_with_counts() {
        let data = series(&[(2020, 1, 1, 100), (2020, 3, 1, 12_000)]);
        let layout = LineChartLayout::build(&data, &LineChartOptions::sized(1200.0, 500.0)).unwrap();

        assert!(!layout.y_ticks.is_empty());
        let last = layout.y_ticks.last().unwrap();
        assert_eq!(last.label, "12\u{202F}000");
    }

    #[test]
    fn test_y_tick_labels_stay_integral_for_small_totals() {
        // A tiny conversation must not produce fractional tick steps whose
        // labels all truncate to "0".
        let data = series(&[(2020, 1, 1, 1), (2020, 1, 2, 2)]);
        let layout =
            LineChartLayout::build(&data, &LineChartOptions::sized(1200.0, 500.0)).unwrap();

        let labels: Vec<&str> = layout.y_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_points_follow_series_order_not_calendar_order() {
        // Encounter-ordered series stays in its order; x positions may go
        // backwards and the polyline is drawn that way on purpose.
        let data = series(&[(2020, 1, 5, 3), (2020, 1, 1, 4)]);
        let layout = LineChartLayout::build(&data, &LineChartOptions::default()).unwrap();

        assert!(layout.points[0].0 > layout.points[1].0);
    }
}
