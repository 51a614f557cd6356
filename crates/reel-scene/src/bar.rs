//! Podium bar chart layout.
//!
//! Horizontal bars, one per ranked participant, longest on top. Value
//! labels sit inside the bar end except for bars too short to hold them,
//! which get the label just outside instead.

use reel_core::error::{ReelError, Result};
use reel_core::formatting::format_count;
use reel_data::aggregator::ParticipantDigitRank;

use crate::line::Tick;
use crate::scale::{BandScale, LinearScale};

/// Bars narrower than this flip their value label to the outside.
const SHORT_BAR_PX: f64 = 20.0;

/// Ratio of each band reserved as padding between bars.
const BAND_PADDING: f64 = 0.1;

/// One tick per this many pixels on the value axis.
const X_TICK_SPACING: f64 = 80.0;

// ── Options ───────────────────────────────────────────────────────────────────

/// Geometry inputs for [`BarChartLayout::build`].
#[derive(Debug, Clone)]
pub struct BarChartOptions {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    /// Label shown above the value axis.
    pub x_label: String,
}

impl Default for BarChartOptions {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 200.0,
            margin_top: 50.0,
            margin_right: 10.0,
            margin_bottom: 10.0,
            margin_left: 120.0,
            x_label: "Nombre de message".to_string(),
        }
    }
}

impl BarChartOptions {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// One drawable bar with its two labels.
#[derive(Debug, Clone)]
pub struct Bar {
    /// Participant name, drawn on the left axis.
    pub participant: String,
    /// Bar rectangle: (x, y, width, height).
    pub rect: (f64, f64, f64, f64),
    /// Formatted count drawn at the bar end.
    pub value_label: String,
    /// Whether the value label fits inside the bar.
    pub label_inside: bool,
}

/// Drawable geometry of the podium bar chart.
#[derive(Debug, Clone)]
pub struct BarChartLayout {
    pub width: f64,
    pub height: f64,
    /// Bars in ranking order, top to bottom.
    pub bars: Vec<Bar>,
    /// Top-axis ticks (x positions); grid lines run down the plot.
    pub x_ticks: Vec<Tick>,
    pub x_label: String,
    /// Inner plot rectangle: (left, top, width, height).
    pub plot_area: (f64, f64, f64, f64),
}

impl BarChartLayout {
    /// Build the layout for a (already sorted) participant ranking.
    ///
    /// The value domain is `0..max`; an empty ranking has no computable
    /// maximum and fails with [`ReelError::InvalidDomain`].
    pub fn build(ranking: &[ParticipantDigitRank], opts: &BarChartOptions) -> Result<Self> {
        let max = ranking
            .iter()
            .map(|entry| entry.digit_message_count)
            .max()
            .ok_or_else(|| {
                ReelError::InvalidDomain("value maximum of an empty ranking".to_string())
            })?;
        if max == 0 {
            return Err(ReelError::InvalidDomain(
                "value maximum of the ranking is zero".to_string(),
            ));
        }

        let x_range = (opts.margin_left, opts.width - opts.margin_right);
        let y_range = (opts.margin_top, opts.height - opts.margin_bottom);
        let x_scale = LinearScale::new((0.0, max as f64), x_range);
        let y_scale = BandScale::new(
            ranking.iter().map(|e| e.participant.clone()).collect(),
            y_range,
            BAND_PADDING,
        );

        let bars = ranking
            .iter()
            .map(|entry| {
                let x0 = x_scale.map(0.0);
                let x1 = x_scale.map(entry.digit_message_count as f64);
                let y = y_scale
                    .map(&entry.participant)
                    .expect("every ranked participant is a band category");
                let bar_width = x1 - x0;
                Bar {
                    participant: entry.participant.clone(),
                    rect: (x0, y, bar_width, y_scale.bandwidth()),
                    value_label: format_count(entry.digit_message_count),
                    label_inside: bar_width >= SHORT_BAR_PX,
                }
            })
            .collect();

        // Tick count capped at the integer maximum so steps stay whole and
        // the count labels survive the cast.
        let x_tick_count =
            (((x_range.1 - x_range.0) / X_TICK_SPACING).max(1.0) as usize).min(max as usize);
        let x_ticks = x_scale
            .ticks(x_tick_count)
            .into_iter()
            .map(|value| Tick {
                position: x_scale.map(value),
                label: format_count(value as u64),
            })
            .collect();

        Ok(Self {
            width: opts.width,
            height: opts.height,
            bars,
            x_ticks,
            x_label: opts.x_label.clone(),
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
