//! SVG rendition of a single composition frame.
//!
//! Everything animated arrives pre-computed in the [`SceneFrame`]: opacity,
//! card scale and reveal fractions. This module only turns that state into
//! markup — reveals become clip rectangles over the chart groups, the same
//! trick the clip-path polygon does in a browser.

use crate::bar::BarChartLayout;
use crate::line::LineChartLayout;
use crate::scenes::{CardState, SceneFrame};

const BACKGROUND: &str = "whitesmoke";
const ACCENT: &str = "steelblue";
const FONT_FAMILY: &str = "SF Pro Text, Helvetica, Arial, sans-serif";
/// Caption size at the 720-pixel reference height.
const CAPTION_SIZE: f64 = 80.0;
const TICK_SIZE: f64 = 18.0;
/// Grid lines are almost transparent.
const GRID_OPACITY: f64 = 0.1;
/// Rough character budget per caption line before wrapping.
const WRAP_COLUMNS: usize = 36;

// ── Public API ────────────────────────────────────────────────────────────────

/// Render one frame to a standalone SVG document.
pub fn render(frame: &SceneFrame, width: f64, height: f64) -> String {
    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{FONT_FAMILY}">"#,
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{BACKGROUND}"/>"#
    ));
    svg.push('\n');

    match frame {
        SceneFrame::TitleCard(card) | SceneFrame::SpanSummary(card) | SceneFrame::BestSender(card) => {
            push_card(&mut svg, card, width, height);
        }
        SceneFrame::Evolution {
            heading,
            opacity,
            chart,
            line_reveal,
        } => {
            push_scene_frame(&mut svg, heading, *opacity, width, height, |svg| {
                push_line_chart(svg, chart, *line_reveal, width, height)
            });
        }
        SceneFrame::Podium {
            heading,
            opacity,
            chart,
            bar_reveal,
            number_reveal,
        } => {
            push_scene_frame(&mut svg, heading, *opacity, width, height, |svg| {
                push_bar_chart(svg, chart, *bar_reveal, *number_reveal, width, height)
            });
        }
    }

    svg.push_str("</svg>\n");
    svg
}

// ── Cards ─────────────────────────────────────────────────────────────────────

fn push_card(svg: &mut String, card: &CardState, width: f64, height: f64) {
    let cx = width / 2.0;
    let cy = height / 2.0;
    let font_size = CAPTION_SIZE * height / 720.0;
    let lines = wrap_text(&card.text, WRAP_COLUMNS);
    // Centre the block vertically around cy.
    let first_dy = -(lines.len() as f64 - 1.0) / 2.0 * 1.2;

    svg.push_str(&format!(
        r#"<g opacity="{:.4}" transform="translate({cx} {cy}) scale({:.4}) translate({} {})">"#,
        card.opacity, card.scale, -cx, -cy,
    ));
    svg.push_str(&format!(
        r#"<text x="{cx}" y="{cy}" text-anchor="middle" font-size="{font_size:.1}">"#
    ));
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 {
            format!("{first_dy:.2}em")
        } else {
            "1.2em".to_string()
        };
        svg.push_str(&format!(
            r#"<tspan x="{cx}" dy="{dy}">{}</tspan>"#,
            escape_xml(line)
        ));
    }
    svg.push_str("</text></g>\n");
}

// ── Chart scenes ──────────────────────────────────────────────────────────────

fn push_scene_frame(
    svg: &mut String,
    heading: &str,
    opacity: f64,
    width: f64,
    height: f64,
    body: impl FnOnce(&mut String),
) {
    let font_size = CAPTION_SIZE * height / 720.0 * 0.6;
    svg.push_str(&format!(r#"<g opacity="{opacity:.4}">"#));
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="{font_size:.1}">{}</text>"#,
        width / 2.0,
        font_size * 1.5,
        escape_xml(heading),
    ));
    body(svg);
    svg.push_str("</g>\n");
}

fn chart_origin(chart_width: f64, chart_height: f64, width: f64, height: f64) -> (f64, f64) {
    ((width - chart_width) / 2.0, height - chart_height - 20.0)
}

fn push_line_chart(svg: &mut String, chart: &LineChartLayout, reveal: f64, width: f64, height: f64) {
    let (ox, oy) = chart_origin(chart.width, chart.height, width, height);
    let (left, top, plot_w, plot_h) = chart.plot_area;
    svg.push_str(&format!(r#"<g transform="translate({ox:.1} {oy:.1})">"#));

    // Bottom axis.
    let axis_y = top + plot_h;
    svg.push_str(&format!(
        r#"<line x1="{left:.1}" y1="{axis_y:.1}" x2="{:.1}" y2="{axis_y:.1}" stroke="currentColor"/>"#,
        left + plot_w
    ));
    for tick in &chart.x_ticks {
        svg.push_str(&format!(
            r#"<line x1="{0:.1}" y1="{axis_y:.1}" x2="{0:.1}" y2="{1:.1}" stroke="currentColor"/>"#,
            tick.position,
            axis_y + 6.0
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="{TICK_SIZE}">{}</text>"#,
            tick.position,
            axis_y + 6.0 + TICK_SIZE,
            escape_xml(&tick.label),
        ));
    }

    // Left axis with grid lines across the plot.
    for tick in &chart.y_ticks {
        svg.push_str(&format!(
            r#"<line x1="{left:.1}" y1="{0:.1}" x2="{1:.1}" y2="{0:.1}" stroke="currentColor" stroke-opacity="{GRID_OPACITY}"/>"#,
            tick.position,
            left + plot_w
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="{TICK_SIZE}">{}</text>"#,
            left - 8.0,
            tick.position + TICK_SIZE / 3.0,
            escape_xml(&tick.label),
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="start" font-size="{TICK_SIZE}">{}</text>"#,
        left - 60.0,
        top - 10.0,
        escape_xml(&chart.y_label),
    ));

    // The line itself, clipped to the revealed fraction of the plot.
    let reveal_width = (plot_w * reveal.clamp(0.0, 1.0)).max(0.0);
    svg.push_str(&format!(
        r#"<clipPath id="line-reveal"><rect x="{left:.1}" y="0" width="{reveal_width:.1}" height="{:.1}"/></clipPath>"#,
        chart.height
    ));
    let points: Vec<String> = chart
        .points
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect();
    svg.push_str(&format!(
        r#"<polyline clip-path="url(#line-reveal)" fill="none" stroke="{ACCENT}" stroke-width="{:.1}" stroke-linecap="round" stroke-linejoin="round" points="{}"/>"#,
        chart.stroke_width,
        points.join(" "),
    ));

    svg.push_str("</g>\n");
}

fn push_bar_chart(
    svg: &mut String,
    chart: &BarChartLayout,
    bar_reveal: f64,
    number_reveal: f64,
    width: f64,
    height: f64,
) {
    let (ox, oy) = chart_origin(chart.width, chart.height, width, height);
    let (left, top, plot_w, plot_h) = chart.plot_area;
    svg.push_str(&format!(r#"<g transform="translate({ox:.1} {oy:.1})">"#));

    // Top axis with grid lines down the plot.
    for tick in &chart.x_ticks {
        svg.push_str(&format!(
            r#"<line x1="{0:.1}" y1="{top:.1}" x2="{0:.1}" y2="{1:.1}" stroke="currentColor" stroke-opacity="{GRID_OPACITY}"/>"#,
            tick.position,
            top + plot_h
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="{TICK_SIZE}">{}</text>"#,
            tick.position,
            top - 8.0,
            escape_xml(&tick.label),
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="{TICK_SIZE}">{}</text>"#,
        left + plot_w,
        top - 32.0,
        escape_xml(&chart.x_label),
    ));

    // Bars, clipped to the revealed fraction.
    let bar_width = (plot_w * bar_reveal.clamp(0.0, 1.0)).max(0.0);
    svg.push_str(&format!(
        r#"<clipPath id="bar-reveal"><rect x="{left:.1}" y="0" width="{bar_width:.1}" height="{:.1}"/></clipPath>"#,
        chart.height
    ));
    svg.push_str(&format!(r#"<g clip-path="url(#bar-reveal)" fill="{ACCENT}">"#));
    for bar in &chart.bars {
        let (x, y, w, h) = bar.rect;
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}"/>"#
        ));
    }
    svg.push_str("</g>");

    // Participant names on the left axis.
    for bar in &chart.bars {
        let (_, y, _, h) = bar.rect;
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="{TICK_SIZE}">{}</text>"#,
            left - 8.0,
            y + h / 2.0 + TICK_SIZE / 3.0,
            escape_xml(&bar.participant),
        ));
    }

    // Value labels, revealed separately after the bars.
    let number_width = (plot_w * number_reveal.clamp(0.0, 1.0)).max(0.0);
    svg.push_str(&format!(
        r#"<clipPath id="number-reveal"><rect x="{left:.1}" y="0" width="{number_width:.1}" height="{:.1}"/></clipPath>"#,
        chart.height
    ));
    svg.push_str(r#"<g clip-path="url(#number-reveal)">"#);
    for bar in &chart.bars {
        let (x, y, w, h) = bar.rect;
        let (anchor, dx, fill) = if bar.label_inside {
            ("end", -4.0, "white")
        } else {
            ("start", 4.0, "currentColor")
        };
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="{anchor}" fill="{fill}" font-size="{TICK_SIZE}">{}</text>"#,
            x + w + dx,
            y + h / 2.0 + TICK_SIZE / 3.0,
            escape_xml(&bar.value_label),
        ));
    }
    svg.push_str("</g>");

    svg.push_str("</g>\n");
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Greedy word wrap; captions have no markup-level line breaks.
fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > columns {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ── Tests ─────────────────────────────────────────────────────────────────────
