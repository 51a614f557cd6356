//! The five-scene composition.
//!
//! Title card, conversation-span card, cumulative line chart, best-sender
//! card, podium bar chart — played back to back on a fixed-frame timeline.
//! `Composition::new` derives every caption and chart layout up front; a
//! failure there aborts construction entirely, no partial composition is
//! ever rendered. `frame_at` is then a pure lookup.

use reel_core::error::{ReelError, Result};
use reel_core::formatting::{format_count, format_date};
use reel_data::analysis::ChatAnalysis;

use crate::bar::{BarChartLayout, BarChartOptions};
use crate::line::{LineChartLayout, LineChartOptions};
use crate::timeline::{interpolate, InterpolateOptions, SceneSequence, Timeline};

// ── Reveal choreography ───────────────────────────────────────────────────────
//
// Frame values are defined at the 30 fps reference rate and scaled to the
// composition rate.

const FADE_IN_FRAMES: f64 = 10.0;
const CARD_SCALE_INITIAL: f64 = 20.0;
const LINE_REVEAL: (f64, f64) = (45.0, 200.0);
const BAR_REVEAL: (f64, f64) = (45.0, 200.0);
const NUMBER_REVEAL: (f64, f64) = (200.0, 215.0);

/// Scene durations in seconds, in playback order.
const SCENE_SECONDS: [u32; 5] = [5, 8, 12, 8, 12];

/// Chart size relative to the composition (1200×500 within the 1280×720
/// reference frame).
const CHART_WIDTH_RATIO: f64 = 15.0 / 16.0;
const CHART_HEIGHT_RATIO: f64 = 25.0 / 36.0;

// ── Frame state ───────────────────────────────────────────────────────────────

/// Animated state of a full-screen text card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardState {
    pub text: String,
    pub opacity: f64,
    /// Scale factor of the pop-in (starts large, settles at 1).
    pub scale: f64,
}

/// Everything one frame shows.
#[derive(Debug, Clone)]
pub enum SceneFrame {
    TitleCard(CardState),
    SpanSummary(CardState),
    Evolution {
        heading: String,
        opacity: f64,
        chart: LineChartLayout,
        /// Fraction of the line revealed left to right, `0..=1`.
        line_reveal: f64,
    },
    BestSender(CardState),
    Podium {
        heading: String,
        opacity: f64,
        chart: BarChartLayout,
        /// Fraction of the bars revealed left to right. May be negative
        /// before the reveal starts (the ramp extends left); renderers
        /// treat anything `<= 0` as hidden.
        bar_reveal: f64,
        /// Fraction of the value labels revealed, `0..=1`.
        number_reveal: f64,
    },
}

// ── Composition ───────────────────────────────────────────────────────────────

/// The fully derived composition: captions, chart layouts and timing.
#[derive(Debug, Clone)]
pub struct Composition {
    pub width: f64,
    pub height: f64,
    pub timeline: Timeline,
    sequence: SceneSequence,
    title: String,
    span_text: String,
    evolution_heading: String,
    best_text: String,
    podium_heading: String,
    line_chart: LineChartLayout,
    bar_chart: BarChartLayout,
}

impl Composition {
    /// Build the composition from a finished analysis.
    ///
    /// Fails when either chart has no computable domain — an export whose
    /// ranking is empty (nobody ever sent digit content) cannot produce the
    /// podium or best-sender scenes, and the whole composition is rejected.
    pub fn new(analysis: &ChatAnalysis, width: u32, height: u32, fps: u32) -> Result<Self> {
        let width = width as f64;
        let height = height as f64;
        let chart_width = width * CHART_WIDTH_RATIO;
        let chart_height = height * CHART_HEIGHT_RATIO;

        let line_chart = LineChartLayout::build(
            &analysis.cumulative_daily,
            &LineChartOptions::sized(chart_width, chart_height),
        )?;
        let bar_chart = BarChartLayout::build(
            &analysis.digit_ranking,
            &BarChartOptions::sized(chart_width, chart_height),
        )?;
        let best = analysis.best_sender.as_ref().ok_or_else(|| {
            ReelError::InvalidDomain("participant ranking is empty".to_string())
        })?;

        let mut sequence = SceneSequence::new();
        for secs in SCENE_SECONDS {
            sequence.push(secs * fps);
        }
        let timeline = Timeline::new(fps, sequence.total_frames());

        tracing::debug!(
            "Composition: {}x{} at {} fps, {} frames",
            width,
            height,
            fps,
            timeline.duration_in_frames,
        );

        Ok(Self {
            width,
            height,
            timeline,
            sequence,
            title: "Analyse d'une conversation Messenger".to_string(),
            span_text: format!(
                "Du {} au {} c'est un total de {} messages qui ont été envoyés !",
                format_date(analysis.span.start),
                format_date(analysis.span.end),
                format_count(analysis.total_messages),
            ),
            evolution_heading: "Regardez l'évolution !".to_string(),
            best_text: format!(
                "Félicitation à {} pour être le plus actif du groupe avec {} messages à son actif !",
                best.participant,
                format_count(best.digit_message_count),
            ),
            podium_heading:
                "... Mais les autres ne sont pas en reste non plus ! Voici le podium des 5 plus actifs"
                    .to_string(),
            line_chart,
            bar_chart,
        })
    }

    /// Resolve the animated state of one frame.
    ///
    /// Returns `None` past the end of the timeline.
    pub fn frame_at(&self, frame: u32) -> Option<SceneFrame> {
        let cursor = self.sequence.resolve(frame)?;
        let local = cursor.local_frame as f64;
        let duration = cursor.duration_in_frames as f64;
        let rate = self.timeline.fps as f64 / 30.0;

        let opacity = fade(local, duration, self.timeline.fps as f64);

        Some(match cursor.scene {
            0 => SceneFrame::TitleCard(self.card(&self.title, local, opacity)),
            1 => SceneFrame::SpanSummary(self.card(&self.span_text, local, opacity)),
            2 => SceneFrame::Evolution {
                heading: self.evolution_heading.clone(),
                opacity,
                chart: self.line_chart.clone(),
                line_reveal: interpolate(
                    local,
                    (LINE_REVEAL.0 * rate, LINE_REVEAL.1 * rate),
                    (0.0, 1.0),
                    InterpolateOptions::clamp(),
                ),
            },
            3 => SceneFrame::BestSender(self.card(&self.best_text, local, opacity)),
            _ => SceneFrame::Podium {
                heading: self.podium_heading.clone(),
                opacity,
                chart: self.bar_chart.clone(),
                bar_reveal: interpolate(
                    local,
                    (BAR_REVEAL.0 * rate, BAR_REVEAL.1 * rate),
                    (0.0, 1.0),
                    InterpolateOptions::clamp_right(),
                ),
                number_reveal: interpolate(
                    local,
                    (NUMBER_REVEAL.0 * rate, NUMBER_REVEAL.1 * rate),
                    (0.0, 1.0),
                    InterpolateOptions::clamp(),
                ),
            },
        })
    }

    fn card(&self, text: &str, local: f64, opacity: f64) -> CardState {
        let rate = self.timeline.fps as f64 / 30.0;
        CardState {
            text: text.to_string(),
            opacity,
            scale: interpolate(
                local,
                (0.0, FADE_IN_FRAMES * rate),
                (CARD_SCALE_INITIAL, 1.0),
                InterpolateOptions::clamp(),
            ),
        }
    }
}

/// Fade-in over the first reference frames (scaled to the composition rate),
/// fade-out over the scene's last second.
fn fade(local: f64, duration: f64, fps: f64) -> f64 {
    let rate = fps / 30.0;
    let fade_in = interpolate(
        local,
        (0.0, FADE_IN_FRAMES * rate),
        (0.0, 1.0),
        InterpolateOptions::clamp(),
    );
    let fade_out = interpolate(
        local,
        (duration - fps, duration),
        (1.0, 0.0),
        InterpolateOptions::clamp(),
    );
    fade_in * fade_out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::models::{ChatDataset, Message, Participant};
    use reel_core::time_utils::DayKeyer;
    use reel_data::analysis::analyze_chat;
    use std::path::PathBuf;

    const DAY_MS: i64 = 86_400_000;
    // 2020-01-01T12:00:00Z
    const DAY1_NOON: i64 = 1_577_880_000_000;

    fn analysis() -> ChatAnalysis {
        let dataset = ChatDataset {
            participants: vec![
                Participant {
                    name: "Alice".to_string(),
                },
                Participant {
                    name: "Bob".to_string(),
                },
            ],
            messages: vec![
                msg("Alice", DAY1_NOON, Some("rdv à 15h")),
                msg("Bob", DAY1_NOON + DAY_MS, Some("ok pour 15h")),
                msg("Alice", DAY1_NOON + 2 * DAY_MS, Some("parfait")),
            ],
            source: PathBuf::from("export.json"),
        };
        analyze_chat(&dataset, &DayKeyer::utc()).unwrap()
    }

    fn msg(sender: &str, ts: i64, content: Option<&str>) -> Message {
        Message {
            sender_name: sender.to_string(),
            timestamp_ms: ts,
            content: content.map(|s| s.to_string()),
            kind: "Generic".to_string(),
            is_unsent: false,
        }
    }

    #[test]
    fn test_composition_duration() {
        let comp = Composition::new(&analysis(), 1280, 720, 30).unwrap();
        assert_eq!(comp.timeline.duration_in_frames, 45 * 30);
        assert!(comp.frame_at(45 * 30).is_none());
        assert!(comp.frame_at(45 * 30 - 1).is_some());
    }

    #[test]
    fn test_scene_order() {
        let comp = Composition::new(&analysis(), 1280, 720, 30).unwrap();
        assert!(matches!(
            comp.frame_at(0),
            Some(SceneFrame::TitleCard(_))
        ));
        assert!(matches!(
            comp.frame_at(5 * 30),
            Some(SceneFrame::SpanSummary(_))
        ));
        assert!(matches!(
            comp.frame_at(13 * 30),
            Some(SceneFrame::Evolution { .. })
        ));
        assert!(matches!(
            comp.frame_at(25 * 30),
            Some(SceneFrame::BestSender(_))
        ));
        assert!(matches!(
            comp.frame_at(33 * 30),
            Some(SceneFrame::Podium { .. })
        ));
    }

    #[test]
    fn test_card_fades_and_settles() {
        let comp = Composition::new(&analysis(), 1280, 720, 30).unwrap();

        let SceneFrame::TitleCard(start) = comp.frame_at(0).unwrap() else {
            panic!("expected title card");
        };
        assert_eq!(start.opacity, 0.0);
        assert_eq!(start.scale, CARD_SCALE_INITIAL);

        let SceneFrame::TitleCard(mid) = comp.frame_at(60).unwrap() else {
            panic!("expected title card");
        };
        assert_eq!(mid.opacity, 1.0);
        assert_eq!(mid.scale, 1.0);

        let SceneFrame::TitleCard(end) = comp.frame_at(5 * 30 - 1).unwrap() else {
            panic!("expected title card");
        };
        assert!(end.opacity < 0.1);
    }

    #[test]
    fn test_fade_and_pop_in_scale_with_fps() {
        // At 60 fps every ramp doubles in frames so wall-clock timing holds.
        let comp = Composition::new(&analysis(), 1280, 720, 60).unwrap();

        let SceneFrame::TitleCard(mid) = comp.frame_at(10).unwrap() else {
            panic!("expected title card");
        };
        // Ten frames at 60 fps is halfway through the fade-in.
        assert!((mid.opacity - 0.5).abs() < 1e-9);
        assert!(mid.scale > 1.0);

        let SceneFrame::TitleCard(done) = comp.frame_at(20).unwrap() else {
            panic!("expected title card");
        };
        assert_eq!(done.opacity, 1.0);
        assert_eq!(done.scale, 1.0);
    }

    #[test]
    fn test_span_caption_contents() {
        let comp = Composition::new(&analysis(), 1280, 720, 30).unwrap();
        let SceneFrame::SpanSummary(card) = comp.frame_at(6 * 30).unwrap() else {
            panic!("expected span summary");
        };
        assert!(card.text.contains("Du 01/01/2020 au 03/01/2020"));
        assert!(card.text.contains("3 messages"));
    }

    #[test]
    fn test_line_reveal_progression() {
        let comp = Composition::new(&analysis(), 1280, 720, 30).unwrap();
        let scene_start = 13 * 30; // inside the evolution scene

        let SceneFrame::Evolution { line_reveal, .. } = comp.frame_at(scene_start).unwrap() else {
            panic!("expected evolution scene");
        };
        // Local frame 0 is before the [45, 200] ramp; clamped to zero.
        assert_eq!(line_reveal, 0.0);

        let SceneFrame::Evolution { line_reveal, .. } =
            comp.frame_at(scene_start + 300).unwrap()
        else {
            panic!("expected evolution scene");
        };
        assert_eq!(line_reveal, 1.0);
    }

    #[test]
    fn test_podium_reveals() {
        let comp = Composition::new(&analysis(), 1280, 720, 30).unwrap();
        let podium_start = 33 * 30;

        let SceneFrame::Podium {
            bar_reveal,
            number_reveal,
            ..
        } = comp.frame_at(podium_start).unwrap()
        else {
            panic!("expected podium scene");
        };
        // Bars extend left of the ramp; numbers clamp at zero.
        assert!(bar_reveal < 0.0);
        assert_eq!(number_reveal, 0.0);

        let SceneFrame::Podium {
            bar_reveal,
            number_reveal,
            ..
        } = comp.frame_at(podium_start + 220).unwrap()
        else {
            panic!("expected podium scene");
        };
        assert_eq!(bar_reveal, 1.0);
        assert_eq!(number_reveal, 1.0);
    }

    #[test]
    fn test_no_digit_content_rejects_composition() {
        let dataset = ChatDataset {
            participants: vec![Participant {
                name: "Alice".to_string(),
            }],
            messages: vec![msg("Alice", DAY1_NOON, Some("bonjour"))],
            source: PathBuf::from("export.json"),
        };
        let analysis = analyze_chat(&dataset, &DayKeyer::utc()).unwrap();

        assert!(matches!(
            Composition::new(&analysis, 1280, 720, 30),
            Err(ReelError::InvalidDomain(_))
        ));
    }
}
