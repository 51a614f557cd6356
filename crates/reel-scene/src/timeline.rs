//! Fixed-frame timeline primitives.
//!
//! `interpolate` mirrors the frame-to-value mapping the scene layer leans on
//! everywhere: a linear ramp between two frame positions with optional
//! clamping on either side and an easing curve applied to the normalised
//! progress. `SceneSequence` plays scenes back to back and resolves a global
//! frame to the scene it lands in.

use serde::{Deserialize, Serialize};

// ── Easing ────────────────────────────────────────────────────────────────────

/// Easing curve applied to normalised progress in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

// ── Interpolation ─────────────────────────────────────────────────────────────

/// Behaviour outside the input range, per side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extrapolate {
    /// Continue the linear ramp beyond the range.
    #[default]
    Extend,
    /// Pin the value to the nearest range endpoint.
    Clamp,
}

/// Options for [`interpolate`].
#[derive(Clone, Copy, Debug, Default)]
pub struct InterpolateOptions {
    pub extrapolate_left: Extrapolate,
    pub extrapolate_right: Extrapolate,
    pub easing: Ease,
}

impl InterpolateOptions {
    /// Clamp on both sides, the most common scene configuration.
    pub fn clamp() -> Self {
        Self {
            extrapolate_left: Extrapolate::Clamp,
            extrapolate_right: Extrapolate::Clamp,
            easing: Ease::Linear,
        }
    }

    /// Clamp only past the end of the input range.
    pub fn clamp_right() -> Self {
        Self {
            extrapolate_right: Extrapolate::Clamp,
            ..Self::default()
        }
    }

    /// Clamp only before the start of the input range.
    pub fn clamp_left() -> Self {
        Self {
            extrapolate_left: Extrapolate::Clamp,
            ..Self::default()
        }
    }

    pub fn with_easing(mut self, easing: Ease) -> Self {
        self.easing = easing;
        self
    }
}

/// Map `frame` from `input` to `output`.
///
/// Progress through `input` is eased, then scaled onto `output`. Sides
/// configured as [`Extrapolate::Clamp`] pin out-of-range frames to the
/// nearest endpoint; `Extend` sides keep the (un-eased) linear ramp going.
pub fn interpolate(
    frame: f64,
    input: (f64, f64),
    output: (f64, f64),
    opts: InterpolateOptions,
) -> f64 {
    let (in_start, in_end) = input;
    let (out_start, out_end) = output;
    debug_assert!(in_end > in_start, "input range must be increasing");

    if frame < in_start && opts.extrapolate_left == Extrapolate::Clamp {
        return out_start;
    }
    if frame > in_end && opts.extrapolate_right == Extrapolate::Clamp {
        return out_end;
    }

    let progress = (frame - in_start) / (in_end - in_start);
    let eased = if (0.0..=1.0).contains(&progress) {
        opts.easing.apply(progress)
    } else {
        progress
    };
    out_start + eased * (out_end - out_start)
}

// ── Timeline ──────────────────────────────────────────────────────────────────

/// The fixed-frame clock of a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub fps: u32,
    pub duration_in_frames: u32,
}

impl Timeline {
    pub fn new(fps: u32, duration_in_frames: u32) -> Self {
        Self {
            fps,
            duration_in_frames,
        }
    }
}

// ── SceneSequence ─────────────────────────────────────────────────────────────

/// Position of a frame within one scene of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneCursor {
    /// Index of the scene the frame falls in.
    pub scene: usize,
    /// Frame offset from the scene's first frame.
    pub local_frame: u32,
    /// Total frames of that scene.
    pub duration_in_frames: u32,
}

/// Back-to-back scene playback with global-to-local frame resolution.
#[derive(Debug, Clone, Default)]
pub struct SceneSequence {
    durations: Vec<u32>,
}

impl SceneSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scene lasting `duration_in_frames`.
    pub fn push(&mut self, duration_in_frames: u32) {
        self.durations.push(duration_in_frames);
    }

    pub fn total_frames(&self) -> u32 {
        self.durations.iter().sum()
    }

    /// Resolve a global frame to the scene it falls in.
    ///
    /// Returns `None` past the end of the sequence.
    pub fn resolve(&self, frame: u32) -> Option<SceneCursor> {
        let mut offset = 0u32;
        for (scene, &duration) in self.durations.iter().enumerate() {
            if frame < offset + duration {
                return Some(SceneCursor {
                    scene,
                    local_frame: frame - offset,
                    duration_in_frames: duration,
                });
            }
            offset += duration;
        }
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
