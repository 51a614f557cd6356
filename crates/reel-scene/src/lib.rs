//! Scene and chart layer for Chatreel.
//!
//! Consumes the derived series from `reel-data` plus pixel dimensions and a
//! frame position, and produces drawable geometry: chart layouts, per-frame
//! scene state with timed reveals, and an SVG rendition of a single frame.
//! All drawing decisions live here; the derivation crates stay presentation
//! free.

pub mod bar;
pub mod line;
pub mod scale;
pub mod scenes;
pub mod svg;
pub mod timeline;
