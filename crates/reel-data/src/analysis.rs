//! Top-level derivation pipeline for Chatreel.
//!
//! Runs every aggregation over a loaded [`ChatDataset`] exactly once and
//! returns a [`ChatAnalysis`] ready for the scene layer. Nothing here is
//! cached in globals: the analysis is built by an explicit call and passed
//! down to consumers.

use chrono::NaiveDate;
use reel_core::models::ChatDataset;
use reel_core::time_utils::DayKeyer;
use reel_core::Result;

use crate::aggregator::{
    ActivityAggregator, CumulativeDailyCount, ParticipantDigitRank, RankingAggregator,
};

// ── Public types ──────────────────────────────────────────────────────────────

/// First and last calendar day of the conversation, in export order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ConversationSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Number of participants listed in the export header.
    pub participants_count: usize,
    /// Total number of messages processed.
    pub messages_processed: usize,
    /// Number of distinct calendar days with activity.
    pub days_covered: usize,
    /// Wall-clock seconds spent on the derivations.
    pub derive_time_seconds: f64,
}

/// The complete output of [`analyze_chat`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ChatAnalysis {
    /// Calendar span from the first to the last message of the export.
    pub span: ConversationSpan,
    /// Total number of messages in the conversation.
    pub total_messages: u64,
    /// Cumulative per-day message series for the line chart.
    pub cumulative_daily: Vec<CumulativeDailyCount>,
    /// Top digit-message senders for the podium bar chart.
    pub digit_ranking: Vec<ParticipantDigitRank>,
    /// Head of the ranking; `None` when nobody ever sent digit content.
    pub best_sender: Option<ParticipantDigitRank>,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full derivation pipeline over a loaded dataset.
///
/// 1. Resolve the conversation span from the first and last message
///    (fails on an empty export).
/// 2. Build the cumulative daily-activity series.
/// 3. Build the participant digit ranking and pick the best sender.
/// 4. Return a [`ChatAnalysis`] with run metadata.
pub fn analyze_chat(dataset: &ChatDataset, keyer: &DayKeyer) -> Result<ChatAnalysis> {
    let derive_start = std::time::Instant::now();

    // ── Step 1: Conversation span ─────────────────────────────────────────────
    let start = keyer.day_key(dataset.first_message()?.timestamp_ms)?;
    let end = keyer.day_key(dataset.last_message()?.timestamp_ms)?;

    // ── Step 2: Daily activity ────────────────────────────────────────────────
    let cumulative_daily = ActivityAggregator::cumulative_daily(&dataset.messages, keyer)?;

    // ── Step 3: Ranking ───────────────────────────────────────────────────────
    let digit_ranking = RankingAggregator::digit_rank(&dataset.participants, &dataset.messages);
    let best_sender = digit_ranking.first().cloned();

    let metadata = AnalysisMetadata {
        generated_at: chrono::Utc::now().to_rfc3339(),
        participants_count: dataset.participants.len(),
        messages_processed: dataset.messages.len(),
        days_covered: cumulative_daily.len(),
        derive_time_seconds: derive_start.elapsed().as_secs_f64(),
    };

    tracing::debug!(
        "Analysis: {} messages over {} days, {} ranked senders",
        metadata.messages_processed,
        metadata.days_covered,
        digit_ranking.len(),
    );

    Ok(ChatAnalysis {
        span: ConversationSpan { start, end },
        total_messages: dataset.messages.len() as u64,
        cumulative_daily,
        digit_ranking,
        best_sender,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
