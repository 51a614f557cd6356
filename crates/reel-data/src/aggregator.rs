//! Message aggregation into the two chart series.
//!
//! The daily-activity series feeds the cumulative line chart; the digit
//! ranking feeds the podium bar chart. Both derivations are pure functions
//! over the immutable dataset and run exactly once per pipeline run.

use std::collections::HashMap;

use chrono::NaiveDate;
use regex::Regex;
use reel_core::models::{Message, Participant};
use reel_core::time_utils::DayKeyer;
use reel_core::Result;
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the participant ranking.
pub const TOP_RANKED: usize = 5;

// ── Series entries ────────────────────────────────────────────────────────────

/// Number of messages sent on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    /// Calendar-day key in the configured timezone.
    pub day: NaiveDate,
    /// Messages sent that day.
    pub count: u64,
}

/// Running total of messages up to and including one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeDailyCount {
    /// Calendar-day key in the configured timezone.
    pub day: NaiveDate,
    /// Total messages sent up to this day in series order.
    pub cumulative_count: u64,
}

/// One participant's digit-message tally for the podium ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantDigitRank {
    /// Participant display name.
    pub participant: String,
    /// Number of their messages whose content contains a decimal digit.
    pub digit_message_count: u64,
}

// ── ActivityAggregator ────────────────────────────────────────────────────────

/// Stateless helper that groups messages by calendar day.
pub struct ActivityAggregator;

impl ActivityAggregator {
    /// Count messages per calendar day.
    ///
    /// Days appear in first-encounter order of the message sequence, not in
    /// calendar order. With the usual chronologically sorted export the two
    /// coincide; for unsorted input the encounter order is kept as-is, and
    /// the cumulative scan downstream follows it.
    pub fn daily_counts(messages: &[Message], keyer: &DayKeyer) -> Result<Vec<DailyCount>> {
        let mut counts: Vec<DailyCount> = Vec::new();
        let mut index: HashMap<NaiveDate, usize> = HashMap::new();

        for message in messages {
            let day = keyer.day_key(message.timestamp_ms)?;
            match index.get(&day) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(day, counts.len());
                    counts.push(DailyCount { day, count: 1 });
                }
            }
        }

        Ok(counts)
    }

    /// Produce the running-sum series over [`Self::daily_counts`].
    ///
    /// Invariant: each element's cumulative count is the previous element's
    /// plus its own daily count, so the series is monotonically
    /// non-decreasing and ends at the total message count.
    pub fn cumulative_daily(
        messages: &[Message],
        keyer: &DayKeyer,
    ) -> Result<Vec<CumulativeDailyCount>> {
        let daily = Self::daily_counts(messages, keyer)?;

        let mut running = 0u64;
        let series = daily
            .into_iter()
            .map(|entry| {
                running += entry.count;
                CumulativeDailyCount {
                    day: entry.day,
                    cumulative_count: running,
                }
            })
            .collect();

        Ok(series)
    }
}

// ── RankingAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that ranks participants by digit-message count.
pub struct RankingAggregator;

impl RankingAggregator {
    /// Rank participants by how many of their messages contain a digit.
    ///
    /// Starts from one zero-count slot per known participant in list order,
    /// then tallies every message whose content holds at least one decimal
    /// digit. Senders missing from the participant list (people who left
    /// the conversation) get a slot appended on first sighting. Zero counts
    /// are dropped, the rest sorted descending with ties keeping their
    /// slot order, truncated to [`TOP_RANKED`].
    pub fn digit_rank(
        participants: &[Participant],
        messages: &[Message],
    ) -> Vec<ParticipantDigitRank> {
        let digit = Regex::new(r"\d").expect("regex is valid");

        let mut tallies: Vec<ParticipantDigitRank> = participants
            .iter()
            .map(|p| ParticipantDigitRank {
                participant: p.name.clone(),
                digit_message_count: 0,
            })
            .collect();

        for message in messages {
            let has_digit = message
                .content
                .as_deref()
                .is_some_and(|text| digit.is_match(text));
            if !has_digit {
                continue;
            }

            match tallies
                .iter_mut()
                .find(|entry| entry.participant == message.sender_name)
            {
                Some(entry) => entry.digit_message_count += 1,
                None => tallies.push(ParticipantDigitRank {
                    participant: message.sender_name.clone(),
                    digit_message_count: 1,
                }),
            }
        }

        tallies.retain(|entry| entry.digit_message_count > 0);
        // Vec::sort_by is stable: equal counts keep their slot order.
        tallies.sort_by(|a, b| b.digit_message_count.cmp(&a.digit_message_count));
        tallies.truncate(TOP_RANKED);
        tallies
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
