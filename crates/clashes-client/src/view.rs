//! Turns hook state into one of four mutually exclusive views.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use clashes_shared::constants::SKELETON_COUNT;
use clashes_shared::Clash;

use crate::state::ClashesState;

/// Display data for one clash card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClashCard {
    pub id: String,
    pub title: String,
    pub when: String,
    pub location: String,
    pub address: String,
    pub organizer: Option<String>,
    pub participant_count: usize,
}

impl ClashCard {
    pub fn from_clash(clash: &Clash) -> Self {
        let title = match clash.title_or_empty().trim() {
            "" => "Untitled clash".to_string(),
            t => t.to_string(),
        };
        Self {
            id: clash.id.clone(),
            title,
            when: format_date(&clash.date),
            location: clash.location.clone(),
            address: clash.address.clone(),
            organizer: clash
                .created_by_peer
                .as_ref()
                .map(|p| p.name.clone())
                .filter(|n| !n.is_empty()),
            participant_count: clash.participants.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Last load failed; offers a retry that reloads with the empty term.
    Error { message: String },
    Loading { placeholders: usize },
    Empty,
    Grid {
        cards: Vec<ClashCard>,
        caption: String,
    },
}

impl ListView {
    /// Error takes precedence over loading, loading over content.
    pub fn from_state(state: &ClashesState) -> Self {
        if let Some(message) = &state.error {
            return ListView::Error {
                message: message.clone(),
            };
        }
        if state.loading {
            return ListView::Loading {
                placeholders: SKELETON_COUNT,
            };
        }
        if state.clashes.is_empty() {
            return ListView::Empty;
        }
        ListView::Grid {
            cards: state.clashes.iter().map(ClashCard::from_clash).collect(),
            caption: count_caption(state.clashes.len()),
        }
    }

    /// The search input is disabled while a load is in flight.
    pub fn filter_enabled(&self) -> bool {
        !matches!(self, ListView::Loading { .. })
    }

    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        match self {
            ListView::Error { message } => {
                let _ = writeln!(out, "Error: {message}");
                let _ = writeln!(out, "Type :retry to try again.");
            }
            ListView::Loading { placeholders } => {
                for _ in 0..*placeholders {
                    let _ = writeln!(out, "[ ░░░░░░░░░░░░░░░░ ]");
                }
            }
            ListView::Empty => {
                let _ = writeln!(out, "No clashes found.");
            }
            ListView::Grid { cards, caption } => {
                let _ = writeln!(out, "{caption}");
                for card in cards {
                    let _ = writeln!(out, "- {} ({})", card.title, card.when);
                    let _ = writeln!(out, "  {}, {}", card.location, card.address);
                    if let Some(organizer) = &card.organizer {
                        let _ = writeln!(out, "  by {organizer}");
                    }
                    let _ = writeln!(out, "  {} going", card.participant_count);
                }
            }
        }
        out
    }
}

/// "Showing 1 clash" / "Showing N clashes".
pub fn count_caption(count: usize) -> String {
    if count == 1 {
        "Showing 1 clash".to_string()
    } else {
        format!("Showing {count} clashes")
    }
}

/// Human-readable date. Falls back to the raw string when unparseable.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%a %d %b %Y, %H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format("%a %d %b %Y, %H:%M").to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%a %d %b %Y").to_string();
    }
    raw.to_string()
}
