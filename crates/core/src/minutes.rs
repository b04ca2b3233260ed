//! Meeting minutes (protokoll) for board meetings and general meetings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of meeting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingKind {
    /// Styrelsemöte.
    #[default]
    Board,
    /// Bolagsstämma (årsstämma or extra stämma).
    Annual,
}

impl MeetingKind {
    /// Swedish document title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Board => "Protokoll fört vid styrelsemöte",
            Self::Annual => "Protokoll fört vid bolagsstämma",
        }
    }
}

/// One paragraph (paragraf) of the minutes, as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingItem {
    /// Heading, e.g. "Val av ordförande".
    pub heading: String,
    /// Body text.
    #[serde(default)]
    pub text: String,
    /// Decision taken under the item.
    #[serde(default)]
    pub decision: Option<String>,
}

/// An item with its paragraph number, as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedItem {
    /// Paragraph number, starting at 1.
    pub number: usize,
    /// Heading.
    pub heading: String,
    /// Body text.
    pub text: String,
    /// Decision.
    pub decision: Option<String>,
}

/// Minutes of one meeting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingMinutes {
    /// Board meeting or general meeting.
    #[serde(default)]
    pub kind: MeetingKind,
    /// Meeting date.
    pub date: Option<NaiveDate>,
    /// Where the meeting was held.
    #[serde(default)]
    pub location: Option<String>,
    /// Ordförande.
    #[serde(default)]
    pub chair: Option<String>,
    /// Protokollförare.
    #[serde(default)]
    pub secretary: Option<String>,
    /// Justerare.
    #[serde(default)]
    pub adjusters: Vec<String>,
    /// Närvarande.
    #[serde(default)]
    pub attendees: Vec<String>,
    /// Paragraphs in order.
    #[serde(default)]
    pub items: Vec<MeetingItem>,
}

impl MeetingMinutes {
    /// Creates empty minutes for a meeting.
    #[must_use]
    pub fn new(kind: MeetingKind, date: NaiveDate) -> Self {
        Self {
            kind,
            date: Some(date),
            ..Self::default()
        }
    }

    /// Appends a paragraph.
    #[must_use]
    pub fn with_item(
        mut self,
        heading: impl Into<String>,
        text: impl Into<String>,
        decision: Option<String>,
    ) -> Self {
        self.items.push(MeetingItem {
            heading: heading.into(),
            text: text.into(),
            decision,
        });
        self
    }

    /// Paragraphs numbered from 1 in order.
    #[must_use]
    pub fn numbered_items(&self) -> Vec<NumberedItem> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| NumberedItem {
                number: i + 1,
                heading: item.heading.clone(),
                text: item.text.clone(),
                decision: item.decision.clone(),
            })
            .collect()
    }
}
