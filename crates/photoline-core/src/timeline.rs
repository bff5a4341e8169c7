//! A day's photos and notes grouped into hour sections.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bucket::TimeBucket;
use crate::element::ElementId;

pub const MAX_NOTE_LENGTH: usize = 500;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NoteContentError {
    #[error("Note content is empty")]
    Empty,

    #[error("Note content exceeds {MAX_NOTE_LENGTH} characters ({0})")]
    TooLong(usize),
}

/// Trim note content and check it is storable.
pub fn validate_note_content(content: &str) -> Result<String, NoteContentError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(NoteContentError::Empty);
    }
    let len = trimmed.chars().count();
    if len > MAX_NOTE_LENGTH {
        return Err(NoteContentError::TooLong(len));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoEntry {
    pub id: ElementId,
    pub taken_at: NaiveDateTime,
    pub url: String,
    pub caption: Option<String>,
    /// Cut-out produced by the background removal service, if any.
    pub background_removed_url: Option<String>,
}

impl PhotoEntry {
    pub fn bucket(&self) -> TimeBucket {
        TimeBucket::of(&self.taken_at)
    }

    /// Image to show: the cut-out when one exists.
    pub fn display_url(&self) -> &str {
        self.background_removed_url.as_deref().unwrap_or(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub id: ElementId,
    pub bucket: TimeBucket,
    pub content: String,
    pub created_at: NaiveDateTime,
}

/// Everything shown in one hour section.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSection {
    pub bucket: TimeBucket,
    pub photos: Vec<PhotoEntry>,
    pub notes: Vec<NoteEntry>,
}

impl TimelineSection {
    fn new(bucket: TimeBucket) -> Self {
        Self {
            bucket,
            photos: Vec::new(),
            notes: Vec::new(),
        }
    }
}

/// Photos shown as thumbnails in a compact row.
pub const SUMMARY_THUMBNAILS: usize = 3;
/// Longer summary labels are cut and end in `...`.
pub const SUMMARY_LABEL_CHARS: usize = 20;

/// One hour condensed into a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSummary {
    pub bucket: TimeBucket,
    pub thumbnails: Vec<PhotoEntry>,
    /// Photos left out of `thumbnails`.
    pub more: usize,
    pub label: String,
}

impl TimelineSection {
    /// Condense the section for the compact view.
    ///
    /// The label is the first photo caption, else the first note, else a
    /// photo count.
    pub fn summary(&self) -> SectionSummary {
        let label = self
            .photos
            .first()
            .and_then(|photo| photo.caption.as_deref())
            .filter(|caption| !caption.trim().is_empty())
            .or_else(|| self.notes.first().map(|note| note.content.as_str()))
            .map_or_else(|| photo_count(self.photos.len()), truncate_label);

        SectionSummary {
            bucket: self.bucket,
            thumbnails: self.photos.iter().take(SUMMARY_THUMBNAILS).cloned().collect(),
            more: self.photos.len().saturating_sub(SUMMARY_THUMBNAILS),
            label,
        }
    }
}

fn photo_count(count: usize) -> String {
    match count {
        1 => "1 photo".to_string(),
        n => format!("{n} photos"),
    }
}

fn truncate_label(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(SUMMARY_LABEL_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayTimeline {
    pub day: NaiveDate,
    /// Non-empty sections in hour order.
    pub sections: Vec<TimelineSection>,
}

impl DayTimeline {
    /// Group a day's entries by hour.
    ///
    /// Photos taken on another day are dropped. Photos are ordered by capture
    /// time and notes by creation time within their section.
    pub fn group(
        day: NaiveDate,
        photos: impl IntoIterator<Item = PhotoEntry>,
        notes: impl IntoIterator<Item = NoteEntry>,
    ) -> Self {
        let mut sections: BTreeMap<TimeBucket, TimelineSection> = BTreeMap::new();

        for photo in photos {
            if photo.taken_at.date() != day {
                tracing::debug!(photo = %photo.id, taken_at = %photo.taken_at, "photo outside day skipped");
                continue;
            }
            sections
                .entry(photo.bucket())
                .or_insert_with_key(|bucket| TimelineSection::new(*bucket))
                .photos
                .push(photo);
        }
        for note in notes {
            sections
                .entry(note.bucket)
                .or_insert_with_key(|bucket| TimelineSection::new(*bucket))
                .notes
                .push(note);
        }

        let sections = sections
            .into_values()
            .map(|mut section| {
                section.photos.sort_by_key(|p| p.taken_at);
                section.notes.sort_by_key(|n| n.created_at);
                section
            })
            .collect();

        Self { day, sections }
    }

    pub fn section(&self, bucket: TimeBucket) -> Option<&TimelineSection> {
        self.sections.iter().find(|s| s.bucket == bucket)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
