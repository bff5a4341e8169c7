//! Wire messages to core timeline types.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use photoline_core::{DayTimeline, ElementId, NoteEntry, PhotoEntry, PlacementRecord, TimeBucket};
use photoline_proto::timeline;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn parse_day(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(s, DATETIME_FORMAT))
        .ok()
}

pub fn placement_from_proto(placement: &timeline::Placement) -> PlacementRecord {
    PlacementRecord {
        x: placement.x,
        y: placement.y,
        width: placement.width,
        font_size: placement.font_size,
        revision: placement.revision,
    }
}

pub fn placement_to_proto(record: &PlacementRecord) -> timeline::Placement {
    timeline::Placement {
        x: record.x,
        y: record.y,
        width: record.width,
        font_size: record.font_size,
        revision: record.revision,
    }
}

pub fn photo_from_proto(photo: timeline::Photo) -> Option<PhotoEntry> {
    let Some(taken_at) = parse_timestamp(&photo.taken_at) else {
        tracing::warn!(photo = %photo.id, taken_at = %photo.taken_at, "photo with unreadable capture time skipped");
        return None;
    };
    Some(PhotoEntry {
        id: ElementId::new(photo.id),
        taken_at,
        url: photo.url,
        caption: photo.caption.filter(|c| !c.trim().is_empty()),
        background_removed_url: photo.background_removed_url,
    })
}

pub fn note_from_proto(note: timeline::Note) -> Option<NoteEntry> {
    let bucket = match note.bucket.parse::<TimeBucket>() {
        Ok(bucket) => bucket,
        Err(err) => {
            tracing::warn!(note = %note.id, error = %err, "note with invalid bucket skipped");
            return None;
        }
    };
    // Ordering only; an unreadable timestamp sorts first.
    let created_at = parse_timestamp(&note.created_at).unwrap_or_default();
    Some(NoteEntry {
        id: ElementId::new(note.id),
        bucket,
        content: note.content,
        created_at,
    })
}

/// Day grouping plus the stored placement of each element.
pub fn day_from_proto(
    day: NaiveDate,
    response: timeline::ListDayResponse,
) -> (DayTimeline, HashMap<ElementId, PlacementRecord>) {
    let photos = response.photos.into_iter().filter_map(photo_from_proto);
    let notes = response.notes.into_iter().filter_map(note_from_proto);
    let timeline = DayTimeline::group(day, photos, notes);

    let placements = response
        .placements
        .into_iter()
        .filter_map(|entry| {
            let placement = entry.placement.as_ref()?;
            Some((ElementId::new(entry.element_id), placement_from_proto(placement)))
        })
        .collect();

    (timeline, placements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn proto_photo(id: &str, taken_at: &str) -> timeline::Photo {
        timeline::Photo {
            id: id.to_string(),
            day: "2024-07-01".to_string(),
            taken_at: taken_at.to_string(),
            url: format!("https://img.example/{id}.jpg"),
            caption: Some(" ".to_string()),
            background_removed_url: None,
            created_at: "2024-07-01T12:00:00+00:00".to_string(),
        }
    }

    #[wasm_bindgen_test]
    fn test_day_from_proto() {
        let day = parse_day("2024-07-01").unwrap();
        let response = timeline::ListDayResponse {
            photos: vec![
                proto_photo("a", "2024-07-01T09:15:00"),
                proto_photo("broken", "noon"),
            ],
            notes: vec![timeline::Note {
                id: "n".to_string(),
                day: "2024-07-01".to_string(),
                bucket: "09:00".to_string(),
                content: "hello".to_string(),
                created_at: "2024-07-01T09:20:00+00:00".to_string(),
            }],
            placements: vec![timeline::PlacementEntry {
                element_id: "a".to_string(),
                bucket: "09:00".to_string(),
                placement: Some(timeline::Placement {
                    x: 40.0,
                    y: 12.0,
                    width: Some(240.0),
                    font_size: None,
                    revision: 3,
                }),
            }],
        };

        let (timeline, placements) = day_from_proto(day, response);
        assert_eq!(timeline.sections.len(), 1);
        let section = &timeline.sections[0];
        assert_eq!(section.photos.len(), 1);
        assert!(section.photos[0].caption.is_none());
        assert_eq!(section.notes.len(), 1);
        assert_eq!(placements[&ElementId::from("a")].revision, 3);
    }

    #[wasm_bindgen_test]
    fn test_note_with_bad_bucket_skipped() {
        let note = timeline::Note {
            id: "n".to_string(),
            day: "2024-07-01".to_string(),
            bucket: "9am".to_string(),
            content: "x".to_string(),
            created_at: String::new(),
        };
        assert!(note_from_proto(note).is_none());
    }

    #[wasm_bindgen_test]
    fn test_day_format() {
        let day = parse_day(" 2024-02-29 ").unwrap();
        assert_eq!(format_day(day), "2024-02-29");
        assert!(parse_day("2024-02-30").is_none());
    }
}
