use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use photoline_core::{ElementId, ElementKind, NoteContentError, PlacementRecord, TimeBucket};
use thiserror::Error;

use crate::common::{
    note::StoredNote,
    photo::StoredPhoto,
    placement::{self, PlacementError},
};

/// In-memory tables. One lock covers all of them so deleting an element and
/// its placements happens atomically.
#[derive(Default)]
struct Tables {
    photos: HashMap<uuid::Uuid, StoredPhoto>,
    notes: HashMap<uuid::Uuid, StoredNote>,
    placements: HashMap<(ElementId, TimeBucket), PlacementRecord>,
}

impl Tables {
    /// Kind and bucket of a photo or note, looked up by its string id.
    fn element(&self, id: &ElementId) -> Option<(ElementKind, TimeBucket)> {
        let uuid = uuid::Uuid::parse_str(id.as_str()).ok()?;
        if let Some(photo) = self.photos.get(&uuid) {
            return Some((ElementKind::Photo, photo.bucket()));
        }
        self.notes
            .get(&uuid)
            .map(|note| (ElementKind::Text, note.bucket))
    }

    fn remove_placements(&mut self, id: &uuid::Uuid) -> usize {
        let id = id.to_string();
        let before = self.placements.len();
        self.placements
            .retain(|(element, _), _| element.as_str() != id);
        before - self.placements.len()
    }
}

#[derive(Clone, Default)]
pub struct Database {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Photo not found")]
    PhotoNotFound,

    #[error("Note not found")]
    NoteNotFound,

    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    NoteContent(#[from] NoteContentError),
}

impl DatabaseError {
    fn to_code(&self) -> tonic::Code {
        match self {
            DatabaseError::PhotoNotFound
            | DatabaseError::NoteNotFound
            | DatabaseError::ElementNotFound(_) => tonic::Code::NotFound,
            DatabaseError::Placement(err) => err.to_code(),
            DatabaseError::NoteContent(_) => tonic::Code::InvalidArgument,
        }
    }
}

impl From<DatabaseError> for tonic::Status {
    fn from(err: DatabaseError) -> Self {
        tonic::Status::new(err.to_code(), err.to_string())
    }
}

/// Everything needed to render one day.
#[derive(Debug, Default)]
pub struct DayListing {
    pub photos: Vec<StoredPhoto>,
    pub notes: Vec<StoredNote>,
    pub placements: Vec<(ElementId, TimeBucket, PlacementRecord)>,
}

/// Result of a placement write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// False when a newer revision was already stored.
    pub accepted: bool,
    pub stored_revision: u64,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_day(&self, day: NaiveDate) -> DayListing {
        let tables = self.tables.read();

        let mut photos: Vec<StoredPhoto> = tables
            .photos
            .values()
            .filter(|p| p.day == day)
            .cloned()
            .collect();
        photos.sort_by_key(|p| p.taken_at);

        let mut notes: Vec<StoredNote> = tables
            .notes
            .values()
            .filter(|n| n.day == day)
            .cloned()
            .collect();
        notes.sort_by_key(|n| n.created_at);

        let ids: Vec<String> = photos
            .iter()
            .map(|p| p.id.to_string())
            .chain(notes.iter().map(|n| n.id.to_string()))
            .collect();
        let placements = tables
            .placements
            .iter()
            .filter(|((element, _), _)| ids.iter().any(|id| id == element.as_str()))
            .map(|((element, bucket), record)| (element.clone(), *bucket, *record))
            .collect();

        DayListing {
            photos,
            notes,
            placements,
        }
    }

    pub fn add_photo(&self, photo: StoredPhoto) -> StoredPhoto {
        let mut tables = self.tables.write();
        tables.photos.insert(photo.id, photo.clone());
        photo
    }

    /// Record the cut-out produced by the background removal service.
    pub fn set_background_removed(
        &self,
        photo_id: &uuid::Uuid,
        url: String,
    ) -> Result<StoredPhoto, DatabaseError> {
        let mut tables = self.tables.write();
        let Some(photo) = tables.photos.get_mut(photo_id) else {
            return Err(DatabaseError::PhotoNotFound);
        };
        photo.background_removed_url = Some(url);
        Ok(photo.clone())
    }

    /// Delete a photo and every placement stored for it.
    pub fn delete_photo(&self, photo_id: &uuid::Uuid) -> Result<usize, DatabaseError> {
        let mut tables = self.tables.write();
        if tables.photos.remove(photo_id).is_none() {
            return Err(DatabaseError::PhotoNotFound);
        }
        Ok(tables.remove_placements(photo_id))
    }

    pub fn add_note(
        &self,
        day: NaiveDate,
        bucket: TimeBucket,
        content: &str,
    ) -> Result<StoredNote, DatabaseError> {
        let content = photoline_core::validate_note_content(content)?;
        let note = StoredNote::new(day, bucket, content);
        let mut tables = self.tables.write();
        tables.notes.insert(note.id, note.clone());
        Ok(note)
    }

    pub fn update_note(&self, note_id: &uuid::Uuid, content: &str) -> Result<StoredNote, DatabaseError> {
        let content = photoline_core::validate_note_content(content)?;
        let mut tables = self.tables.write();
        let Some(note) = tables.notes.get_mut(note_id) else {
            return Err(DatabaseError::NoteNotFound);
        };
        note.content = content;
        note.updated_at = Utc::now();
        Ok(note.clone())
    }

    /// Delete a note and every placement stored for it.
    pub fn delete_note(&self, note_id: &uuid::Uuid) -> Result<usize, DatabaseError> {
        let mut tables = self.tables.write();
        if tables.notes.remove(note_id).is_none() {
            return Err(DatabaseError::NoteNotFound);
        }
        Ok(tables.remove_placements(note_id))
    }

    pub fn load_placement(&self, element_id: &ElementId, bucket: TimeBucket) -> Option<PlacementRecord> {
        let tables = self.tables.read();
        tables.placements.get(&(element_id.clone(), bucket)).copied()
    }

    /// Store a placement unless a newer revision is already there.
    ///
    /// Saves for the same element are not ordered on the wire, so an older
    /// gesture's save can arrive after a newer one; it is dropped here.
    pub fn save_placement(
        &self,
        element_id: &ElementId,
        bucket: TimeBucket,
        record: &PlacementRecord,
    ) -> Result<SaveOutcome, DatabaseError> {
        let mut tables = self.tables.write();
        let Some((kind, expected)) = tables.element(element_id) else {
            return Err(DatabaseError::ElementNotFound(element_id.clone()));
        };
        if expected != bucket {
            return Err(PlacementError::BucketMismatch {
                expected,
                got: bucket,
            }
            .into());
        }
        let record = placement::normalize(kind, record)?;

        let key = (element_id.clone(), bucket);
        if let Some(stored) = tables.placements.get(&key)
            && stored.revision > record.revision
        {
            return Ok(SaveOutcome {
                accepted: false,
                stored_revision: stored.revision,
            });
        }
        tables.placements.insert(key, record);
        Ok(SaveOutcome {
            accepted: true,
            stored_revision: record.revision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()
    }

    fn at(hour: u32) -> NaiveDateTime {
        day().and_hms_opt(hour, 20, 0).unwrap()
    }

    fn record(x: f64, revision: u64) -> PlacementRecord {
        PlacementRecord {
            x,
            y: 10.0,
            width: Some(150.0),
            font_size: None,
            revision,
        }
    }

    fn photo_in(db: &Database, hour: u32) -> (StoredPhoto, ElementId) {
        let photo = db.add_photo(StoredPhoto::new(at(hour), "https://img/p.jpg".to_string(), None));
        let id = ElementId::new(photo.id.to_string());
        (photo, id)
    }

    #[test]
    fn test_save_and_load_placement() {
        let db = Database::new();
        let (photo, id) = photo_in(&db, 9);
        let outcome = db.save_placement(&id, photo.bucket(), &record(40.0, 1)).unwrap();
        assert!(outcome.accepted);
        assert_eq!(db.load_placement(&id, photo.bucket()).unwrap().x, 40.0);
    }

    #[test]
    fn test_older_revision_is_not_applied() {
        let db = Database::new();
        let (photo, id) = photo_in(&db, 9);
        db.save_placement(&id, photo.bucket(), &record(1.0, 3)).unwrap();

        let outcome = db.save_placement(&id, photo.bucket(), &record(2.0, 2)).unwrap();
        assert_eq!(
            outcome,
            SaveOutcome {
                accepted: false,
                stored_revision: 3
            }
        );
        assert_eq!(db.load_placement(&id, photo.bucket()).unwrap().x, 1.0);

        let retried = db.save_placement(&id, photo.bucket(), &record(5.0, 3)).unwrap();
        assert!(retried.accepted);
    }

    #[test]
    fn test_save_for_unknown_element() {
        let db = Database::new();
        let id = ElementId::new(uuid::Uuid::new_v4().to_string());
        let err = db
            .save_placement(&id, TimeBucket::new(3).unwrap(), &record(0.0, 1))
            .unwrap_err();
        assert!(matches!(err, DatabaseError::ElementNotFound(_)));
        assert_eq!(tonic::Status::from(err).code(), tonic::Code::NotFound);
    }

    #[test]
    fn test_save_in_wrong_bucket() {
        let db = Database::new();
        let (_, id) = photo_in(&db, 9);
        let err = db
            .save_placement(&id, TimeBucket::new(10).unwrap(), &record(0.0, 1))
            .unwrap_err();
        assert_eq!(tonic::Status::from(err).code(), tonic::Code::FailedPrecondition);
    }

    #[test]
    fn test_delete_photo_cascades_placements() {
        let db = Database::new();
        let (photo, id) = photo_in(&db, 9);
        let (other, other_id) = photo_in(&db, 9);
        db.save_placement(&id, photo.bucket(), &record(1.0, 1)).unwrap();
        db.save_placement(&other_id, other.bucket(), &record(1.0, 1)).unwrap();

        assert_eq!(db.delete_photo(&photo.id).unwrap(), 1);
        assert!(db.load_placement(&id, photo.bucket()).is_none());
        assert!(db.load_placement(&other_id, other.bucket()).is_some());
        assert!(matches!(db.delete_photo(&photo.id), Err(DatabaseError::PhotoNotFound)));
    }

    #[test]
    fn test_note_lifecycle() {
        let db = Database::new();
        let bucket = TimeBucket::new(14).unwrap();
        let note = db.add_note(day(), bucket, "  lunch  ").unwrap();
        assert_eq!(note.content, "lunch");

        let id = ElementId::new(note.id.to_string());
        let text = PlacementRecord {
            x: 0.0,
            y: 0.0,
            width: None,
            font_size: Some(80),
            revision: 1,
        };
        db.save_placement(&id, bucket, &text).unwrap();
        assert_eq!(db.load_placement(&id, bucket).unwrap().font_size, Some(60));

        let updated = db.update_note(&note.id, "dinner").unwrap();
        assert_eq!(updated.content, "dinner");
        assert!(matches!(
            db.update_note(&note.id, "   "),
            Err(DatabaseError::NoteContent(NoteContentError::Empty))
        ));

        assert_eq!(db.delete_note(&note.id).unwrap(), 1);
        assert!(db.list_day(day()).notes.is_empty());
    }

    #[test]
    fn test_list_day_filters_and_orders() {
        let db = Database::new();
        let (late, late_id) = photo_in(&db, 16);
        let (early, _) = photo_in(&db, 8);
        db.add_photo(StoredPhoto::new(
            day().succ_opt().unwrap().and_hms_opt(8, 0, 0).unwrap(),
            "https://img/tomorrow.jpg".to_string(),
            None,
        ));
        db.save_placement(&late_id, late.bucket(), &record(3.0, 1)).unwrap();

        let listing = db.list_day(day());
        let ids: Vec<_> = listing.photos.iter().map(|p| p.id).collect();
        assert_eq!(ids, [early.id, late.id]);
        assert_eq!(listing.placements.len(), 1);
        assert_eq!(listing.placements[0].0, late_id);
    }

    #[test]
    fn test_set_background_removed() {
        let db = Database::new();
        let (photo, _) = photo_in(&db, 11);
        let updated = db
            .set_background_removed(&photo.id, "https://img/p-cut.png".to_string())
            .unwrap();
        assert_eq!(updated.background_removed_url.as_deref(), Some("https://img/p-cut.png"));
        assert!(matches!(
            db.set_background_removed(&uuid::Uuid::new_v4(), String::new()),
            Err(DatabaseError::PhotoNotFound)
        ));
    }
}
