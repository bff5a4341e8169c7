//! Placement persistence boundary.
//!
//! The arena never talks to a store itself. A finished gesture yields a
//! [`CommitTicket`]; the caller runs [`persist`] (usually fire-and-forget on
//! the UI executor) and feeds the result back through
//! [`GestureArena::resolve`](crate::gesture::GestureArena::resolve). There
//! is no retry: a failed save just reverts the element.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;
use thiserror::Error;

use crate::bucket::TimeBucket;
use crate::element::{ElementId, PlacementRecord};
use crate::gesture::CommitTicket;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unreachable: {0}")]
    Transport(String),

    #[error("Store rejected placement: {0}")]
    Rejected(String),

    #[error("Element not found: {0}")]
    NotFound(String),
}

/// Key-value access to placements keyed by `(element id, time bucket)`.
#[allow(async_fn_in_trait)]
pub trait PositionStore {
    /// Stored placement, or `None` when the element should use its default
    /// layout.
    async fn load(
        &self,
        id: &ElementId,
        bucket: TimeBucket,
    ) -> Result<Option<PlacementRecord>, StoreError>;

    async fn save(
        &self,
        id: &ElementId,
        bucket: TimeBucket,
        record: PlacementRecord,
    ) -> Result<(), StoreError>;
}

/// Write the ticket's clamped placement to `store`.
pub async fn persist<S>(store: &S, ticket: &CommitTicket) -> Result<(), StoreError>
where
    S: PositionStore + ?Sized,
{
    store
        .save(&ticket.element_id, ticket.bucket, ticket.record())
        .await
}

/// In-process store. Backs tests and previews without a server.
#[derive(Debug, Default)]
pub struct MemoryPositionStore {
    records: RwLock<HashMap<(ElementId, TimeBucket), PlacementRecord>>,
    saves: AtomicUsize,
    reject_saves: AtomicBool,
}

impl MemoryPositionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following save fail with [`StoreError::Transport`].
    pub fn set_reject_saves(&self, reject: bool) {
        self.reject_saves.store(reject, Ordering::SeqCst);
    }

    /// Number of save calls received, failed ones included.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn get(&self, id: &ElementId, bucket: TimeBucket) -> Option<PlacementRecord> {
        self.records.read().get(&(id.clone(), bucket)).copied()
    }

    pub fn remove_element(&self, id: &ElementId) -> usize {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|(element, _), _| element != id);
        before - records.len()
    }
}

impl PositionStore for MemoryPositionStore {
    async fn load(
        &self,
        id: &ElementId,
        bucket: TimeBucket,
    ) -> Result<Option<PlacementRecord>, StoreError> {
        Ok(self.get(id, bucket))
    }

    async fn save(
        &self,
        id: &ElementId,
        bucket: TimeBucket,
        record: PlacementRecord,
    ) -> Result<(), StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.reject_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("saves disabled".to_string()));
        }
        let mut records = self.records.write();
        let key = (id.clone(), bucket);
        if records
            .get(&key)
            .is_some_and(|stored| stored.revision > record.revision)
        {
            tracing::debug!(element = %id, revision = record.revision, "older revision not stored");
            return Ok(());
        }
        records.insert(key, record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, Placement, PositionedElement};
    use crate::geometry::{Layout, Point, Rect, Size};
    use crate::gesture::{GestureArena, Resolution};

    fn bucket() -> TimeBucket {
        TimeBucket::new(9).unwrap()
    }

    fn arena_with_photo() -> (GestureArena, ElementId) {
        let mut arena = GestureArena::default();
        let id = ElementId::from("photo");
        arena.insert(
            PositionedElement::new(
                id.clone(),
                bucket(),
                ElementKind::Photo,
                Placement::new(Point::new(100.0, 100.0), 200.0),
            ),
            0,
        );
        (arena, id)
    }

    fn layout() -> Layout {
        Layout::new(Size::new(200.0, 150.0), Rect::new(0.0, 0.0, 900.0, 480.0))
    }

    #[tokio::test]
    async fn test_one_save_per_gesture() {
        let store = MemoryPositionStore::new();
        let (mut arena, id) = arena_with_photo();

        arena.begin_drag(&id, Point::new(0.0, 0.0));
        for step in 1..=10 {
            let step = f64::from(step);
            arena.update_drag(&id, Point::new(5.0 * step, 2.0 * step), Some(layout()));
        }
        let ticket = arena.end_drag(&id, Some(layout())).unwrap();
        assert_eq!(store.save_count(), 0);

        let result = persist(&store, &ticket).await;
        assert_eq!(arena.resolve(&ticket, result), Resolution::Committed);
        assert_eq!(store.save_count(), 1);

        let stored = store.get(&id, bucket()).unwrap();
        assert_eq!((stored.x, stored.y), (150.0, 120.0));
        assert_eq!(stored.width, Some(200.0));
    }

    #[tokio::test]
    async fn test_rejected_save_reverts() {
        let store = MemoryPositionStore::new();
        store.set_reject_saves(true);
        let (mut arena, id) = arena_with_photo();

        arena.begin_drag(&id, Point::ORIGIN);
        arena.update_drag(&id, Point::new(60.0, 0.0), Some(layout()));
        let ticket = arena.end_drag(&id, Some(layout())).unwrap();

        let result = persist(&store, &ticket).await;
        assert!(matches!(result, Err(StoreError::Transport(_))));
        assert_eq!(arena.resolve(&ticket, result), Resolution::Reverted);
        assert_eq!(arena.live(&id).unwrap().position, Point::new(100.0, 100.0));
        assert!(store.get(&id, bucket()).is_none());
    }

    #[tokio::test]
    async fn test_older_revision_not_stored() {
        let store = MemoryPositionStore::new();
        let id = ElementId::from("photo");
        let newer = Placement::new(Point::new(1.0, 1.0), 100.0).to_record(ElementKind::Photo, 5);
        let older = Placement::new(Point::new(9.0, 9.0), 100.0).to_record(ElementKind::Photo, 4);

        store.save(&id, bucket(), newer).await.unwrap();
        store.save(&id, bucket(), older).await.unwrap();
        assert_eq!(store.load(&id, bucket()).await.unwrap(), Some(newer));
    }

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let store = MemoryPositionStore::new();
        let loaded = store.load(&ElementId::from("nope"), bucket()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_remove_element_drops_all_buckets() {
        let store = MemoryPositionStore::new();
        let id = ElementId::from("note");
        let record = Placement::new(Point::ORIGIN, 18.0).to_record(ElementKind::Text, 1);
        store.save(&id, bucket(), record).await.unwrap();
        store.save(&id, TimeBucket::new(10).unwrap(), record).await.unwrap();
        assert_eq!(store.remove_element(&id), 2);
        assert!(store.get(&id, bucket()).is_none());
    }
}
