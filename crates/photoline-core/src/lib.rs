//! Photoline Core Library
//!
//! Geometry and gesture bookkeeping for the draggable, resizable elements of
//! a photo timeline, plus the day/hour grouping the timeline is built from.
//!
//! Nothing here performs I/O. Persistence goes through [`PositionStore`],
//! implemented by the client over gRPC-Web and by [`MemoryPositionStore`]
//! in-process.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

pub mod bucket;
pub mod drag;
pub mod element;
pub mod geometry;
pub mod gesture;
pub mod resize;
pub mod store;
pub mod timeline;

pub use bucket::{BucketParseError, TimeBucket};
pub use element::{
    DEFAULT_FONT_SIZE, DEFAULT_PHOTO_WIDTH, ElementId, ElementKind, FONT_SIZE_RANGE,
    PHOTO_WIDTH_RANGE, Placement, PlacementRecord, PositionedElement, SizeRange,
};
pub use geometry::{
    ClampConfig, DEFAULT_EDGE_MARGIN, Layout, MAX_EDGE_MARGIN, Point, Rect, Size, clamp_position,
};
pub use gesture::{CommitTicket, ElementState, GestureArena, GestureMode, Resolution};
pub use store::{MemoryPositionStore, PositionStore, StoreError, persist};
pub use timeline::{
    DayTimeline, MAX_NOTE_LENGTH, NoteContentError, NoteEntry, PhotoEntry, SUMMARY_LABEL_CHARS,
    SUMMARY_THUMBNAILS, SectionSummary, TimelineSection, validate_note_content,
};
