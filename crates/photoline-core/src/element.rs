//! Timeline elements and their persisted placement.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bucket::TimeBucket;
use crate::geometry::Point;

/// Photo width bounds in pixels.
pub const PHOTO_WIDTH_RANGE: SizeRange = SizeRange::new(80.0, 400.0);
/// Text font size bounds in pixels.
pub const FONT_SIZE_RANGE: SizeRange = SizeRange::new(10.0, 60.0);

pub const DEFAULT_PHOTO_WIDTH: f64 = 200.0;
pub const DEFAULT_FONT_SIZE: f64 = 18.0;

/// Identifier of a photo or text note. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Photo,
    Text,
}

impl ElementKind {
    /// Allowed range for the element's resizable scalar.
    pub const fn size_range(self) -> SizeRange {
        match self {
            ElementKind::Photo => PHOTO_WIDTH_RANGE,
            ElementKind::Text => FONT_SIZE_RANGE,
        }
    }

    pub const fn default_size(self) -> f64 {
        match self {
            ElementKind::Photo => DEFAULT_PHOTO_WIDTH,
            ElementKind::Text => DEFAULT_FONT_SIZE,
        }
    }

    /// Clamp a proposed size. Font sizes are whole pixels.
    pub fn normalize_size(self, size: f64) -> f64 {
        let clamped = self.size_range().clamp(size);
        match self {
            ElementKind::Photo => clamped,
            ElementKind::Text => clamped.round(),
        }
    }

    /// Project a pointer delta onto the resize axis.
    ///
    /// Both handles sit at the bottom-right corner and follow horizontal
    /// motion: a photo gains width, a note gains font size, pixel for pixel.
    pub fn resize_delta(self, delta: Point) -> f64 {
        match self {
            ElementKind::Photo | ElementKind::Text => delta.x,
        }
    }

    /// Only text notes can enter inline editing.
    pub const fn is_editable(self) -> bool {
        matches!(self, ElementKind::Text)
    }
}

/// Closed `[min, max]` interval for a resizable scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl SizeRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Position and size of an element inside its section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Point,
    /// Width in pixels for photos, font size in pixels for text.
    pub size: f64,
}

impl Placement {
    pub const fn new(position: Point, size: f64) -> Self {
        Self { position, size }
    }

    /// Layout used when nothing has been stored for the element yet.
    ///
    /// `index` is the element's order among siblings of the same kind so a
    /// fresh section cascades instead of stacking everything at one spot.
    pub fn default_for(kind: ElementKind, index: usize) -> Self {
        let i = index as f64;
        let position = match kind {
            ElementKind::Photo => Point::new(16.0 + 24.0 * i, 16.0 + 24.0 * i),
            ElementKind::Text => Point::new(16.0, 16.0 + 32.0 * i),
        };
        Self::new(position, kind.default_size())
    }

    /// Rebuild a placement from its stored record, repairing out-of-range or
    /// missing sizes.
    pub fn from_record(kind: ElementKind, record: &PlacementRecord) -> Self {
        let size = match kind {
            ElementKind::Photo => record.width,
            ElementKind::Text => record.font_size.map(f64::from),
        }
        .map_or(kind.default_size(), |size| kind.normalize_size(size));
        let position = Point::new(record.x, record.y);
        let position = if position.is_finite() {
            position
        } else {
            Placement::default_for(kind, 0).position
        };
        Self::new(position, size)
    }

    pub fn to_record(&self, kind: ElementKind, revision: u64) -> PlacementRecord {
        let size = kind.normalize_size(self.size);
        match kind {
            ElementKind::Photo => PlacementRecord {
                x: self.position.x,
                y: self.position.y,
                width: Some(size),
                font_size: None,
                revision,
            },
            ElementKind::Text => PlacementRecord {
                x: self.position.x,
                y: self.position.y,
                width: None,
                // normalize_size keeps this within 10..=60
                font_size: Some(size as u32),
                revision,
            },
        }
    }
}

/// Persisted shape of a placement, keyed by `(element id, time bucket)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRecord {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    /// Per-element commit counter; a store never replaces a newer revision
    /// with an older one.
    #[serde(default)]
    pub revision: u64,
}

/// An element placed in a time bucket section.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub id: ElementId,
    pub bucket: TimeBucket,
    pub kind: ElementKind,
    pub placement: Placement,
}

impl PositionedElement {
    pub fn new(id: ElementId, bucket: TimeBucket, kind: ElementKind, placement: Placement) -> Self {
        Self {
            id,
            bucket,
            kind,
            placement,
        }
    }
}
