use photoline_core::{ElementKind, Placement, PlacementRecord, TimeBucket};
use photoline_proto::timeline;

#[derive(thiserror::Error, Debug)]
pub enum PlacementError {
    #[error("Placement coordinates must be finite numbers")]
    NonFinite,

    #[error("Element belongs to bucket {expected}, not {got}")]
    BucketMismatch { expected: TimeBucket, got: TimeBucket },
}

impl PlacementError {
    pub fn to_code(&self) -> tonic::Code {
        match self {
            PlacementError::NonFinite => tonic::Code::InvalidArgument,
            PlacementError::BucketMismatch { .. } => tonic::Code::FailedPrecondition,
        }
    }
}

impl From<PlacementError> for tonic::Status {
    fn from(err: PlacementError) -> Self {
        tonic::Status::new(err.to_code(), err.to_string())
    }
}

/// Check a placement sent by a client and bring its size into the kind's
/// range. Only the size field matching `kind` is kept.
pub fn normalize(kind: ElementKind, record: &PlacementRecord) -> Result<PlacementRecord, PlacementError> {
    if !record.x.is_finite() || !record.y.is_finite() {
        return Err(PlacementError::NonFinite);
    }
    if record.width.is_some_and(|w| !w.is_finite()) {
        return Err(PlacementError::NonFinite);
    }
    Ok(Placement::from_record(kind, record).to_record(kind, record.revision))
}

pub fn from_proto(placement: &timeline::Placement) -> PlacementRecord {
    PlacementRecord {
        x: placement.x,
        y: placement.y,
        width: placement.width,
        font_size: placement.font_size,
        revision: placement.revision,
    }
}

pub fn to_proto(record: &PlacementRecord) -> timeline::Placement {
    timeline::Placement {
        x: record.x,
        y: record.y,
        width: record.width,
        font_size: record.font_size,
        revision: record.revision,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(width: Option<f64>, font_size: Option<u32>) -> PlacementRecord {
        PlacementRecord {
            x: 12.0,
            y: 34.0,
            width,
            font_size,
            revision: 2,
        }
    }

    #[test]
    fn test_normalize_clamps_sizes() {
        let photo = normalize(ElementKind::Photo, &record(Some(1200.0), Some(30))).unwrap();
        assert_eq!(photo.width, Some(400.0));
        assert_eq!(photo.font_size, None);
        assert_eq!(photo.revision, 2);

        let text = normalize(ElementKind::Text, &record(None, Some(4))).unwrap();
        assert_eq!(text.font_size, Some(10));
        assert_eq!(text.width, None);
    }

    #[test]
    fn test_normalize_rejects_non_finite() {
        let mut bad = record(Some(100.0), None);
        bad.y = f64::INFINITY;
        assert!(matches!(normalize(ElementKind::Photo, &bad), Err(PlacementError::NonFinite)));
        assert!(matches!(
            normalize(ElementKind::Photo, &record(Some(f64::NAN), None)),
            Err(PlacementError::NonFinite)
        ));
    }
}
