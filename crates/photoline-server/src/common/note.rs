use chrono::{DateTime, NaiveDate, Utc};
use photoline_core::TimeBucket;
use photoline_proto::timeline;

use crate::util::DATE_FORMAT;

/// A text note pinned to one hour of a day.
#[derive(Debug, Clone)]
pub struct StoredNote {
    pub id: uuid::Uuid,
    pub day: NaiveDate,
    pub bucket: TimeBucket,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredNote {
    /// `content` must already be validated.
    pub fn new(day: NaiveDate, bucket: TimeBucket, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4(),
            day,
            bucket,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_proto(&self) -> timeline::Note {
        timeline::Note {
            id: self.id.to_string(),
            day: self.day.format(DATE_FORMAT).to_string(),
            bucket: self.bucket.to_string(),
            content: self.content.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}
