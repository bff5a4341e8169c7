use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use photoline_core::TimeBucket;
use photoline_proto::timeline;

use crate::util::{DATE_FORMAT, DATETIME_FORMAT};

#[derive(Debug, Clone)]
pub struct StoredPhoto {
    pub id: uuid::Uuid,
    pub day: NaiveDate,
    pub taken_at: NaiveDateTime,
    pub url: String,
    pub caption: Option<String>,
    pub background_removed_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StoredPhoto {
    pub fn new(taken_at: NaiveDateTime, url: String, caption: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            day: taken_at.date(),
            taken_at,
            url,
            caption: caption.filter(|c| !c.trim().is_empty()),
            background_removed_url: None,
            created_at: Utc::now(),
        }
    }

    /// Hour section the photo belongs to.
    pub fn bucket(&self) -> TimeBucket {
        TimeBucket::of(&self.taken_at)
    }

    pub fn to_proto(&self) -> timeline::Photo {
        timeline::Photo {
            id: self.id.to_string(),
            day: self.day.format(DATE_FORMAT).to_string(),
            taken_at: self.taken_at.format(DATETIME_FORMAT).to_string(),
            url: self.url.clone(),
            caption: self.caption.clone(),
            background_removed_url: self.background_removed_url.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_and_day_follow_capture_time() {
        let taken_at = NaiveDate::from_ymd_opt(2024, 3, 2)
            .unwrap()
            .and_hms_opt(18, 42, 7)
            .unwrap();
        let photo = StoredPhoto::new(taken_at, "https://img/1.jpg".to_string(), Some("  ".to_string()));
        assert_eq!(photo.bucket().to_string(), "18:00");
        assert_eq!(photo.day, taken_at.date());
        assert_eq!(photo.caption, None);

        let proto = photo.to_proto();
        assert_eq!(proto.day, "2024-03-02");
        assert_eq!(proto.taken_at, "2024-03-02T18:42:07");
    }
}
