use photoline_core::ElementId;
use photoline_proto::timeline::{self, *};
use tonic::{Request, Response, Status};

use crate::{
    common::{note::StoredNote, photo::StoredPhoto, placement},
    service::database::Database,
    util::{self, required_str},
};

pub struct TimelineServiceImpl {
    database: Database,
}

impl TimelineServiceImpl {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

fn element_id(s: &str) -> Result<ElementId, Status> {
    required_str(s, "Element ID is required, but got empty string")?;
    Ok(ElementId::new(s.trim()))
}

#[tonic::async_trait]
impl timeline::timeline_service_server::TimelineService for TimelineServiceImpl {
    async fn list_day(
        &self,
        request: Request<ListDayRequest>,
    ) -> Result<Response<ListDayResponse>, Status> {
        let req = request.into_inner();
        let day = util::parse_day(&req.day)?;
        let listing = self.database.list_day(day);

        tracing::debug!(
            %day,
            photos = listing.photos.len(),
            notes = listing.notes.len(),
            "Day listed"
        );

        Ok(Response::new(ListDayResponse {
            photos: listing.photos.iter().map(StoredPhoto::to_proto).collect(),
            notes: listing.notes.iter().map(StoredNote::to_proto).collect(),
            placements: listing
                .placements
                .iter()
                .map(|(element, bucket, record)| PlacementEntry {
                    element_id: element.to_string(),
                    bucket: bucket.to_string(),
                    placement: Some(placement::to_proto(record)),
                })
                .collect(),
        }))
    }

    async fn add_photo(
        &self,
        request: Request<AddPhotoRequest>,
    ) -> Result<Response<AddPhotoResponse>, Status> {
        let req = request.into_inner();
        required_str(&req.url, "Photo URL is required, but got empty string")?;
        let taken_at = util::parse_taken_at(&req.taken_at)?;
        if let Some(day) = req.day.as_deref() {
            let day = util::parse_day(day)?;
            if day != taken_at.date() {
                return Err(Status::invalid_argument(format!(
                    "Photo taken at {taken_at} does not belong to {day}"
                )));
            }
        }

        let photo = self.database.add_photo(StoredPhoto::new(
            taken_at,
            req.url.trim().to_string(),
            req.caption,
        ));

        tracing::info!(photo_id = %photo.id, bucket = %photo.bucket(), "Photo added");

        Ok(Response::new(AddPhotoResponse {
            photo: Some(photo.to_proto()),
        }))
    }

    async fn set_background_removed(
        &self,
        request: Request<SetBackgroundRemovedRequest>,
    ) -> Result<Response<SetBackgroundRemovedResponse>, Status> {
        let req = request.into_inner();
        let photo_id = util::tonic_uuid!(&req.photo_id)?;
        required_str(&req.url, "Cut-out URL is required, but got empty string")?;

        let photo = self
            .database
            .set_background_removed(&photo_id, req.url.trim().to_string())?;

        tracing::info!(photo_id = %photo_id, "Background removed photo stored");

        Ok(Response::new(SetBackgroundRemovedResponse {
            photo: Some(photo.to_proto()),
        }))
    }

    async fn delete_photo(
        &self,
        request: Request<DeletePhotoRequest>,
    ) -> Result<Response<DeletePhotoResponse>, Status> {
        let req = request.into_inner();
        let photo_id = util::tonic_uuid!(&req.photo_id)?;
        let removed = self.database.delete_photo(&photo_id)?;

        tracing::info!(photo_id = %photo_id, removed_placements = removed, "Photo deleted");

        Ok(Response::new(DeletePhotoResponse {
            removed_placements: u32::try_from(removed).unwrap_or(u32::MAX),
        }))
    }

    async fn add_note(
        &self,
        request: Request<AddNoteRequest>,
    ) -> Result<Response<AddNoteResponse>, Status> {
        let req = request.into_inner();
        let day = util::parse_day(&req.day)?;
        let bucket = util::parse_bucket(&req.bucket)?;
        let note = self.database.add_note(day, bucket, &req.content)?;

        tracing::info!(note_id = %note.id, %bucket, "Note added");

        Ok(Response::new(AddNoteResponse {
            note: Some(note.to_proto()),
        }))
    }

    async fn update_note(
        &self,
        request: Request<UpdateNoteRequest>,
    ) -> Result<Response<UpdateNoteResponse>, Status> {
        let req = request.into_inner();
        let note_id = util::tonic_uuid!(&req.note_id)?;
        let note = self.database.update_note(&note_id, &req.content)?;

        tracing::info!(note_id = %note_id, "Note updated");

        Ok(Response::new(UpdateNoteResponse {
            note: Some(note.to_proto()),
        }))
    }

    async fn delete_note(
        &self,
        request: Request<DeleteNoteRequest>,
    ) -> Result<Response<DeleteNoteResponse>, Status> {
        let req = request.into_inner();
        let note_id = util::tonic_uuid!(&req.note_id)?;
        let removed = self.database.delete_note(&note_id)?;

        tracing::info!(note_id = %note_id, removed_placements = removed, "Note deleted");

        Ok(Response::new(DeleteNoteResponse {
            removed_placements: u32::try_from(removed).unwrap_or(u32::MAX),
        }))
    }

    async fn load_placement(
        &self,
        request: Request<LoadPlacementRequest>,
    ) -> Result<Response<LoadPlacementResponse>, Status> {
        let req = request.into_inner();
        let element_id = element_id(&req.element_id)?;
        let bucket = util::parse_bucket(&req.bucket)?;

        let placement = self
            .database
            .load_placement(&element_id, bucket)
            .map(|record| placement::to_proto(&record));

        Ok(Response::new(LoadPlacementResponse { placement }))
    }

    async fn save_placement(
        &self,
        request: Request<SavePlacementRequest>,
    ) -> Result<Response<SavePlacementResponse>, Status> {
        let req = request.into_inner();
        let element_id = element_id(&req.element_id)?;
        let bucket = util::parse_bucket(&req.bucket)?;
        let record = placement::from_proto(&util::tonic_required!(req.placement)?);

        let outcome = self
            .database
            .save_placement(&element_id, bucket, &record)?;

        if outcome.accepted {
            tracing::debug!(element = %element_id, %bucket, revision = record.revision, "Placement saved");
        } else {
            tracing::info!(
                element = %element_id,
                %bucket,
                revision = record.revision,
                stored = outcome.stored_revision,
                "Stale placement save ignored"
            );
        }

        Ok(Response::new(SavePlacementResponse {
            accepted: outcome.accepted,
            stored_revision: outcome.stored_revision,
        }))
    }
}
