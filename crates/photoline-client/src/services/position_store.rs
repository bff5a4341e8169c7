//! [`PositionStore`] backed by the timeline gRPC-Web service.

use photoline_core::{ElementId, PlacementRecord, PositionStore, StoreError, TimeBucket};
use photoline_proto::timeline::{LoadPlacementRequest, SavePlacementRequest};
use tonic::{Code, Status};

use super::TimelineClient;
use super::convert::{placement_from_proto, placement_to_proto};

pub struct GrpcPositionStore {
    client: TimelineClient,
}

impl GrpcPositionStore {
    pub fn new(client: TimelineClient) -> Self {
        Self { client }
    }
}

pub fn store_error(status: &Status) -> StoreError {
    let message = status.message().to_string();
    match status.code() {
        Code::NotFound => StoreError::NotFound(message),
        Code::InvalidArgument | Code::FailedPrecondition => StoreError::Rejected(message),
        code => StoreError::Transport(format!("{code:?}: {message}")),
    }
}

impl PositionStore for GrpcPositionStore {
    async fn load(
        &self,
        id: &ElementId,
        bucket: TimeBucket,
    ) -> Result<Option<PlacementRecord>, StoreError> {
        let mut client = self.client.clone();
        let response = client
            .load_placement(LoadPlacementRequest {
                element_id: id.to_string(),
                bucket: bucket.to_string(),
            })
            .await
            .map_err(|status| store_error(&status))?;

        Ok(response
            .into_inner()
            .placement
            .as_ref()
            .map(placement_from_proto))
    }

    async fn save(
        &self,
        id: &ElementId,
        bucket: TimeBucket,
        record: PlacementRecord,
    ) -> Result<(), StoreError> {
        let mut client = self.client.clone();
        let response = client
            .save_placement(SavePlacementRequest {
                element_id: id.to_string(),
                bucket: bucket.to_string(),
                placement: Some(placement_to_proto(&record)),
            })
            .await
            .map_err(|status| store_error(&status))?
            .into_inner();

        // A newer save from this client already landed; the arena treats
        // this ticket as stale anyway.
        if !response.accepted {
            tracing::debug!(
                element = %id,
                %bucket,
                revision = record.revision,
                stored = response.stored_revision,
                "server kept newer placement"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_store_error_mapping() {
        assert_eq!(
            store_error(&Status::not_found("gone")),
            StoreError::NotFound("gone".to_string())
        );
        assert_eq!(
            store_error(&Status::failed_precondition("wrong bucket")),
            StoreError::Rejected("wrong bucket".to_string())
        );
        assert!(matches!(
            store_error(&Status::unavailable("offline")),
            StoreError::Transport(_)
        ));
    }
}
