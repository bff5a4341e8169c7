use tonic_web_wasm_client::Client;
use yew::prelude::*;

use crate::services::TimelineClient;

/// gRPC-Web client for the timeline service at `{origin}/grpc`.
///
/// Tonic clients are cheap to clone; callers clone before each request so
/// concurrent calls never share a `&mut`.
#[hook]
pub fn use_timeline_service() -> TimelineClient {
    let client = use_mut_ref(|| {
        let origin = gloo::utils::window()
            .location()
            .origin()
            .unwrap_or_default();
        TimelineClient::new(Client::new(format!("{origin}/grpc")))
    });
    client.borrow().clone()
}
