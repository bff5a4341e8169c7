pub mod convert;
pub mod position_store;

use photoline_proto::timeline::timeline_service_client::TimelineServiceClient;
use tonic_web_wasm_client::Client;

pub type TimelineClient = TimelineServiceClient<Client>;

pub use position_store::GrpcPositionStore;
