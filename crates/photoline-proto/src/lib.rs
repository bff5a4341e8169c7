//! Photoline Protocol Library
//!
//! Generated protobuf types and gRPC service definitions.
//!
//! # Features
//! - `client`: gRPC client stubs (used by the WASM frontend over gRPC-Web)
//! - `server`: gRPC server traits and transport (requires tokio runtime)

#[allow(clippy::pedantic)]
pub mod timeline {
    #[cfg(any(feature = "server", feature = "client"))]
    tonic::include_proto!("timeline");

    #[cfg(not(any(feature = "server", feature = "client")))]
    include!(concat!(env!("OUT_DIR"), "/timeline.rs"));
}

/// Encoded file descriptor set, served by gRPC reflection.
pub const FILE_DESCRIPTOR_SET: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/photoline_descriptor.bin"));
