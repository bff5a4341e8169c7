//! Photoline Server
//!
//! Axum backend with the gRPC-Web timeline service and SPA serving.
//! Static files are embedded in the binary via rust-embed.

use anyhow::Context;
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use http::{Method, header};
use photoline_proto::timeline::timeline_service_server::TimelineServiceServer;
use rust_embed::Embed;
use tonic::service::Routes;
use tonic_web::GrpcWebLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::ServerConfig, handler::timeline_service::TimelineServiceImpl,
    service::database::Database,
};

mod common;
mod config;
mod handler;
mod service;
mod util;

/// Embedded static files from dist/ directory
#[derive(Embed)]
#[folder = "../../dist/"]
struct Assets;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let addr = config.addr;

    let database = Database::new();
    let timeline_service = TimelineServiceImpl::new(database);
    let reflection = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(photoline_proto::FILE_DESCRIPTOR_SET)
        .build_v1()
        .context("building gRPC reflection service")?;

    let grpc_router = Routes::new(TimelineServiceServer::new(timeline_service))
        .add_service(reflection)
        .into_axum_router()
        .layer(GrpcWebLayer::new());

    // CORS layer for gRPC-Web
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("x-grpc-web"),
            header::HeaderName::from_static("grpc-timeout"),
        ])
        .expose_headers([
            header::HeaderName::from_static("grpc-status"),
            header::HeaderName::from_static("grpc-message"),
        ]);

    let app = Router::new()
        .nest("/grpc", grpc_router)
        .fallback(serve_embedded)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!("Server listening on {addr}");
    tracing::info!("  - gRPC-Web: http://{addr}/grpc/timeline.TimelineService/*");
    tracing::info!("  - SPA (embedded): http://{addr}/");

    axum::serve(listener, app).await.context("serving HTTP")?;
    Ok(())
}

/// Serve embedded static files with SPA fallback
async fn serve_embedded(uri: axum::http::Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => {
            // SPA fallback: serve index.html for client-side routing
            match Assets::get("index.html") {
                Some(content) => (
                    [(header::CONTENT_TYPE, "text/html")],
                    content.data.into_owned(),
                )
                    .into_response(),
                None => StatusCode::NOT_FOUND.into_response(),
            }
        }
    }
}
