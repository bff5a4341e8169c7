//! Build script for photoline-server
//!
//! Makes sure the dist/ folder exists for rust-embed.
//! The client is built separately via `trunk build`; without it the server
//! embeds a placeholder page and still serves the gRPC API.

use std::env;
use std::path::Path;

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir).join("../..");
    let dist_dir = workspace_root.join("dist");

    println!("cargo:rerun-if-changed={}", dist_dir.display());

    if !dist_dir.exists() {
        println!("cargo:warning=dist/ directory not found, embedding a placeholder index.html");
        println!("cargo:warning=Run `trunk build --release` in crates/photoline-client to embed the client");
        std::fs::create_dir_all(&dist_dir).ok();
        std::fs::write(dist_dir.join("index.html"), "<!-- placeholder -->").ok();
    }
}
