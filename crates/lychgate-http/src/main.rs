//! lychgate demo server.
//!
//! Loads the access config, wires the pipeline over in-memory stores seeded
//! with a couple of tenants, and serves the demo routes. Real deployments
//! swap the stores for their persistence layer and the header shim for their
//! authentication middleware.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use lychgate_core::{Plan, TenantRecord};
use lychgate_engine::stores::{MemoryCacheStore, MemoryResourceCounter, MemoryTenantDirectory};
use lychgate_engine::{config, AccessPipeline};
use lychgate_http::{build_router, AppState};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("lychgate.yaml").expect("config load failed");

    let directory = Arc::new(MemoryTenantDirectory::new());
    directory.insert(
        "acme",
        TenantRecord {
            name: "Acme Fellowship".into(),
            is_active: true,
            plan: Plan::Free,
        },
    );
    directory.insert(
        "stmarks",
        TenantRecord {
            name: "St Mark's".into(),
            is_active: true,
            plan: Plan::Unlimited,
        },
    );

    let pipeline = AccessPipeline::from_config(
        &cfg,
        directory,
        Arc::new(MemoryResourceCounter::new()),
        Arc::new(MemoryCacheStore::new()),
    )
    .expect("pipeline build failed");

    let app = build_router(AppState::new(Arc::new(pipeline)));

    let listen: SocketAddr = std::env::var("LYCHGATE_LISTEN")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        .parse()
        .expect("LYCHGATE_LISTEN must be a valid SocketAddr");

    tracing::info!(%listen, "lychgate demo server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
