//! Person registry server - JSON API over the in-memory record store.

use std::net::SocketAddr;

use clap::Parser;
use person_registry::http::{app, AppState};
use person_registry::{RecordStore, StoreConfig, DEFAULT_MINIMAL_AGE};
use tracing::info;

#[derive(Parser)]
#[command(name = "person-registry")]
#[command(about = "In-memory person registry with a JSON API")]
struct Args {
    /// Address to bind the server to
    #[arg(long, env = "REGISTRY_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(long, env = "REGISTRY_PORT", default_value = "8080")]
    port: u16,

    /// Minimum age in years a birth date must imply
    #[arg(long, env = "MINIMAL_AGE", default_value_t = DEFAULT_MINIMAL_AGE)]
    minimal_age: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("person_registry=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let store = RecordStore::new(StoreConfig {
        minimal_age: args.minimal_age,
    });
    info!(minimal_age = store.minimal_age(), "record store ready");

    let router = app(AppState::new(store));

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
