use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("COURIER_ADDR").unwrap_or_else(|_| "127.0.0.1:8989".to_string());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("proxy listening on {addr}");
    courier_proxy::run(listener).await?;
    Ok(())
}
