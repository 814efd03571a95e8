use clap::Parser;
use tasktrack_server::config::ServerArgs;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let args = ServerArgs::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let listener = TcpListener::bind(&args.bind).await.inspect_err(|e| {
        tracing::error!(addr = %args.bind, error = %e, "failed to bind");
    })?;
    tracing::info!(addr = %args.bind, "task tracker listening");
    tasktrack_server::run(listener).await
}
