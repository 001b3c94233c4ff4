use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use user_manager::{
    AppState, ConnectionPool, DatabaseLocation, PoolConfig, build_router, count_users,
    graceful_shutdown, logging_middleware,
};

/// The web server for user_manager.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database, or ':memory:' for a
    /// database that is discarded on shutdown.
    #[arg(long)]
    db_path: String,

    /// The address to serve the app from.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    address: IpAddr,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The most database connections that may be open at once.
    #[arg(long, default_value_t = PoolConfig::DEFAULT_MAX_CONNECTIONS)]
    max_connections: usize,

    /// How long a request may wait for a database connection before failing.
    /// Requests wait indefinitely if this is not set.
    #[arg(long)]
    acquire_timeout_secs: Option<u64>,

    /// The name shown on the home page. Defaults to the machine's host name.
    #[arg(long)]
    host_name: Option<String>,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::new(args.address, args.port);

    let pool_config = PoolConfig::new(DatabaseLocation::from_path(&args.db_path))
        .with_max_connections(args.max_connections)
        .with_acquire_timeout(args.acquire_timeout_secs.map(Duration::from_secs));
    let pool = ConnectionPool::new(pool_config).expect("Could not create the connection pool");

    let host_name = args
        .host_name
        .unwrap_or_else(|| gethostname::gethostname().to_string_lossy().into_owned());

    let state = AppState::new(pool.clone(), &host_name)
        .await
        .expect("Could not initialize the database");

    let user_count = async {
        let connection = pool.acquire().await?;
        connection.interact(count_users).await?
    }
    .await;
    match user_count {
        Ok(user_count) => tracing::info!("Database {} has {user_count} users", args.db_path),
        Err(error) => tracing::warn!("Could not count users: {error}"),
    }

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state).layer(middleware::from_fn(logging_middleware)));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("Server stopped unexpectedly");

    pool.close();
    tracing::info!("Server shut down");
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but the handlers
        // already log their errors, so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
