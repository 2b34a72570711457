use std::{
    fs::OpenOptions,
    net::SocketAddr,
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::{Parser, ValueEnum};
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, filter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use sales_report::{
    AppState, DEFAULT_SALE_YEAR, DEFAULT_SEED_URL, ReportConfig, build_router,
    build_router_with_frontend, graceful_shutdown, logging_middleware,
};

/// Whether the server is running for development or serving the built frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Environment {
    Development,
    Production,
}

/// The REST API server for sales_report.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "DB_PATH", default_value = "sales_report.db")]
    db_path: PathBuf,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// The URL of the JSON array of transactions used to seed the database.
    #[arg(long, env = "SEED_URL", default_value = DEFAULT_SEED_URL)]
    seed_url: String,

    /// The year that the `month` query parameter refers to.
    #[arg(long, env = "SALE_YEAR", default_value_t = DEFAULT_SALE_YEAR)]
    sale_year: i32,

    /// In production the prebuilt frontend is served from `frontend_dir`.
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Environment::Development)]
    environment: Environment,

    /// Directory of the prebuilt frontend.
    #[arg(long, env = "FRONTEND_DIR", default_value = "frontend/build")]
    frontend_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let conn = match Connection::open(&args.db_path) {
        Ok(conn) => conn,
        Err(error) => {
            tracing::error!("Could not open database {:?}: {error}", args.db_path);
            return ExitCode::FAILURE;
        }
    };

    let config = ReportConfig {
        seed_url: args.seed_url,
        sale_year: args.sale_year,
    };

    let state = match AppState::new(conn, config) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not initialize database {:?}: {error}", args.db_path);
            return ExitCode::FAILURE;
        }
    };

    let router = match args.environment {
        Environment::Production => {
            tracing::info!("Serving frontend from {:?}", args.frontend_dir);
            build_router_with_frontend(state, &args.frontend_dir)
        }
        Environment::Development => build_router(state),
    };

    let router = add_tracing_layer(router.layer(middleware::from_fn(logging_middleware)));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(env_filter),
        )
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
        // By default, `TraceLayer` will log 5xx responses but the handlers log
        // their own errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
