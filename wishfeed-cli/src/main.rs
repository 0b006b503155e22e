use clap::Parser;
use config::{Cli, Command, ENV_PREFIX, Env};
use std::{net::SocketAddr, process::ExitCode, sync::Arc};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wishfeed_common::{
    model::InvalidIdError,
    reconcile::ReconcileError,
    util::{NonPositiveDurationError, PositiveDuration},
};
use wishfeed_store::store::{FeedStore, StoreError};

mod commands;
mod config;
mod server;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Invalid cache ttl: {0}")]
    CacheTtl(#[from] NonPositiveDurationError),
    #[error("Invalid post id: {0}")]
    PostId(#[from] InvalidIdError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error("Error binding tcp listener: {0}")]
    TcpBind(std::io::Error),
    #[error("Error serving server: {0}")]
    TcpServe(std::io::Error),
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wishfeed_cli=debug,\
                wishfeed_store=debug,\
                wishfeed_common=debug,\
                tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, AppError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::prefixed(ENV_PREFIX).from_env().map_err(AppError::from)
}

async fn serve(env: &Env) -> Result<(), AppError> {
    let ttl = PositiveDuration::seconds(env.cache_ttl_seconds)?;
    let feed = server::feed::FeedSource::new(FeedStore::new(&env.posts_file), ttl);
    let state = server::ServerState {
        feed: Arc::new(feed),
    };

    let tracing_layer = TraceLayer::new_for_http();
    let app = server::routes().with_state(state).layer(tracing_layer);

    let server_address = SocketAddr::new(env.server_address, env.server_port);
    let listener = tokio::net::TcpListener::bind(server_address)
        .await
        .map_err(AppError::TcpBind)?;
    info!(%server_address, "Serving posts");

    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => shutdown.cancel(),
                Err(err) => warn!(error = %err, "Could not listen for ctrl-c"),
            }
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(AppError::TcpServe)?;

    info!("Server stopped");
    Ok(())
}

async fn run(cli: Cli, env: &Env) -> Result<(), AppError> {
    match cli.command {
        None => {
            let summary = commands::reconcile(env, cli.post_id.as_deref())?;
            commands::print_summary(&summary);
        }
        Some(Command::Verify) => {
            let report = commands::verify(env)?;
            commands::print_report(&report);
        }
        Some(Command::Serve) => serve(env).await?,
    }

    Ok(())
}

fn exit_code(result: &Result<(), AppError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "wishfeed failed");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    install_tracing();
    let cli = Cli::parse();

    let result = match get_env() {
        Ok(env) => run(cli, &env).await,
        Err(err) => Err(err),
    };

    exit_code(&result)
}
