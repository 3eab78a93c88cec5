//! Backend entry-point: reads configuration, builds the upstream adapters and
//! the profile pipeline, then serves the REST API.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use profile_backend::domain::{CompletionInvoker, ProfileService};
use profile_backend::inbound::http::health::HealthState;
use profile_backend::outbound::openai::OpenAiCompletionSource;
use profile_backend::outbound::reddit::{RedditCommentSource, RedditTokenSource};
use profile_backend::settings::settings_from_env;

mod server;

use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = settings_from_env(&DefaultEnv::new()).wrap_err("invalid configuration")?;
    settings.log_summary();

    let tokens = RedditTokenSource::new(&settings.reddit_endpoints, settings.reddit_credentials)
        .wrap_err("building Reddit token client")?;
    let comments = RedditCommentSource::new(&settings.reddit_endpoints)
        .wrap_err("building Reddit listing client")?;
    let completions =
        OpenAiCompletionSource::new(settings.openai).wrap_err("building completion client")?;
    let invoker = CompletionInvoker::new(Arc::new(completions), settings.retry);
    let profiles = ProfileService::new(
        Arc::new(tokens),
        Arc::new(comments),
        invoker,
        settings.service,
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(settings.bind_addr, Arc::new(profiles)),
    )
    .wrap_err_with(|| format!("binding {}", settings.bind_addr))?;
    info!(bind_addr = %settings.bind_addr, "server listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("server terminated")
}
