mod app;
mod modules;
mod types;
#[cfg(test)]
mod utils;

use crate::{
    app::App,
    types::{AppEnvironment, Config, Context, ToContext},
};
use std::{env, process::ExitCode, sync::Arc};
use tracing_subscriber::prelude::*;

fn init_tracing(environment: &AppEnvironment) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(environment.uses_ansi_logs()))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    let environment = match &config {
        Ok(config) => config.app.environment.clone(),
        Err(_) => AppEnvironment::from(env::var("APP_ENV").unwrap_or_default()),
    };
    init_tracing(&environment);

    let ctx: Arc<Context> = match config.and_then(|config| config.to_context()) {
        Ok(ctx) => Arc::new(ctx),
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = App::new(ctx).serve().await {
        tracing::error!("Server stopped unexpectedly: {:?}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
