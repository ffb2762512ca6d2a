// AWS Lambda placeholder function
//
// Returns a fixed 200 response that echoes the invocation event. Uses the
// tokio runtime lambda_runtime sets up; no state is shared between calls.

use apideploy_config::{LogConfig, LogFormat};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

mod response;

pub use response::{placeholder_response, PlaceholderBody, PlaceholderResponse, NOT_IMPLEMENTED_MSG};

/// Lambda handler: echo the event back
pub async fn handle_request(event: LambdaEvent<Value>) -> Result<PlaceholderResponse, Error> {
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, "Placeholder function invoked");
    Ok(placeholder_response(payload)?)
}

/// Lambda runtime entry point
pub async fn run() -> Result<(), Error> {
    let log = LogConfig::load().map_err(|e| Error::from(format!("Invalid log config: {e:#}")))?;
    init_tracing(&log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        built = env!("BUILD_TIMESTAMP"),
        "Starting placeholder function"
    );

    lambda_runtime::run(service_fn(handle_request)).await
}

fn init_tracing(config: &LogConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    // CloudWatch timestamps each line itself and does not render ANSI
    let _ = match config.format {
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().json().without_time().with_ansi(false)),
        ),
        LogFormat::Text => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().without_time().with_ansi(false)),
        ),
    };
}
