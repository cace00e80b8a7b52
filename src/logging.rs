use crate::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, fmt::time::ChronoLocal, layer::SubscriberExt,
    util::SubscriberInitExt,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const LOG_FILE_PREFIX: &str = "moviedeck.log";

/// Install the global subscriber.
///
/// Logs go to stderr so command output on stdout stays clean. When a log
/// directory is configured, a daily-rolling file is written as well; keep the
/// returned guard alive until exit or buffered lines are lost.
pub fn init(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.json {
        layers.push(fmt::layer().json().with_writer(std::io::stderr).boxed());
    } else {
        layers.push(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr)
                .boxed(),
        );
    }

    let guard = match &config.file {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(
                fmt::layer()
                    .with_ansi(false)
                    .with_timer(ChronoLocal::rfc_3339())
                    .with_writer(writer)
                    .boxed(),
            );
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    Ok(guard)
}
