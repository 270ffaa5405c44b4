//! Structured logging for Strider hosts.
//!
//! Library crates only emit `tracing` events; a host installs the subscriber
//! once with [`init_logging`]. Console output carries uptime timestamps and
//! module targets. In debug builds a JSON file, `strider.log`, also receives
//! every event, which replaces per-technique CSV trigger logs: filter it by
//! target `strider_locomotion::trigger` to recover the sample trace.

use std::fs::File;
use std::path::Path;

use strider_config::Config;
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

/// Filter used when neither `RUST_LOG` nor the config says otherwise.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written into the log directory.
pub const LOG_FILE_NAME: &str = "strider.log";

/// Resolves the filter string: config override, else [`DEFAULT_FILTER`].
#[must_use]
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - directory for the JSON log file
/// * `debug_build` - file logging only happens when this is `true`
/// * `config` - source of the log level override and the file toggle
///
/// `RUST_LOG` takes precedence over the config's level. Call once per
/// process; a second call panics inside `tracing-subscriber`.
///
/// # Examples
///
/// ```no_run
/// use strider_config::Config;
/// use strider_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if let Some(log_file) = open_log_file(log_dir, debug_build, config) {
        subscriber.with(json_file_layer(log_file)).init();
        tracing::debug!(file = LOG_FILE_NAME, "JSON file logging enabled");
        return;
    }

    subscriber.init();
}

/// Creates `log_dir/strider.log` when file logging applies: a debug build,
/// a directory, and `log_to_file` not switched off. Returns `None` otherwise
/// or when the directory or file cannot be created.
#[must_use]
pub fn open_log_file(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Option<File> {
    let file_enabled = config.is_none_or(|c| c.debug.log_to_file);
    if !debug_build || !file_enabled {
        return None;
    }
    let log_dir = log_dir?;
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE_NAME)).ok()
}

/// JSON lines layer writing every event to `file`.
fn json_file_layer<S>(file: File) -> impl Layer<S> + Send + Sync
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::uptime())
        .json()
}

/// An `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
