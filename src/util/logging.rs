// LogTriage - util/logging.rs
//
// tracing subscriber setup for the CLI host.
//
// The filter comes from the first source that is set: RUST_LOG, the
// --debug flag, then `[logging] level` in config.toml. Everything goes to
// stderr; stdout carries only command output. Upload contents and response
// bodies are never logged, only their sizes.

use crate::util::constants;
use tracing_subscriber::EnvFilter;

/// Where the active filter directive came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FilterSource {
    Env,
    Directive(String),
}

fn filter_source(env_set: bool, debug_flag: bool, config_level: Option<&str>) -> FilterSource {
    if env_set {
        FilterSource::Env
    } else if debug_flag {
        FilterSource::Directive("debug".to_string())
    } else {
        FilterSource::Directive(
            config_level
                .unwrap_or(constants::DEFAULT_LOG_LEVEL)
                .to_lowercase(),
        )
    }
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let source = filter_source(
        std::env::var_os("RUST_LOG").is_some(),
        debug_flag,
        config_level,
    );
    let filter = match &source {
        FilterSource::Env => EnvFilter::from_default_env(),
        FilterSource::Directive(directive) => EnvFilter::new(directive),
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            app = constants::APP_NAME,
            version = constants::APP_VERSION,
            filter = ?source,
            "Logging ready"
        );
    }
}
