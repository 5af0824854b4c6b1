//! Global logging system.

use std::{
    fs::File,
    path::Path,
    sync::Arc,
    env,
    panic,
};
use anyhow::{
    Context,
    Result,
};
use backtrace::Backtrace;
use tracing_subscriber::{
    fmt::{
        self,
        time::uptime,
    },
    prelude::*,
    Registry,
    EnvFilter,
};


/// Default logging environment filter. Our crates are debug, everything else is warn.
pub const DEFAULT_FILTER: &'static str = "warn,block_geom=debug,terrain_physics=debug";

/// Filter directives: the defaults, with anything in the ecosystem-standard
/// `RUST_LOG` env var appended so it takes precedence.
pub fn filter_directives() -> String {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Ok(env_filter) = env::var(EnvFilter::DEFAULT_ENV) {
        filter.push(',');
        filter.push_str(&env_filter);
    }
    filter
}

/// Initializes a `tracing` logging backend which outputs to stdout and, if
/// given a path, also a log file. Also routes panics through the log.
///
/// Fails if the log file can't be created or a global subscriber is already
/// installed.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let format = fmt::format()
        .compact()
        .with_timer(uptime())
        .with_line_number(true);
    let stdout_log = fmt::layer()
        .event_format(format);

    let log_file_log = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("unable to create log file {}", path.display()))?;
            Some(fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)))
        }
        None => None,
    };

    let subscriber = Registry::default()
        .with(EnvFilter::new(filter_directives()))
        .with(stdout_log)
        .with(log_file_log);
    tracing::subscriber::set_global_default(subscriber)
        .context("unable to install log subscriber")?;
    info!("logging initialized");

    // make panic messages and backtrace go through logging system
    panic::set_hook(Box::new(|info| {
        error!("{}", info);
        if env::var("RUST_BACKTRACE").map(|val| val == "1").unwrap_or(true) {
            error!("{:?}", Backtrace::new());
        }
    }));
    trace!("installed custom panic hook");
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_parses() {
        let directives = filter_directives();
        assert!(directives.starts_with(DEFAULT_FILTER));
        assert!(directives.parse::<EnvFilter>().is_ok());
    }
}
