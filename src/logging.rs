use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::LogLevel;

/// Handle to the installed filter, used to apply `-logLevel` once it is known.
pub struct LogFilterHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogFilterHandle {
    /// Switch to the level the code server was started with.
    ///
    /// A filter taken from `RUST_LOG` is left in place.
    pub fn set_level(&self, level: LogLevel) {
        if self.from_env {
            return;
        }
        if let Err(err) = self.handle.reload(level_filter(level)) {
            tracing::debug!(error = %err, "log level not applied");
        }
    }
}

/// Initialize tracing on stderr.
///
/// Installed before arguments are parsed so the parser's own events are
/// recorded. The filter is `RUST_LOG` when set, INFO otherwise. Calling this
/// twice is a no-op.
pub fn init_tracing() -> LogFilterHandle {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (level_filter(LogLevel::default()), false),
    };
    let (filter, handle) = reload::Layer::new(filter);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();

    LogFilterHandle { handle, from_env }
}

fn level_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.to_level_filter().to_string())
}
