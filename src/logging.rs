use std::panic;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static PANIC_HOOK: OnceLock<()> = OnceLock::new();

/// Where log output goes, resolved from the environment once at init.
#[derive(Debug, Clone, Default)]
struct LogOptions {
    /// `JOBMATCH_LOG_DIR`: when set, daily-rotated files land there.
    dir: Option<PathBuf>,
    /// `JOBMATCH_LOG_INCLUDE_BACKTRACE`: forward panics to the default
    /// hook after logging them, so backtraces still print.
    include_backtrace: bool,
}

impl LogOptions {
    fn from_env() -> Self {
        Self {
            dir: std::env::var_os("JOBMATCH_LOG_DIR").map(PathBuf::from),
            include_backtrace: std::env::var("JOBMATCH_LOG_INCLUDE_BACKTRACE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    fn file_writer(&self, app_name: &'static str) -> Option<BoxMakeWriter> {
        let dir = self.dir.clone()?;
        if let Err(err) = std::fs::create_dir_all(&dir) {
            tracing::warn!(error = %err, "could not create JOBMATCH_LOG_DIR; logging to stdout");
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        Some(BoxMakeWriter::new(non_blocking))
    }
}

fn install_panic_hook(app_name: &'static str, include_backtrace: bool) {
    PANIC_HOOK.get_or_init(|| {
        let default_hook = panic::take_hook();

        panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".into());
            let message = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic payload not string".into());

            tracing::error!(
                application = app_name,
                %location,
                panic_message = %message,
                "panic captured"
            );

            if include_backtrace {
                default_hook(info);
            }
        }));
    });
}

/// Initialize tracing for a process embedding the matching core.
///
/// Filtering follows `RUST_LOG` (default `info`). With `JOBMATCH_LOG_DIR`
/// set, output goes to `<dir>/<app>.log` with daily rotation, otherwise to
/// stdout. Panics are routed through `tracing` as well. Calling this more
/// than once is harmless.
pub fn init(app_name: &'static str) {
    let options = LogOptions::from_env();
    install_panic_hook(app_name, options.include_backtrace);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    if let Some(writer) = options.file_writer(app_name) {
        let _ = builder.with_writer(writer).try_init();
    } else {
        let _ = builder.try_init();
    }
}
