use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the level derived from CLI flags; logs
/// go to stderr so command output stays pipeable.
pub fn init_tracing(level: Level, json: bool) -> eyre::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        revision = env!("GIT_REVISION"),
        "Tracing initialised"
    );
    Ok(())
}
