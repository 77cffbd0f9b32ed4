use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Install the global subscriber: fmt output to stdout filtered by `RUST_LOG`
/// plus a `hydrobucket` directive raised to debug with `--debug`.
pub fn setup_tracing(debug: bool) -> anyhow::Result<()> {
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    let filter_level = if debug { "hydrobucket=debug" } else { "hydrobucket=info" };
    let core_level = if debug {
        "hydrobucket_core=debug"
    } else {
        "hydrobucket_core=info"
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(filter_level.parse()?)
        .add_directive(core_level.parse()?);

    let subscriber = Registry::default().with(stdout_layer).with(filter);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
