use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing to stderr. The console report is the user interface,
/// so the default level is warn; set NULLSWEEP_LOG (e.g. NULLSWEEP_LOG=debug)
/// to see stage-level events.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("NULLSWEEP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
