use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries the rendered tables.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("uav_scorekeeper=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("uav_scorekeeper=info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
