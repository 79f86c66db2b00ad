use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` enables debug output and
/// `-vv` trace output for this crate. Logs go to stderr so they never
/// interleave with the board on stdout.
pub fn init(verbosity: u8) {
    let default = match verbosity {
        0 => "rust_concentration=warn",
        1 => "rust_concentration=debug",
        _ => "rust_concentration=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
