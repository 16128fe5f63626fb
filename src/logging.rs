use tracing_appender::rolling;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// One daily-rotated file per level, each holding that level and above
const LEVEL_FILES: [(&str, LevelFilter); 4] = [
    ("debug.log", LevelFilter::DEBUG),
    ("info.log", LevelFilter::INFO),
    ("warn.log", LevelFilter::WARN),
    ("error.log", LevelFilter::ERROR),
];

/// Install the global subscriber: colored stdout plus the files in `LEVEL_FILES`
/// under `log_dir`. `RUST_LOG` overrides the default `info` filter.
pub fn init(log_dir: &str) -> std::io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = LEVEL_FILES
        .iter()
        .map(|&(file_name, level)| {
            tracing_subscriber::fmt::layer()
                .with_writer(rolling::daily(log_dir, file_name))
                .with_ansi(false)
                .with_filter(level)
                .boxed()
        })
        .collect();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(file_layers)
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(true))
        .init();

    Ok(())
}
