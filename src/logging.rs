use tracing_subscriber::EnvFilter;

/// CLI 상세도(-v 개수)에 맞춰 tracing 구독자를 초기화한다.
///
/// - 0 -> warn
/// - 1 (-v) -> info
/// - 2 (-vv) -> debug
/// - 3 이상 -> trace
///
/// `RUST_LOG` 환경 변수가 있으면 그 값을 우선한다.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let default_filter = format!("brew_toolbox={level},brew_toolbox_cli={level}");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
