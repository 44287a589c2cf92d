use std::io::Write;

use log::LevelFilter;

/// Install the process logger.
///
/// Lines look like `2024-01-01 12:00:00 - INFO - message`. `RUST_LOG`, when
/// set, overrides `level`. Calling this more than once is harmless.
pub fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .parse_default_env()
        .try_init();
}
