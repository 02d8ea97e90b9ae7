//! Logger setup with timestamped output.

use std::io::Write;

use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;

/// Initialises the global logger.
///
/// Defaults to `info`; `RUST_LOG` overrides the filter. Call once, from
/// the binary entrypoint.
pub fn init() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
}
