//! Utilities.
use std::path::Path;

use log::LevelFilter;

/// Configure the global logger to write to stderr at the given minimum level.
///
/// The `RUST_LOG` environment variable can still refine the filter per module.
pub fn configure_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .format_timestamp_micros()
        .init();
}

/// Return the lowercase extension of a path, or an empty string.
pub fn get_extension(path: &Path) -> String {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::utilities::get_extension;

    #[test]
    fn test_get_extension() {
        assert_eq!(get_extension(Path::new("capture.pcap")), "pcap");
        assert_eq!(get_extension(Path::new("dir/Capture.PCAPNG")), "pcapng");
        assert_eq!(get_extension(Path::new("frames")), "");
    }
}
