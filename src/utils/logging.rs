//! Logger setup shared by the command-line tools.

use std::io::Write;

use log::LevelFilter;

/// Parse a verbosity name into a level filter.
///
/// Accepts the conventional upper-case names (`WARNING`, `INFO`, `DEBUG`,
/// ...) case-insensitively, so `--debug-level warning` and
/// `--debug-level WARNING` behave the same.
#[must_use]
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.to_ascii_uppercase().as_str() {
        "OFF" => Some(LevelFilter::Off),
        "ERROR" | "CRITICAL" => Some(LevelFilter::Error),
        "WARN" | "WARNING" => Some(LevelFilter::Warn),
        "INFO" => Some(LevelFilter::Info),
        "DEBUG" => Some(LevelFilter::Debug),
        "TRACE" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Initialize the process-wide logger.
///
/// Messages go to stdout as `<LEVEL> :: <message>` with the level right
/// aligned, the trace format the comparison tools have always used.
pub fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "{:>10} :: {}", record.level(), record.args()))
        .target(env_logger::Target::Stdout)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_style_level_names_parse() {
        assert_eq!(parse_level("WARNING"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("warning"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("DEBUG"), Some(LevelFilter::Debug));
        assert_eq!(parse_level("info"), Some(LevelFilter::Info));
        assert_eq!(parse_level("CRITICAL"), Some(LevelFilter::Error));
    }

    #[test]
    fn unknown_level_names_are_rejected() {
        assert_eq!(parse_level("verbose"), None);
        assert_eq!(parse_level(""), None);
    }
}
