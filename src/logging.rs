//! Tracing subscriber setup for the `horae` binary.

use tracing_subscriber::EnvFilter;

/// Targets that receive log output: the binary and the calendar library.
const CRATE_TARGETS: &[&str] = &["horae", "horae_calendar"];

/// Initialize tracing from the `-v` count.
///
/// Mapping:
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
///
/// `RUST_LOG` overrides the flag if set. Output goes to stderr so converted
/// dates on stdout stay pipeable.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `target=level` directives for every crate target.
fn directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(directives(0), "horae=warn,horae_calendar=warn");
        assert_eq!(directives(2), "horae=debug,horae_calendar=debug");
        assert_eq!(directives(9), "horae=trace,horae_calendar=trace");
    }

    #[test]
    fn directives_parse_as_a_filter() {
        assert!(EnvFilter::try_new(directives(1)).is_ok());
    }
}
