//! Logging set-up.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `--log` nor `TASKSTACK_LOG` is set.
pub const DEFAULT_FILTER: &str = "taskstack=warn";

/// Install the global subscriber, writing to stderr.
///
/// When `full_screen` is set and no filter was given, no subscriber is
/// installed so nothing is written over the terminal UI.
pub fn init_logging(filter: Option<&str>, full_screen: bool) {
    if full_screen && filter.is_none() {
        return;
    }
    let filter = build_filter(filter.unwrap_or(DEFAULT_FILTER));
    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
    {
        eprintln!("taskstack: logging disabled: {e}");
    }
}

/// Parse a filter directive, falling back to `DEFAULT_FILTER` with one line
/// on stderr when it does not parse.
fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("taskstack: invalid log filter '{directive}' ({e}), using '{DEFAULT_FILTER}'");
        EnvFilter::new(DEFAULT_FILTER)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("taskstack=debug", "taskstack=debug")]
    #[case("info", "info")]
    #[case("taskstack=loud", DEFAULT_FILTER)]
    fn bad_filters_fall_back_to_default(#[case] directive: &str, #[case] expected: &str) {
        assert_eq!(build_filter(directive).to_string(), expected);
    }
}
