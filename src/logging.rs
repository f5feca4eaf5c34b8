use env_logger::Builder;
use log::LevelFilter;

use crate::constants::LOG_ENV_VAR;

/// Initialize logging, given a `verbosity_level`.
///
/// The environment variable [`LOG_ENV_VAR`], if set, takes precedence.
///
/// # Arguments
///
/// * `verbosity_level` - `0` is `WARN`: positive values increase verbosity, negative decrease it.
pub fn init(verbosity_level: i8) {
    Builder::new()
        .filter_level(level_filter(verbosity_level))
        .parse_env(LOG_ENV_VAR)
        .format_timestamp_millis()
        .init();

    trace!("Logging initialized at {}", log::max_level());
}

fn level_filter(verbosity_level: i8) -> LevelFilter {
    match verbosity_level {
        i8::MIN..=-2 => LevelFilter::Off,
        -1 => LevelFilter::Error,
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        3..=i8::MAX => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verbosity_to_level() {
        assert_eq!(level_filter(-5), LevelFilter::Off);
        assert_eq!(level_filter(-2), LevelFilter::Off);
        assert_eq!(level_filter(-1), LevelFilter::Error);
        assert_eq!(level_filter(0), LevelFilter::Warn);
        assert_eq!(level_filter(1), LevelFilter::Info);
        assert_eq!(level_filter(2), LevelFilter::Debug);
        assert_eq!(level_filter(3), LevelFilter::Trace);
        assert_eq!(level_filter(10), LevelFilter::Trace);
    }
}
