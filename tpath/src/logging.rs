use std::{
    io::Write as _,
    sync::{OnceLock, PoisonError, RwLock},
};

use log::{LevelFilter, Log, Metadata, Record};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Warn))
}

/// Installs the logger, later calls only change its level.
pub fn init(min_level: LevelFilter) {
    let logger = get_logger();
    logger.set_min_level(min_level);

    if log::set_logger(logger).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
}

/// Raises `level` by `steps` levels, saturating at trace.
pub fn raise(level: LevelFilter, steps: u8) -> LevelFilter {
    const LEVELS: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];

    let idx = LEVELS.iter().position(|l| *l == level).unwrap_or(0);
    LEVELS[(idx + steps as usize).min(LEVELS.len() - 1)]
}

/// Writes log messages to stderr, the only place not taken by responses.
pub struct AppLogger {
    min_level: RwLock<LevelFilter>,
}

impl AppLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        *self.min_level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        *self.min_level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    fn format(record: &Record) -> String {
        format!(
            "[{} {}] {}",
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(std::io::stderr().lock(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;

    #[test]
    fn raising_levels() {
        assert_eq!(raise(LevelFilter::Warn, 0), LevelFilter::Warn);
        assert_eq!(raise(LevelFilter::Warn, 1), LevelFilter::Info);
        assert_eq!(raise(LevelFilter::Warn, 2), LevelFilter::Debug);
        assert_eq!(raise(LevelFilter::Error, 200), LevelFilter::Trace);
        assert_eq!(raise(LevelFilter::Off, 1), LevelFilter::Error);
    }

    #[test]
    fn filtering() {
        let logger = AppLogger::new(LevelFilter::Info);
        let meta = |level| Metadata::builder().level(level).build();

        assert!(logger.enabled(&meta(Level::Warn)));
        assert!(logger.enabled(&meta(Level::Info)));
        assert!(!logger.enabled(&meta(Level::Debug)));

        logger.set_min_level(LevelFilter::Off);
        assert!(!logger.enabled(&meta(Level::Error)));
    }

    #[test]
    fn message_format() {
        let line = AppLogger::format(
            &Record::builder()
                .args(format_args!("seed {}", 7))
                .level(Level::Debug)
                .module_path(Some("cpath::api"))
                .build(),
        );
        assert_eq!(line, "[DEBUG cpath::api] seed 7");
    }
}
