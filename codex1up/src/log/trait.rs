//! Logger trait definition.

use std::fmt::Arguments;

/// Severity of an installer log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Unadorned output (dry-run echoes, command lines)
    Plain,
    /// Progress information
    Info,
    /// A completed action
    Ok,
    /// A degraded but recoverable situation
    Warn,
    /// A failure
    Error,
}

/// Logging capability handed to every installer step.
///
/// Implementations must be `Send + Sync` so the context can be shared with
/// the parallel tool-presence checks.
pub trait Logger: Send + Sync {
    /// Log a message at the specified level.
    ///
    /// The convenience methods below delegate here.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    /// Log an unadorned line.
    fn plain(&self, args: Arguments<'_>) {
        self.log(LogLevel::Plain, args);
    }

    /// Log a progress line.
    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    /// Log a success line.
    fn ok(&self, args: Arguments<'_>) {
        self.log(LogLevel::Ok, args);
    }

    /// Log a warning.
    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    /// Log an error.
    fn err(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

#[macro_export]
macro_rules! log_plain {
    ($logger:expr, $($arg:tt)*) => {
        $logger.plain(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_ok {
    ($logger:expr, $($arg:tt)*) => {
        $logger.ok(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_err {
    ($logger:expr, $($arg:tt)*) => {
        $logger.err(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Plain < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Ok);
        assert!(LogLevel::Ok < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_convenience_methods_route_to_level() {
        let logger = crate::log::MemoryLogger::new();
        logger.plain(format_args!("p"));
        logger.ok(format_args!("o"));
        logger.err(format_args!("e"));

        let levels: Vec<LogLevel> = logger.entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(levels, vec![LogLevel::Plain, LogLevel::Ok, LogLevel::Error]);
    }
}
