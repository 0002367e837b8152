//! Terminal logger for installer output.

use std::fmt::Arguments;

use codex1up::log::{LogLevel, Logger, TracingLogger};
use console::style;

/// Prints styled lines for the user and mirrors each one into the session
/// log through [`TracingLogger`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger {
    file: TracingLogger,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        self.file.log(level, args);
        match level {
            LogLevel::Plain => println!("{}", args),
            LogLevel::Info => println!("{} {}", style("i").cyan().bold(), args),
            LogLevel::Ok => println!("{} {}", style("\u{2714}").green().bold(), args),
            LogLevel::Warn => eprintln!("{} {}", style("!").yellow().bold(), style(args).yellow()),
            LogLevel::Error => eprintln!("{} {}", style("\u{2716}").red().bold(), style(args).red()),
        }
    }
}
