//! Common utilities for tests
#![allow(dead_code)]

use std::sync::{Arc, Once};

use log::{Level, LevelFilter, Metadata, Record};
use muon_mem::{FileSystem, FsConfig, ManualClock, Timestamp};

pub const ORANGE: &str = "\x1b[38;5;214m";
pub const RESET: &str = "\x1b[0m";

/// Provides a macro for logging messages during tests.
/// e.g. log!("placeholder") -> println!("[test] placeholder");
#[macro_export]
macro_rules! log {
    ($msg:expr) => {
        println!("{}[test] {}{}", crate::common::ORANGE, $msg, crate::common::RESET)
    };
    ($msg:expr, $($arg:tt)*) => {
        println!("{}[test] {}{}", crate::common::ORANGE, format!($msg, $($arg)*), crate::common::RESET)
    };
}

struct TestLogger;

impl log::Log for TestLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let color = match record.level() {
            Level::Error => "\x1b[31m",
            Level::Warn => "\x1b[93m",
            Level::Info => "\x1b[34m",
            Level::Debug => "\x1b[32m",
            Level::Trace => "\x1b[90m",
        };
        println!("{}[{:>5}] {}{}", color, record.level(), record.args(), RESET);
    }

    fn flush(&self) {}
}

/// Installs the test logger once per test binary. Level comes from `LOG`, default `DEBUG`.
pub fn init_logger() {
    static INIT: Once = Once::new();
    static LOGGER: TestLogger = TestLogger;
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(match std::env::var("LOG").as_deref() {
            Ok("ERROR") => LevelFilter::Error,
            Ok("WARN") => LevelFilter::Warn,
            Ok("INFO") => LevelFilter::Info,
            Ok("TRACE") => LevelFilter::Trace,
            _ => LevelFilter::Debug,
        });
    });
}

/// Default-sized file system (100 blocks of 10 bytes, 10 inodes).
pub fn default_fs() -> FileSystem {
    init_logger();
    FileSystem::format(FsConfig::default()).unwrap()
}

/// Default-sized file system driven by a clock the test controls.
pub fn manual_fs() -> (FileSystem, Arc<ManualClock>) {
    init_logger();
    let clock = Arc::new(ManualClock::new(Timestamp::from_secs(1_000)));
    let fs = FileSystem::with_clock(FsConfig::default(), Box::new(clock.clone())).unwrap();
    (fs, clock)
}

pub fn names(fs: &FileSystem) -> Vec<String> {
    fs.list_directory()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect()
}
