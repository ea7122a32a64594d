// src/log.rs
//
// Tiny logger: `[hh:mm:ss.mmm][LEVEL] message`, time elapsed since first use.
// Default sink is `.store/debug.log`; the CLI switches to stderr with --verbose.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use crate::config::consts::LOG_FILE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogSink {
    File,
    Stderr,
    Off,
}

impl LogSink {
    fn as_u8(self) -> u8 {
        match self { LogSink::File => 0, LogSink::Stderr => 1, LogSink::Off => 2 }
    }
    fn from_u8(v: u8) -> Self {
        match v { 0 => LogSink::File, 1 => LogSink::Stderr, _ => LogSink::Off }
    }
}

static SINK: AtomicU8 = AtomicU8::new(0);
static LOG_LOCK: Mutex<()> = Mutex::new(());
static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

pub fn set_sink(sink: LogSink) {
    SINK.store(sink.as_u8(), Ordering::Relaxed);
}

pub fn sink() -> LogSink {
    LogSink::from_u8(SINK.load(Ordering::Relaxed))
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

fn append_to_file(line: &str) {
    let path = Path::new(LOG_FILE);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            let _ = fs::create_dir_all(parent);
        }
    }
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let _ = file.write_all(line.as_bytes());
    }
}

/// Internal logging function; use the macros.
pub fn write_log(level: &str, msg: &str) {
    let sink = sink();
    if sink == LogSink::Off {
        return;
    }
    let elapsed = fmt_elapsed(start().elapsed().as_millis());
    let line = format!("[{elapsed}][{level}] {msg}\n");

    if let Ok(_guard) = LOG_LOCK.lock() {
        match sink {
            LogSink::File => append_to_file(&line),
            LogSink::Stderr => eprint!("{line}"),
            LogSink::Off => {}
        }
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::write_log("INFO", &format!($($arg)*))
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::write_log("DEBUG", &format!($($arg)*))
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::write_log("ERROR", &format!($($arg)*))
    };
}
