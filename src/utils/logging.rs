//! Structured Logging
//!
//! `key=value` lines on stderr. Debug lines are off unless `enable_debug`
//! was called. Values under a few known keys are masked before rendering.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

pub fn enable_debug() {
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

pub fn disable_debug() {
    DEBUG_ENABLED.store(false, Ordering::SeqCst);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

/// Keys whose value is never printed
const OPAQUE_KEYS: &[&str] = &["custom_signature", "paymaster_input"];

/// Keys holding an address; printed shortened
const ADDRESS_KEYS: &[&str] = &[
    "from",
    "to",
    "initiator_address",
    "fee_token",
    "paymaster",
    "verifying_contract",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Warn,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Warn => write!(f, "WARN"),
        }
    }
}

/// One log line under construction
#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub module: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            module,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Attach a field, masking it if `key` is a known sensitive key
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        let value = mask(key, value.to_string());
        self.fields.push((key, value));
        self
    }

    /// The line without its timestamp
    pub fn render(&self) -> String {
        let mut line = format!("{} [{}] {}", self.level, self.module, self.message);
        if !self.fields.is_empty() {
            line.push_str(" |");
            for (key, value) in &self.fields {
                line.push_str(&format!(" {}={}", key, value));
            }
        }
        line
    }

    pub fn log(self) {
        if self.level == LogLevel::Debug && !is_debug_enabled() {
            return;
        }
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        eprintln!("[{}] {}", timestamp, self.render());
    }
}

fn mask(key: &str, value: String) -> String {
    if OPAQUE_KEYS.contains(&key) {
        return format!("<{} bytes hidden>", value.trim_start_matches("0x").len() / 2);
    }
    if ADDRESS_KEYS.contains(&key) {
        return shorten_address(&value);
    }
    value
}

/// `0x1234ab...cdef`; anything not shaped like an address passes through
fn shorten_address(value: &str) -> String {
    match value.strip_prefix("0x") {
        Some(digits) if digits.len() == 40 => {
            format!("0x{}...{}", &digits[..6], &digits[36..])
        }
        _ => value.to_string(),
    }
}

#[macro_export]
macro_rules! log_debug {
    ($module:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Debug,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

#[macro_export]
macro_rules! log_warn {
    ($module:expr, $msg:expr $(, $key:ident = $value:expr)* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Warn,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}
