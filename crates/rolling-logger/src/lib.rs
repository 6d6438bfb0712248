//! Rolling Logger
//!
//! Keeps the most recent log records in a bounded ring and echoes each one
//! to the browser console (stderr when not on wasm32). Installed as a
//! `tracing-subscriber` layer; records from the `log` facade reach it
//! through the subscriber's `tracing-log` bridge.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// One captured log line
#[derive(Clone, Debug, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:>5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Circular buffer of the newest `capacity` records
#[derive(Debug)]
pub struct RingBuffer {
    capacity: usize,
    records: VecDeque<LogRecord>,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { capacity, records: VecDeque::with_capacity(capacity) }
    }

    pub fn push(&mut self, record: LogRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Up to `n` newest records, oldest first
    pub fn recent(&self, n: usize) -> Vec<LogRecord> {
        let skip = self.records.len().saturating_sub(n);
        self.records.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

static SHARED: OnceLock<Arc<Mutex<RingBuffer>>> = OnceLock::new();

/// Layer that captures events into a [`RingBuffer`]
pub struct RollingLayer {
    app_name: String,
    max_level: Level,
    buffer: Arc<Mutex<RingBuffer>>,
    echo: bool,
}

impl RollingLayer {
    pub fn new(app_name: &str, max_level: Level, buffer: Arc<Mutex<RingBuffer>>) -> Self {
        Self { app_name: app_name.to_string(), max_level, buffer, echo: true }
    }

    /// Capture only, no console output
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if *meta.level() > self.max_level {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let record = LogRecord {
            timestamp: Utc::now(),
            level: *meta.level(),
            target: meta.target().to_string(),
            message: visitor.finish(),
        };

        if self.echo {
            emit(&self.app_name, &record);
        }
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(record);
        }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.join(" ")
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(app_name: &str, record: &LogRecord) {
    let line = wasm_bindgen::JsValue::from_str(&format!("[{}] {}", app_name, record));
    match record.level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        Level::INFO => web_sys::console::log_1(&line),
        _ => web_sys::console::debug_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(app_name: &str, record: &LogRecord) {
    eprintln!("[{}] {}", app_name, record);
}

/// Install the global subscriber. Call once at startup.
pub fn init_logger(app_name: &str, capacity: usize, max_level: Level) -> Result<(), LoggerError> {
    let buffer = Arc::new(Mutex::new(RingBuffer::new(capacity)));
    SHARED.set(buffer.clone()).map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing_subscriber::registry()
        .with(RollingLayer::new(app_name, max_level, buffer))
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))
}

/// Newest `n` records captured by the global logger
pub fn recent(n: usize) -> Vec<LogRecord> {
    SHARED
        .get()
        .and_then(|buffer| buffer.lock().ok().map(|b| b.recent(n)))
        .unwrap_or_default()
}

pub fn info(msg: &str) {
    log::info!(target: "rolling_logger", "{}", msg);
}

pub fn error(msg: &str) {
    log::error!(target: "rolling_logger", "{}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str) -> LogRecord {
        LogRecord {
            timestamp: Utc::now(),
            level: Level::INFO,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(LoggerError::AlreadyInitialized.to_string(), "logger already initialized");
        let err: Box<dyn std::error::Error> = Box::new(LoggerError::Subscriber("global default set".to_string()));
        assert_eq!(err.to_string(), "failed to install subscriber: global default set");
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut ring = RingBuffer::new(3);
        for i in 0..5 {
            ring.push(record(&format!("line {}", i)));
        }

        assert_eq!(ring.len(), 3);
        let lines: Vec<String> = ring.recent(10).into_iter().map(|r| r.message).collect();
        assert_eq!(lines, vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_recent_returns_newest_in_order() {
        let mut ring = RingBuffer::new(10);
        for i in 0..4 {
            ring.push(record(&format!("line {}", i)));
        }
        let lines: Vec<String> = ring.recent(2).into_iter().map(|r| r.message).collect();
        assert_eq!(lines, vec!["line 2", "line 3"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut ring = RingBuffer::new(0);
        ring.push(record("a"));
        ring.push(record("b"));
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.recent(1)[0].message, "b");
    }

    #[test]
    fn test_layer_captures_message_and_fields() {
        let buffer = Arc::new(Mutex::new(RingBuffer::new(8)));
        let layer = RollingLayer::new("Test", Level::INFO, buffer.clone()).quiet();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(task = "t1", "moved task");
            tracing::debug!("filtered out");
            tracing::warn!("slow response");
        });

        let records = buffer.lock().unwrap().recent(8);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "moved task task=t1");
        assert_eq!(records[0].level, Level::INFO);
        assert_eq!(records[1].message, "slow response");
        assert_eq!(records[1].level, Level::WARN);
    }
}
