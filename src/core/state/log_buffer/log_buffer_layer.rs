use std::fmt::Write as _;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use super::log_entry::Severity;
use super::memory_log_buffer::MemoryLogBuffer;

/// Feeds every tracing event into the in-memory log buffer.
#[derive(Clone)]
pub struct LogBufferLayer {
    buffer: Arc<MemoryLogBuffer>,
}

impl LogBufferLayer {
    pub fn new(buffer: Arc<MemoryLogBuffer>) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for LogBufferLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = EntryVisitor::default();
        event.record(&mut visitor);

        let meta = event.metadata();
        self.buffer.push(
            Severity::from(meta.level()),
            meta.target(),
            visitor.message(),
            visitor.exception,
        );
    }
}

/// `message` becomes the text, `error` the exception, the rest trail as `k=v`.
#[derive(Default)]
struct EntryVisitor {
    message: String,
    extra: String,
    exception: Option<String>,
}

impl EntryVisitor {
    fn message(&self) -> String {
        match (self.message.is_empty(), self.extra.is_empty()) {
            (_, true) => self.message.clone(),
            (true, false) => self.extra.clone(),
            (false, false) => format!("{} {}", self.message, self.extra),
        }
    }

    fn push_extra(&mut self, field: &Field, value: &dyn std::fmt::Display) {
        if !self.extra.is_empty() {
            self.extra.push(' ');
        }
        let _ = write!(self.extra, "{}={}", field.name(), value);
    }
}

impl Visit for EntryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "error" | "e" => self.exception = Some(value.to_string()),
            _ => self.push_extra(field, &value),
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.exception = Some(format!("{}: {}", field.name(), value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "error" | "e" => self.exception = Some(format!("{value:?}")),
            _ => self.push_extra(field, &format!("{value:?}")),
        }
    }
}
