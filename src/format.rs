//! JSON record formatter.
//!
//! `tracing` only records field values as strings or primitives, so the
//! logger hands structured fields over as one pre-serialized JSON object in
//! the [`FIELDS`] field. [`JsonRecord`] parses it back and writes one object
//! per line:
//!
//! ```text
//! {"timestamp":"2025-01-01T12:00:00.000000Z","level":"INFO","message":"started","fields":{"workers":4}}
//! ```

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::registry::LookupSpan;

/// Name of the event field carrying the serialized key/value pairs. The
/// logger records it under this literal name.
pub(crate) const FIELDS: &str = "fields";

/// Formats each event as a single-line JSON object with typed fields.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct JsonRecord;

#[derive(Serialize)]
struct Record<'a> {
    timestamp: &'a str,
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Value>,
}

#[derive(Default)]
struct RecordVisitor {
    message: String,
    fields: Option<Value>,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            FIELDS => self.fields = Some(parse_fields(value)),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            FIELDS => self.fields = Some(parse_fields(&format!("{:?}", value))),
            _ => {}
        }
    }
}

fn parse_fields(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

impl<S, N> FormatEvent<S, N> for JsonRecord
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut timestamp = String::new();
        SystemTime.format_time(&mut Writer::new(&mut timestamp))?;

        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let level = event.metadata().level().to_string();
        let record = Record {
            timestamp: &timestamp,
            level: &level,
            message: &visitor.message,
            fields: visitor.fields,
        };
        let line = serde_json::to_string(&record).map_err(|_| fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn format_with<F: FnOnce()>(f: F) -> Vec<Value> {
        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .event_format(JsonRecord)
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let out = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        out.lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_fields_become_an_object() {
        let records = format_with(|| {
            let fields = json!({ "count": 42, "user": "bob smith" });
            tracing::info!(fields = %fields, "{}", "login");
        });
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["level"], "INFO");
        assert_eq!(records[0]["message"], "login");
        assert_eq!(records[0]["fields"]["count"], 42);
        assert_eq!(records[0]["fields"]["user"], "bob smith");
        assert!(records[0]["timestamp"].is_string());
    }

    #[test]
    fn test_record_without_fields() {
        let records = format_with(|| tracing::warn!("{}", "plain"));
        assert_eq!(records[0]["level"], "WARN");
        assert_eq!(records[0]["message"], "plain");
        assert!(records[0].get("fields").is_none());
    }

    #[test]
    fn test_message_with_quotes_stays_valid_json() {
        let records = format_with(|| tracing::error!("{}", "said \"no\"\nthen left"));
        assert_eq!(records[0]["message"], "said \"no\"\nthen left");
    }
}
