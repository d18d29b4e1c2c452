//! In-memory event capture for log assertions in tests
//!
//! Every event is flattened into a [`CapturedEvent`]: the canonical `op`,
//! `event` and `component` keys are lifted out, everything else stays in
//! `fields` as text.

use crate::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, FIELD_COMPONENT, FIELD_CONSTRAINT_COUNT, FIELD_ERR_CODE,
    FIELD_EVENT, FIELD_OP,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

/// One recorded event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn from_fields(level: Level, mut fields: HashMap<String, String>) -> Self {
        Self {
            level,
            component: fields.remove(FIELD_COMPONENT),
            op: fields.remove(FIELD_OP),
            event: fields.remove(FIELD_EVENT),
            fields,
        }
    }

    /// Value of a non-canonical field, as text
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// True for the `event` of operation `op`
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op.as_deref() == Some(op) && self.event.as_deref() == Some(event)
    }

    /// `constraint_count` of an end event
    pub fn constraint_count(&self) -> Option<usize> {
        self.field(FIELD_CONSTRAINT_COUNT)?.parse().ok()
    }

    /// `err.code` of an error event
    pub fn err_code(&self) -> Option<&str> {
        self.field(FIELD_ERR_CODE)
    }
}

#[derive(Default)]
struct FieldRecorder(HashMap<String, String>);

impl FieldRecorder {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldRecorder {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }
}

/// Layer appending every event to a shared buffer
pub struct TestCaptureLayer {
    sink: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let sink = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                sink: Arc::clone(&sink),
            },
            TestCapture { sink },
        )
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        let captured = CapturedEvent::from_fields(*event.metadata().level(), recorder.0);

        if let Ok(mut sink) = self.sink.lock() {
            sink.push(captured);
        }
    }
}

/// Read side of the capture buffer
#[derive(Clone)]
pub struct TestCapture {
    sink: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.sink
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Events of one operation, in emission order
    pub fn events_for(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// Successful end events of `op`
    pub fn ends_of(&self, op: &str) -> Vec<CapturedEvent> {
        self.events_for(op)
            .into_iter()
            .filter(|e| e.event.as_deref() == Some(EVENT_END))
            .collect()
    }

    /// Error end events of `op`
    pub fn errors_of(&self, op: &str) -> Vec<CapturedEvent> {
        self.events_for(op)
            .into_iter()
            .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
            .collect()
    }

    /// # Panics
    ///
    /// If no `event` of `op` was captured.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "no {}/{} event among {} captured",
            op,
            event,
            events.len()
        );
    }

    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capturing layer as the global subscriber
///
/// Only the first call installs it; every call returns a handle to the same
/// buffer. Tests in one binary share that buffer, so assertions should
/// filter on something unique to the test (an op name, a file path).
///
/// # Example
///
/// ```
/// use depconstrain_core::logging_facility::test_capture::init_test_capture;
/// use depconstrain_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            tracing_subscriber::registry().with(layer).init();
            capture
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(pairs: &[(&str, &str)]) -> CapturedEvent {
        let fields = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CapturedEvent::from_fields(Level::INFO, fields)
    }

    #[test]
    fn test_canonical_keys_lifted_out_of_fields() {
        let captured = event(&[
            ("op", "load_constraints"),
            ("event", "end"),
            ("component", "depconstrain_loader::loader"),
            ("constraint_count", "3"),
        ]);

        assert!(captured.is("load_constraints", "end"));
        assert_eq!(captured.component.as_deref(), Some("depconstrain_loader::loader"));
        assert_eq!(captured.field("op"), None);
        assert_eq!(captured.constraint_count(), Some(3));
    }

    #[test]
    fn test_error_code_lookup() {
        let captured = event(&[("op", "read_json"), ("err.code", "ERR_EMPTY_DOCUMENT")]);
        assert_eq!(captured.err_code(), Some("ERR_EMPTY_DOCUMENT"));
        assert_eq!(captured.constraint_count(), None);
    }
}
