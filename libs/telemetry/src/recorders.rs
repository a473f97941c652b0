use crate::context::TelemetryLabels;
use tracing::Span;

pub fn with_common_fields(span: &Span, request_id: &str, outcome: Option<&str>) {
    span.record("request_id", tracing::field::display(request_id));
    if let Some(outcome) = outcome {
        span.record("outcome", tracing::field::display(outcome));
    }
}

pub fn record_counter(name: &'static str, value: u64, labels: &TelemetryLabels) {
    ::metrics::counter!(name, &labels.tags()).increment(value);
}

pub fn record_histogram(name: &'static str, value: f64, labels: &TelemetryLabels) {
    ::metrics::histogram!(name, &labels.tags()).record(value);
}
