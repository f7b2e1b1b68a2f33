//! Function entry/data/exit tracing through explicitly passed hooks.
//!
//! Call sites receive a [`TraceContext`] and report through it; nothing is
//! installed process-wide. Each of the three hooks is optional and a context
//! with no hooks costs only the `Option` checks.

use std::sync::Arc;

use crate::utils::log::Logger;

/// Longest string value, in bytes, passed to the data hook.
pub const MAX_TRACED_STR: usize = 16;

const NULL_STR: &str = "<null>";

/// Receives one trace event: the function or prefix name plus an optional
/// rendered value.
pub trait Tracer: Send + Sync {
    fn trace(&self, name: &str, value: Option<&str>);
}

impl<F> Tracer for F
where
    F: Fn(&str, Option<&str>) + Send + Sync,
{
    fn trace(&self, name: &str, value: Option<&str>) {
        self(name, value)
    }
}

/// Values that can be rendered for the data and exit hooks.
pub trait TraceValue {
    fn trace_repr(&self) -> String;
}

impl TraceValue for bool {
    fn trace_repr(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }
}

macro_rules! integer_trace_value {
    ($($t:ty),*) => {
        $(
            impl TraceValue for $t {
                fn trace_repr(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_trace_value!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl TraceValue for f64 {
    fn trace_repr(&self) -> String {
        format_general(*self, 18)
    }
}

impl TraceValue for f32 {
    fn trace_repr(&self) -> String {
        format_general(*self as f64, 12)
    }
}

impl TraceValue for &str {
    fn trace_repr(&self) -> String {
        self.to_string()
    }
}

impl TraceValue for String {
    fn trace_repr(&self) -> String {
        self.clone()
    }
}

impl TraceValue for Option<&str> {
    fn trace_repr(&self) -> String {
        self.unwrap_or(NULL_STR).to_string()
    }
}

impl TraceValue for () {
    fn trace_repr(&self) -> String {
        String::new()
    }
}

impl<T> TraceValue for *const T {
    fn trace_repr(&self) -> String {
        format!("{:p}", *self)
    }
}

impl<T> TraceValue for *mut T {
    fn trace_repr(&self) -> String {
        format!("{:p}", *self)
    }
}

/// The three optional trace hooks.
#[derive(Clone, Default)]
pub struct TraceContext {
    entry: Option<Arc<dyn Tracer>>,
    data: Option<Arc<dyn Tracer>>,
    exit: Option<Arc<dyn Tracer>>,
}

impl TraceContext {
    /// A context with no hooks.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// A context that routes all three hooks to `tracer`.
    pub fn all(tracer: Arc<dyn Tracer>) -> Self {
        Self {
            entry: Some(tracer.clone()),
            data: Some(tracer.clone()),
            exit: Some(tracer),
        }
    }

    /// All three hooks logged at debug level.
    pub fn logging(logger: Logger) -> Self {
        Self {
            entry: Some(Arc::new(LogTracer::new(logger.clone(), "entry"))),
            data: Some(Arc::new(LogTracer::new(logger.clone(), "data"))),
            exit: Some(Arc::new(LogTracer::new(logger, "exit"))),
        }
    }

    pub fn with_entry(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.entry = Some(tracer);
        self
    }

    pub fn with_data(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.data = Some(tracer);
        self
    }

    pub fn with_exit(mut self, tracer: Arc<dyn Tracer>) -> Self {
        self.exit = Some(tracer);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.entry.is_some() || self.data.is_some() || self.exit.is_some()
    }

    pub fn entry(&self, name: &str) {
        if let Some(tracer) = &self.entry {
            tracer.trace(name, None);
        }
    }

    pub fn data<V: TraceValue>(&self, prefix: &str, value: V) {
        if let Some(tracer) = &self.data {
            tracer.trace(prefix, Some(&value.trace_repr()));
        }
    }

    /// Trace an optional string, cut to [`MAX_TRACED_STR`] bytes.
    pub fn data_str(&self, prefix: &str, value: Option<&str>) {
        if let Some(tracer) = &self.data {
            let shown = match value {
                Some(s) => truncate_at_boundary(s, MAX_TRACED_STR),
                None => NULL_STR,
            };
            tracer.trace(prefix, Some(shown));
        }
    }

    /// Trace a return value and hand it back.
    pub fn exit<V: TraceValue>(&self, name: &str, value: V) -> V {
        if let Some(tracer) = &self.exit {
            tracer.trace(name, Some(&value.trace_repr()));
        }
        value
    }

    pub fn exit_void(&self, name: &str) {
        self.exit(name, ());
    }
}

/// Forwards trace events to a [`Logger`] at debug level.
pub struct LogTracer {
    logger: Logger,
    kind: &'static str,
}

impl LogTracer {
    pub fn new(logger: Logger, kind: &'static str) -> Self {
        Self { logger, kind }
    }
}

impl Tracer for LogTracer {
    fn trace(&self, name: &str, value: Option<&str>) {
        let msg = match value {
            Some(value) => format!("{} {}: {}", self.kind, name, value),
            None => format!("{} {}", self.kind, name),
        };
        self.logger.debug("trace", &msg);
    }
}

fn truncate_at_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Render `value` like printf's `%.<precision>g`.
fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "inf" } else { "-inf" };
        return text.to_string();
    }
    if value == 0.0 {
        let text = if value.is_sign_negative() { "-0" } else { "0" };
        return text.to_string();
    }

    let precision = precision.max(1);
    // Scientific rendering gives the exponent after rounding to `precision`
    // significant digits.
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_fraction_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_fraction_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_fraction_zeros(s: &str) -> &str {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::utils::log::{LogLevel, MemoryLogger};

    fn recording() -> (Arc<Mutex<Vec<String>>>, Arc<dyn Tracer>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let tracer: Arc<dyn Tracer> = Arc::new(move |name: &str, value: Option<&str>| {
            let event = match value {
                Some(v) => format!("{name}={v}"),
                None => name.to_string(),
            };
            sink.lock().unwrap().push(event);
        });
        (events, tracer)
    }

    #[test]
    fn disabled_context_is_silent() {
        let ctx = TraceContext::disabled();
        assert!(!ctx.is_enabled());
        ctx.entry("f");
        assert_eq!(ctx.exit("f", 3u32), 3);
    }

    #[test]
    fn hooks_receive_rendered_values() {
        let (events, tracer) = recording();
        let ctx = TraceContext::all(tracer);

        ctx.entry("open");
        ctx.data("flag", true);
        ctx.data("count", -12i16);
        ctx.data_str("name", Some("a-rather-long-connection-name"));
        ctx.data_str("missing", None);
        let rc = ctx.exit("open", 0i32);
        ctx.exit_void("close");

        assert_eq!(rc, 0);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "open",
                "flag=true",
                "count=-12",
                "name=a-rather-long-co",
                "missing=<null>",
                "open=0",
                "close=",
            ]
        );
    }

    #[test]
    fn only_installed_hooks_fire() {
        let (events, tracer) = recording();
        let ctx = TraceContext::disabled().with_exit(tracer);

        ctx.entry("f");
        ctx.data("x", 1u8);
        ctx.exit("f", false);

        assert_eq!(*events.lock().unwrap(), vec!["f=false"]);
    }

    #[test]
    fn log_tracer_writes_debug_lines() {
        let sink = MemoryLogger::new();
        let logger = Logger::new(LogLevel::Debug, Arc::new(sink.clone()));
        let ctx = TraceContext::logging(logger);

        ctx.entry("parse_url");
        ctx.exit("parse_url", "ok");

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[trace] entry parse_url"));
        assert!(lines[1].ends_with("[trace] exit parse_url: ok"));
    }

    #[test]
    fn string_truncation_respects_char_boundaries() {
        assert_eq!(truncate_at_boundary("short", 16), "short");
        assert_eq!(truncate_at_boundary("ééééééééé", 16), "éééééééé");
    }

    #[test]
    fn floats_render_like_general_format() {
        assert_eq!(1.5f64.trace_repr(), "1.5");
        assert_eq!(0.0f64.trace_repr(), "0");
        assert_eq!(100.0f64.trace_repr(), "100");
        assert_eq!(0.1f32.trace_repr(), "0.10000000149");
        assert_eq!(1e20f64.trace_repr(), "1e+20");
        assert_eq!(0.00001f32.trace_repr(), "9.99999974738e-06");
        assert_eq!(f64::NAN.trace_repr(), "nan");
    }

    #[test]
    fn general_format_switches_notation_at_precision() {
        assert_eq!(format_general(1e17, 18), "100000000000000000");
        assert_eq!(format_general(123456789012345678.0, 18), "123456789012345680");
        assert_eq!(format_general(1e18, 18), "1e+18");
        // Rounds up into the next power of ten.
        assert_eq!(format_general(999999999999999999.0, 18), "1e+18");
        assert_eq!(format_general(0.0001, 18), "0.000100000000000000005");
        assert_eq!(format_general(0.00001, 18), "1.00000000000000008e-05");
    }
}
