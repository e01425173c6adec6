use std::rc::Rc;

use crate::error::CassiaError;
use crate::render::render;
use crate::value::Value;

/// Host-provided destination for debug lines.
pub trait DebugSink {
    fn write(&self, line: &str);
}

/// Sink that prints to stdout.
pub struct ConsoleSink;

impl DebugSink for ConsoleSink {
    fn write(&self, line: &str) {
        println!("DEBUG {}", line);
    }
}

/// Renders values into an optional sink; without one, `debug` is a no-op.
#[derive(Clone, Default)]
pub struct Debugger {
    sink: Option<Rc<dyn DebugSink>>,
}

impl Debugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: Rc<dyn DebugSink>) -> Self {
        Self { sink: Some(sink) }
    }

    pub fn debug(&self, value: &Value) {
        if let Some(sink) = &self.sink {
            sink.write(&render(value));
        }
    }
}

/// Ok only for the literal true.
pub fn assert_true(value: &Value) -> Result<(), CassiaError> {
    match value {
        Value::Bool(true) => Ok(()),
        other => Err(CassiaError::failed_assertion(format!(
            "expected true, got {}",
            render(other)
        ))),
    }
}
