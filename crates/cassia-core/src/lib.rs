pub mod debug;
pub mod deep;
pub mod equality;
pub mod error;
pub mod render;
pub mod setops;
pub mod value;

mod canonical;

pub use debug::{assert_true, ConsoleSink, DebugSink, Debugger};
pub use deep::clone_value;
pub use equality::equals;
pub use error::CassiaError;
pub use render::render;
pub use setops::{difference, index_of, intersect, subset, union};
pub use value::{MapHandle, RecordHandle, SeqHandle, SetHandle, Value};
