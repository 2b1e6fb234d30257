mod provider;
mod span;

pub use provider::init_tracer_provider;
pub use span::{OperationSpan, SpanEmitter};
