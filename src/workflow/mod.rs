pub mod document_ctx;
pub mod ingest_flow;

pub use document_ctx::DocumentCtx;
pub use ingest_flow::{IngestFlow, IngestOutcome};
