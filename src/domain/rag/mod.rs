//! RAG value types: responses, prompts, context assembly, session history

mod context;
pub mod messages;
pub mod prompt;
mod response;
mod session;

pub use context::assemble_context;
pub use response::{
    Answerable, ComparisonResult, DirectResponse, QueryAnswer, RagResponse, ResponseMetadata,
    Timings,
};
pub use session::{QueryRecord, SessionState};
