mod decompose;
mod export;
mod log;
mod pipeline;
mod report;

pub use decompose::{IdentityDecomposer, QuestionDecomposer};
pub use export::{ExportError, ExportFormat};
pub use log::{LogEntry, LogStep, ResearchLog};
pub use pipeline::{PipelineError, ResearchPipeline};
pub use report::{ResearchReport, Source};
