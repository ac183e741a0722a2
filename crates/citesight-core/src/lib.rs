pub mod config;
pub mod fetch;
pub mod llm;
pub mod logging;
pub mod outcome;
pub mod research;
pub mod search;
pub mod summarize;

pub use config::{Config, ConfigError, LLMConfig};
pub use fetch::{ContentFetcher, FetchedContent};
pub use llm::{LLMError, OpenAIClient, LLM};
pub use outcome::{DegradeReason, Outcome};
pub use research::{ExportFormat, ResearchPipeline, ResearchReport};
pub use search::{SearchProvider, SearchResult};
pub use summarize::{SummarizationService, Summarizer, SummaryArtifact};
