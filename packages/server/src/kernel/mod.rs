//! Kernel module - collaborator traits, adapters and dependencies.

pub mod deps;
pub mod llm;
pub mod test_dependencies;
pub mod traits;

pub use deps::{ResendAdapter, ServerDeps, SupabaseAdapter};
pub use llm::{OpenAIExtractor, PerplexitySearch};
pub use test_dependencies::TestDependencies;
pub use traits::*;
