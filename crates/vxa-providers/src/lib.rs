//! vxa-providers: LLM provider implementations for v2ex-analyst
//!
//! A single OpenAI-compatible chat-completions provider; any server that
//! speaks the same wire protocol works through `with_base_url`.

mod openai;

pub use openai::OpenAIProvider;
