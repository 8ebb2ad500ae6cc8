//! LLM provider abstractions.
//!
//! A unified [`LLMClient`] trait over the supported providers:
//! - **OpenAI**: chat completions and tool calling (also covers
//!   OpenAI-compatible endpoints via a custom API base)
//! - **Ollama**: local inference
//!
//! The [`coordinator::ToolCoordinator`] builds the multi-turn tool-calling
//! loop on top of any client.

pub mod client;
pub mod coordinator;
pub mod ollama;
pub mod openai;

pub use client::{LLMClient, LLMClientFactory, LLMClientFactoryTrait, LLMResponse, Provider};
pub use coordinator::{ToolCallingConfig, ToolCoordinator};
