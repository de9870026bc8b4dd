//! The hosted completion-service client.

pub mod groq_api_agent;

pub use groq_api_agent::GroqApiAgent;
