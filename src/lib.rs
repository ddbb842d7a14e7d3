//! Bilingual Chinese-name service.
//!
//! Generates culturally grounded Chinese given names and explains existing
//! ones by prompting an OpenRouter-compatible chat gateway, then recovers a
//! JSON payload from whatever shape the model answered in. Google sign-in is
//! delegated to a Supabase identity provider.

pub mod ai;
pub mod auth;
pub mod config;
pub mod decode;
pub mod error;
pub mod models;
pub mod naming;
pub mod prompts;
pub mod render;
pub mod server;

pub use error::{Error, Result};
