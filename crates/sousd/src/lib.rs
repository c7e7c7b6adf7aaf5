//! Sous Daemon - recipe suggestion proxy.
//!
//! Accepts a free-text prompt over HTTP, forwards it once to a hosted
//! text-generation model, extracts a JSON array of recipe suggestions
//! from the model's output, and returns it (or a typed error) to the
//! caller.

pub mod config;
pub mod extract;
pub mod limit;
pub mod prompts;
pub mod routes;
pub mod server;
pub mod suggest;
pub mod upstream;
