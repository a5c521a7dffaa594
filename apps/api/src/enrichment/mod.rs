// Enrichment pipeline: request validation, polling orchestration, result
// reduction. All remote calls go through the `remote` module — no direct
// AssemblyAI or Groq calls here.

pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod reducer;
pub mod service;
