//! # essay-qa
//!
//! A small web application that answers questions about one essay. The
//! essay directory is indexed once per process and every query is answered
//! with a tree-summarize pass over all of its nodes.
//!
//! ## Architecture
//!
//! ```text
//!        ┌──────────────┐
//!        │  ./data/**   │
//!        └──────┬───────┘
//!               │ corpus::load_documents
//!               ▼
//!        ┌──────────────┐
//!        │  Documents   │
//!        └──────┬───────┘
//!               │ chunking::split_text (1024 tok, 20 overlap)
//!               ▼
//!        ┌──────────────┐     built once, held in IndexCache
//!        │ SummaryIndex │◄──────────────────────────────┐
//!        └──────┬───────┘                               │
//!               │ all nodes                             │
//!               ▼                                       │
//!   ┌───────────────────────┐                           │
//!   │  Repack to budget     │◄──────┐                   │
//!   └───────────┬───────────┘       │ summaries         │
//!               │                   │                   │
//!        1 chunk│   n chunks        │                   │
//!               │ ──────────► summarize each ───────────┘
//!               ▼
//!   ┌───────────────────────┐
//!   │ Final LLM call → text │
//!   └───────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, corpus dir, and LLM settings
//! - [`credentials`] - API key precondition check run before anything else
//! - [`corpus`] - Recursive directory reader producing [`models::Document`]s
//! - [`chunking`] - Paragraph-aware text splitting and prompt repacking
//! - [`index`] - `SummaryIndex` construction and the process-wide `IndexCache`
//! - [`llm`] - `LanguageModel` trait and the OpenAI/Ollama chat client
//! - [`query`] - Tree-summarize query engine
//! - [`api`] - Axum handlers for the single-page UI
//! - [`state`] - Shared application state holding the index cache, config, and LLM

pub mod api;
pub mod chunking;
pub mod config;
pub mod corpus;
pub mod credentials;
pub mod error;
pub mod index;
pub mod llm;
pub mod models;
pub mod query;
pub mod state;
