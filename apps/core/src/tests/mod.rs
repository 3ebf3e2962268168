//! Test Module
//!
//! Cross-module tests for the summarization engine and the service around it.
//!
//! ## Test Categories
//! - `engine_tests`: summary sizing and ordering, analysis ranges, flashcards, Q&A
//! - `source_tests`: web, Google Docs and Notion sources against a mock server
//! - `service_tests`: input bounds, history recording, provider fallback

pub mod engine_tests;
