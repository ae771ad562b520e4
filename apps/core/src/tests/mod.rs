//! Test Module
//!
//! Cross-module test suite for the ChefMate core.
//!
//! ## Test Categories
//! - `brain_tests`: domain gate, intent priority, dish extraction, fuzzy matching, availability
//! - `actor_tests`: mock collaborators, the assistant actor, concurrency and failure isolation
//! - `router_tests`: every intent path and its fallback chain
//! - `integration_tests`: full workflows over the in-memory store and mocked HTTP services

pub mod actor_tests;
