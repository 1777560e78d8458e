//! Integration Tests Module
//!
//! End-to-end tests for Persona Panel against scripted generators.
//! Tests cover the design review panel, consensus aggregation, and the
//! chat-turn path (generation, fallback, humanization, delay and typing).

// Scripted generator and persona fixtures
mod support;

// Review panel collection and failure isolation tests
mod panel_test;

// Aggregation over collected panels
mod aggregation_test;

// Chat turn responder tests
mod chat_turn_test;
