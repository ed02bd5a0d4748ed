//! Shared test helpers for `asodi-core` integration tests.
//!
//! In-memory sources and sinks plus fixture builders, so scenario tests can
//! focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod fixtures;
pub mod repositories;
