//! # survey-core
//!
//! Core types and pure logic for the survey compliance backend.
//!
//! This crate provides the foundational types shared across all survey crates:
//! - Entity structs for organizations, clauses, questions and responses
//! - The closed `ResponseType` classification
//! - Cross-cutting error types
//! - The response filter (organization, clause, inclusive date range)
//! - Tallies: per-organization totals and the pairwise comparison
//! - Narrative prompt construction and defensive model-output extraction
//! - HTTP-facing row types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod filter;
pub mod narrative;
pub mod responses;
pub mod tally;
