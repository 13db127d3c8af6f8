//! Stemma Core Types and Definitions
//!
//! This crate provides the corpus data model for the Stemma toolkit. It
//! includes:
//!
//! - **Identifiers**: Typed numeric ids and interned relation-type tags
//!   ([`identifier`] module)
//! - **Tokens and sentences**: The ordered leaf units of a division
//!   ([`token`] and [`sentence`] modules)
//! - **Relations**: The flat semantic-relation edge list ([`relation`]
//!   module)
//! - **Divisions and sources**: The structural hierarchy plus the derived
//!   annotation-state helpers ([`division`] and [`corpus`] modules)
//!
//! All model types serialize with `serde`, forming the JSON corpus-snapshot
//! format consumed by the command-line interface.

pub mod corpus;
pub mod division;
pub mod error;
pub mod identifier;
pub mod relation;
pub mod sentence;
pub mod token;
