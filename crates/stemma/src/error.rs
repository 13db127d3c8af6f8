//! Error types for Stemma operations.
//!
//! This module provides the main error type [`StemmaError`] which wraps
//! the error conditions that can occur while loading, analyzing, and
//! rendering corpus divisions.

use std::io;

use thiserror::Error;

use stemma_core::{error::ModelError, identifier::DivisionId};

use crate::render::RenderError;

/// The main error type for Stemma operations.
#[derive(Debug, Error)]
pub enum StemmaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Division {0} not found in the corpus")]
    DivisionNotFound(DivisionId),

    #[error("Corpus snapshot error: {0}")]
    Corpus(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
