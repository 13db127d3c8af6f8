//! Configuration types for Stemma corpus processing.
//!
//! This module provides configuration structures that control how relation
//! graphs are rendered and which annotation layer is consulted by default.
//! All types implement [`serde::Deserialize`] for flexible loading from
//! external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining renderer and annotation settings.
//! - [`RendererConfig`] - Controls the external layout process used for graph rendering.
//! - [`AnnotationConfig`] - Controls annotation-layer defaults such as the relation type.
//!
//! # Example
//!
//! ```
//! # use stemma::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.renderer().program(), "dot");
//! ```

use std::{
    fmt::{self, Display},
    str::FromStr,
    time::Duration,
};

use serde::{Deserialize, Serialize};

/// Top-level application configuration combining renderer and annotation
/// settings.
///
/// Groups [`RendererConfig`] and [`AnnotationConfig`] into a single
/// configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Renderer configuration section.
    #[serde(default)]
    renderer: RendererConfig,

    /// Annotation configuration section.
    #[serde(default)]
    annotation: AnnotationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified renderer and annotation
    /// configurations.
    ///
    /// # Arguments
    ///
    /// * `renderer` - External layout-process settings.
    /// * `annotation` - Annotation-layer defaults.
    pub fn new(renderer: RendererConfig, annotation: AnnotationConfig) -> Self {
        Self {
            renderer,
            annotation,
        }
    }

    /// Returns the renderer configuration.
    pub fn renderer(&self) -> &RendererConfig {
        &self.renderer
    }

    /// Returns the annotation configuration.
    pub fn annotation(&self) -> &AnnotationConfig {
        &self.annotation
    }
}

/// Output formats supported by the external layout process.
///
/// The names match external configuration strings (snake_case) and the
/// format flag passed to the process (`-Tsvg` etc.).
///
/// # Variants
///
/// - `Svg` - Scalable vector output (default)
/// - `Png` - Raster output
/// - `Pdf` - Print-oriented output
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Scalable vector output (default)
    #[default]
    Svg,
    /// Raster output
    Png,
    /// Print-oriented output
    Pdf,
}

impl FromStr for OutputFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            _ => Err("Unsupported output format"),
        }
    }
}

impl From<OutputFormat> for &'static str {
    fn from(val: OutputFormat) -> Self {
        match val {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// External layout-process configuration for graph rendering.
///
/// Controls which program is invoked, the output format it is asked for,
/// the time budget per invocation, and whether warning-only diagnostics are
/// tolerated.
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    /// Executable invoked to lay out graph descriptions.
    #[serde(default = "default_program")]
    program: String,

    /// Output format requested from the layout process.
    #[serde(default)]
    format: OutputFormat,

    /// Wall-clock budget for one invocation, in seconds. No limit when
    /// unset.
    #[serde(default)]
    timeout_secs: Option<u64>,

    /// Accept warning-only diagnostics when the process exits zero.
    #[serde(default)]
    tolerate_warnings: bool,
}

fn default_program() -> String {
    "dot".to_string()
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            format: OutputFormat::default(),
            timeout_secs: None,
            tolerate_warnings: false,
        }
    }
}

impl RendererConfig {
    /// Returns the configured layout program.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the configured [`OutputFormat`].
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns the per-invocation time budget, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Returns whether warning-only diagnostics are tolerated on successful
    /// exits.
    pub fn tolerate_warnings(&self) -> bool {
        self.tolerate_warnings
    }

    /// Replaces the layout program.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Replaces the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the per-invocation time budget in seconds.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Sets whether warning-only diagnostics are tolerated.
    pub fn with_tolerate_warnings(mut self, tolerate: bool) -> Self {
        self.tolerate_warnings = tolerate;
        self
    }
}

/// Annotation-layer defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationConfig {
    /// Relation type consulted when a request does not name one.
    #[serde(default = "default_relation_type")]
    relation_type: String,
}

fn default_relation_type() -> String {
    "Discourse".to_string()
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            relation_type: default_relation_type(),
        }
    }
}

impl AnnotationConfig {
    /// Returns the default relation type.
    pub fn relation_type(&self) -> &str {
        &self.relation_type
    }
}
