//! Configuration System
//!
//! Layered configuration for drawing generation: sheet format and setup, note placement,
//! export options, session storage and logging. Values are merged from defaults, the user's
//! global file, workspace files and `WELDSHEET_*` environment overrides.

use crate::drawing::{Anchor, MissingViewPolicy, PaperSize, Scale, SheetFormat, SheetSetup};
use crate::drawing::{DEFAULT_NOTE_ANCHOR, DEFAULT_TEMPLATE_PATH};
use crate::logging::LoggingConfig;
use crate::orchestrator::PipelineSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeldsheetConfig {
    #[serde(default)]
    pub drawing: DrawingConfig,

    #[serde(default)]
    pub notes: NotesConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub system: SystemConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sheet format and setup applied to every generated drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Drawing template. Not checked for existence; the host resolves it.
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    #[serde(default)]
    pub paper_size: PaperSize,

    #[serde(default)]
    pub scale: Scale,

    /// First-angle projection instead of third-angle.
    #[serde(default)]
    pub first_angle: bool,

    #[serde(default)]
    pub missing_view_policy: MissingViewPolicy,
}

fn default_template_path() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATE_PATH)
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            template_path: default_template_path(),
            paper_size: PaperSize::default(),
            scale: Scale::default(),
            first_angle: false,
            missing_view_policy: MissingViewPolicy::default(),
        }
    }
}

impl DrawingConfig {
    pub fn sheet_setup(&self) -> SheetSetup {
        let mut setup = SheetSetup::new(SheetFormat {
            template: self.template_path.clone(),
            paper_size: self.paper_size,
        });
        setup.scale = self.scale;
        setup.first_angle_projection = self.first_angle;
        setup
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Sheet position of placed notes.
    #[serde(default = "default_note_anchor")]
    pub anchor: Anchor,
}

fn default_note_anchor() -> Anchor {
    DEFAULT_NOTE_ANCHOR
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            anchor: default_note_anchor(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_true")]
    pub pdf_all_sheets: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pdf_all_sheets: true,
        }
    }
}

/// System-wide configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Session store directory, relative to the workspace root unless absolute.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".weldsheet/store")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Drawing(String),
    Notes(String),
    System(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Drawing(msg) => write!(f, "Drawing: {}", msg),
            ValidationError::Notes(msg) => write!(f, "Notes: {}", msg),
            ValidationError::System(msg) => write!(f, "System: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl DrawingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.template_path.as_os_str().is_empty() {
            return Err("Template path cannot be empty".to_string());
        }
        let Scale {
            numerator,
            denominator,
        } = self.scale;
        if !(numerator.is_finite() && numerator > 0.0 && denominator.is_finite() && denominator > 0.0)
        {
            return Err(format!(
                "Scale must be positive, got {}:{}",
                numerator, denominator
            ));
        }
        Ok(())
    }
}

impl NotesConfig {
    pub fn validate(&self) -> Result<(), String> {
        let Anchor { x, y } = self.anchor;
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return Err(format!("Note anchor must be a non-negative point, got {}", self.anchor));
        }
        Ok(())
    }
}

impl SystemConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.storage.store_path.as_os_str().is_empty() {
            return Err("Store path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl WeldsheetConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.drawing.validate() {
            errors.push(ValidationError::Drawing(e));
        }
        if let Err(e) = self.notes.validate() {
            errors.push(ValidationError::Notes(e));
        }
        if let Err(e) = self.system.validate() {
            errors.push(ValidationError::System(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Settings handed to the orchestrator.
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            setup: self.drawing.sheet_setup(),
            missing_view_policy: self.drawing.missing_view_policy,
            note_anchor: self.notes.anchor,
            pdf_all_sheets: self.export.pdf_all_sheets,
        }
    }
}
