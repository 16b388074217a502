//! Part descriptions: the multi-body part and its cutlist groups.
//!
//! A description is what the host would report for an open weldment part: an ordered
//! list of solid bodies plus the cutlist items that group them into structural members.
//! Descriptions load from TOML or JSON so parts can be brought into a session.

use crate::error::CommandError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One structural member: a named group of bodies in iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutlistItem {
    pub name: String,
    #[serde(default)]
    pub bodies: Vec<String>,
}

impl CutlistItem {
    pub fn new(name: impl Into<String>, bodies: &[&str]) -> Self {
        Self {
            name: name.into(),
            bodies: bodies.iter().map(|b| b.to_string()).collect(),
        }
    }

    /// First body in iteration order, the one drawn for this member.
    pub fn representative_body(&self) -> Option<&str> {
        self.bodies.first().map(String::as_str)
    }
}

/// Serialized form of a part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDescription {
    /// Path of the part file; views are created from this path.
    pub path: PathBuf,
    /// All solid bodies of the part, in host order.
    #[serde(default)]
    pub bodies: Vec<String>,
    #[serde(default)]
    pub cutlists: Vec<CutlistItem>,
}

impl PartDescription {
    /// Load a description from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, CommandError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommandError::InvalidInput(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let description = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content)?,
            _ => Self::from_toml(&content)?,
        };
        description.validate()?;
        Ok(description)
    }

    pub fn from_toml(content: &str) -> Result<Self, CommandError> {
        toml::from_str(content)
            .map_err(|e| CommandError::InvalidInput(format!("Invalid part description: {}", e)))
    }

    pub fn from_json(content: &str) -> Result<Self, CommandError> {
        serde_json::from_str(content)
            .map_err(|e| CommandError::InvalidInput(format!("Invalid part description: {}", e)))
    }

    /// Body names must be unique and every cutlist body must belong to the part.
    ///
    /// A description with no top-level body list takes its bodies from the cutlists.
    pub fn validate(&self) -> Result<(), CommandError> {
        let mut seen = HashSet::new();
        for body in &self.bodies {
            if !seen.insert(body.as_str()) {
                return Err(CommandError::InvalidInput(format!(
                    "Duplicate body name '{}'",
                    body
                )));
            }
        }
        if self.bodies.is_empty() {
            return Ok(());
        }
        for item in &self.cutlists {
            for body in &item.bodies {
                if !seen.contains(body.as_str()) {
                    return Err(CommandError::InvalidInput(format!(
                        "Cutlist '{}' references unknown body '{}'",
                        item.name, body
                    )));
                }
            }
        }
        Ok(())
    }

    /// Bodies in host order, falling back to cutlist order when none were listed.
    pub fn all_bodies(&self) -> Vec<String> {
        if !self.bodies.is_empty() {
            return self.bodies.clone();
        }
        let mut seen = HashSet::new();
        self.cutlists
            .iter()
            .flat_map(|item| item.bodies.iter())
            .filter(|b| seen.insert(b.as_str()))
            .cloned()
            .collect()
    }
}
