//! Install manifest
//!
//! The manifest declares what gets installed: a version string and, per
//! category, the list of entries to copy from the source tree into the
//! target root. It is trusted but still schema-checked when loaded; the
//! entries themselves are validated one by one at install time so a single
//! bad entry fails only itself.

pub mod category;
pub mod serialization;

use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{Result, manifest};

pub use category::Category;

/// Manifest shipped with the crate
const EMBEDDED_MANIFEST: &str = include_str!("../../assets/gyoshu-manifest.json");

/// Entries declared under one category key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntries {
    /// Category key exactly as written in the manifest
    pub category: String,
    pub entries: Vec<String>,
}

/// A loaded, schema-checked manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub version: String,
    /// Categories in manifest order
    pub files: Vec<CategoryEntries>,
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (version, files) = serialization::deserialize_manifest(deserializer)?;
        Ok(Self { version, files })
    }
}

impl Manifest {
    /// Create an empty manifest with the given version
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            files: Vec::new(),
        }
    }

    /// Append a category with its entries
    #[must_use]
    pub fn with_category<I, S>(mut self, category: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.push(CategoryEntries {
            category: category.into(),
            entries: entries.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Load the manifest bundled into the binary
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_MANIFEST, "<embedded>")
    }

    /// Load a manifest from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| manifest::read_failed(path.display().to_string(), e.to_string()))?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse a manifest from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Self::parse(json, "<inline>")
    }

    fn parse(json: &str, origin: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json)
            .map_err(|e| manifest::parse_failed(origin, e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check structural invariants that would otherwise surface as
    /// confusing per-entry failures later
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(manifest::invalid("version must not be empty"));
        }

        for group in &self.files {
            if group.category.trim().is_empty() {
                return Err(manifest::invalid("category names must not be empty"));
            }
        }

        Ok(())
    }

    /// Iterate `(category, entry)` pairs in manifest order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().flat_map(|group| {
            group
                .entries
                .iter()
                .map(move |entry| (group.category.as_str(), entry.as_str()))
        })
    }

    /// Total number of entries across all categories
    pub fn len(&self) -> usize {
        self.files.iter().map(|g| g.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
