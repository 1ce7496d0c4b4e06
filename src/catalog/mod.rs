//! The immutable mandal catalog.
//!
//! A [`Catalog`] is built once at plugin load, either from the data compiled
//! into the plugin or from a user-supplied file, and never changes afterwards.
//! It owns the only copy of every [`Mandal`]; screens borrow from it.
//!
//! # File formats
//!
//! JSON catalogs are a top-level array of mandal objects (the same layout as
//! the bundled `data/mandals.json`). TOML catalogs use an array of tables:
//!
//! ```toml
//! [[mandals]]
//! id = "1"
//! name = "Lalbaugcha Raja"
//! area = "Lalbaug"
//! address = "Lalbaug Market, Mumbai"
//! distance = "1.2 km"
//! visitingHours = "24 hours"
//! establishedYear = 1934
//! crowdLevel = "Very High"
//! specialFeatures = ["Navsacha Ganpati"]
//! contactInfo = { phone = "+91 22 2471 5000" }
//! ```

use crate::domain::error::{MandalGuideError, Result};
use crate::domain::Mandal;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../../data/mandals.json");

/// One entry of the area summary list: an area and how many mandals it has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaSummary {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    mandals: Vec<Mandal>,
}

/// Read-only, ordered collection of mandals with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    mandals: Vec<Mandal>,
}

impl Catalog {
    /// Builds a catalog, rejecting empty or duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`MandalGuideError::Catalog`] naming the first offending id.
    pub fn new(mandals: Vec<Mandal>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(mandals.len());
        for mandal in &mandals {
            if mandal.id.trim().is_empty() {
                return Err(MandalGuideError::Catalog(format!(
                    "mandal `{}` has an empty id",
                    mandal.name
                )));
            }
            if !seen.insert(mandal.id.as_str()) {
                return Err(MandalGuideError::Catalog(format!(
                    "duplicate mandal id `{}`",
                    mandal.id
                )));
            }
        }
        Ok(Self { mandals })
    }

    /// The catalog bundled with the plugin.
    ///
    /// # Panics
    ///
    /// Panics if the bundled data fails to parse (should never occur).
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_CATALOG).expect("Bundled mandal catalog should always parse")
    }

    /// Parses a JSON catalog (top-level array of mandals).
    ///
    /// # Errors
    ///
    /// Returns an error for invalid JSON or violated catalog invariants.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mandals: Vec<Mandal> = serde_json::from_str(json)?;
        Self::new(mandals)
    }

    /// Parses a TOML catalog (`[[mandals]]` tables).
    ///
    /// # Errors
    ///
    /// Returns an error for invalid TOML or violated catalog invariants.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let parsed: TomlCatalog = toml::from_str(contents)
            .map_err(|e| MandalGuideError::Catalog(format!("Failed to parse catalog TOML: {e}")))?;
        Self::new(parsed.mandals)
    }

    /// Loads a catalog file, choosing the parser by extension.
    ///
    /// `.toml` files use the TOML layout, anything else is read as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let catalog = if is_toml {
            Self::from_toml_str(&contents)?
        } else {
            Self::from_json_str(&contents)?
        };

        tracing::debug!(path = %path.display(), mandals = catalog.len(), "catalog file loaded");
        Ok(catalog)
    }

    /// All mandals in catalog order.
    #[must_use]
    pub fn mandals(&self) -> &[Mandal] {
        &self.mandals
    }

    /// Looks a mandal up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Mandal> {
        self.mandals.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mandals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mandals.is_empty()
    }

    /// Distinct areas in order of first appearance, with their mandal counts.
    #[must_use]
    pub fn areas(&self) -> Vec<AreaSummary> {
        let mut summaries: Vec<AreaSummary> = Vec::new();
        for mandal in &self.mandals {
            match summaries.iter_mut().find(|s| s.name == mandal.area) {
                Some(summary) => summary.count += 1,
                None => summaries.push(AreaSummary {
                    name: mandal.area.clone(),
                    count: 1,
                }),
            }
        }
        summaries
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
