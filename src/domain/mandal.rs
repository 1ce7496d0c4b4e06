//! Mandal domain model.
//!
//! A [`Mandal`] is one community-organised Ganeshotsav pavilion. Records are
//! read-only: they come from the catalog at plugin load and are never created,
//! updated or deleted afterwards. Field names on the wire follow the catalog
//! files (`visitingHours`, `establishedYear`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

/// How crowded a mandal usually gets during the festival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrowdLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl CrowdLevel {
    /// Label shown in lists and on the detail screen.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Contact details published by a mandal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub phone: Option<String>,
}

/// One festival site in the catalog.
///
/// `id` is unique within a catalog and stable for its lifetime. Everything
/// else is descriptive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mandal {
    pub id: String,
    pub name: String,
    pub area: String,
    pub address: String,
    pub distance: String,
    pub visiting_hours: String,
    pub established_year: i32,
    pub crowd_level: CrowdLevel,
    #[serde(default)]
    pub special_features: Vec<String>,
    #[serde(default)]
    pub contact_info: ContactInfo,
}

impl Mandal {
    /// Returns the `"{area} • {distance}"` line used under every mandal name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mandalguide::domain::{ContactInfo, CrowdLevel, Mandal};
    /// let mandal = Mandal {
    ///     id: "1".into(),
    ///     name: "Lalbaugcha Raja".into(),
    ///     area: "Lalbaug".into(),
    ///     address: "Lalbaug Market, Mumbai".into(),
    ///     distance: "1.2 km".into(),
    ///     visiting_hours: "24 hours".into(),
    ///     established_year: 1934,
    ///     crowd_level: CrowdLevel::VeryHigh,
    ///     special_features: vec![],
    ///     contact_info: ContactInfo::default(),
    /// };
    /// assert_eq!(mandal.location_line(), "Lalbaug • 1.2 km");
    /// ```
    #[must_use]
    pub fn location_line(&self) -> String {
        format!("{} • {}", self.area, self.distance)
    }

    /// Number of years the mandal has been celebrating as of `current_year`.
    ///
    /// Never negative, even for records dated in the future.
    #[must_use]
    pub fn years_active(&self, current_year: i32) -> i32 {
        (current_year - self.established_year).max(0)
    }

    /// The "About this mandal" paragraph of the detail screen.
    #[must_use]
    pub fn about(&self, current_year: i32) -> String {
        let mut text = format!(
            "{} is a revered Ganpati mandal established in {} in the vibrant locality of {}. \
             This sacred place has been serving devotees for over {} years, making it an \
             integral part of Mumbai's rich cultural heritage during Ganesh Chaturthi.",
            self.name,
            self.established_year,
            self.area,
            self.years_active(current_year),
        );

        if !self.special_features.is_empty() {
            let features = self.special_features.join(", ").to_lowercase();
            text.push_str(&format!(
                " Known for its {features}, this mandal continues to attract thousands of \
                 devotees every year."
            ));
        }

        text
    }
}
