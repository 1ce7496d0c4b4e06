//! Mandal query engine.
//!
//! Every listing screen narrows the catalog through the functions in this
//! module, so matching behaves the same everywhere:
//!
//! - **Area filter**: [`AreaFilter::All`] keeps everything, [`AreaFilter::Only`]
//!   keeps mandals whose `area` equals the value exactly (case-sensitive).
//! - **Text filter**: blank text keeps everything; otherwise a mandal is kept
//!   when its `name` or `area` contains the text, compared lower-cased. No
//!   trimming, tokenizing or fuzzy matching.
//! - Both filters must pass, and results stay in catalog order.
//!
//! All functions are pure and never fail. An empty result is a valid answer.
//!
//! # Example
//!
//! ```
//! use mandalguide::catalog::Catalog;
//! use mandalguide::query::{filter, Query};
//!
//! let catalog = Catalog::builtin();
//! let hits = filter(catalog.mandals(), &Query::text("RAJA"));
//! assert!(hits.iter().all(|m| m.name.to_lowercase().contains("raja")
//!     || m.area.to_lowercase().contains("raja")));
//! ```

use crate::domain::Mandal;
use crate::store::FavoriteSet;

/// Sentinel used by area chips and configuration for "no area filter".
pub const ALL_AREAS: &str = "All";

/// Area restriction of a [`Query`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AreaFilter {
    #[default]
    All,
    Only(String),
}

impl AreaFilter {
    /// Whether `area` passes this filter.
    #[must_use]
    pub fn admits(&self, area: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == area,
        }
    }

    /// Chip label: the area name, or `"All"`.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_AREAS,
            Self::Only(area) => area,
        }
    }
}

impl From<&str> for AreaFilter {
    fn from(value: &str) -> Self {
        if value == ALL_AREAS {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

/// Text plus area filter, recomputed on every keystroke or chip change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub area: AreaFilter,
}

impl Query {
    #[must_use]
    pub fn new(text: impl Into<String>, area: AreaFilter) -> Self {
        Self {
            text: text.into(),
            area,
        }
    }

    /// Text-only query across all areas.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, AreaFilter::All)
    }

    /// Area-only query with no text.
    #[must_use]
    pub fn area(area: impl Into<AreaFilter>) -> Self {
        Self::new(String::new(), area.into())
    }

    /// `true` when the text is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether a single mandal satisfies both filters.
    #[must_use]
    pub fn matches(&self, mandal: &Mandal) -> bool {
        if !self.area.admits(&mandal.area) {
            return false;
        }
        if self.is_blank() {
            return true;
        }
        let needle = self.text.to_lowercase();
        mandal.name.to_lowercase().contains(&needle) || mandal.area.to_lowercase().contains(&needle)
    }
}

/// How a screen treats a blank query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyQuery {
    /// Blank text lists everything that passes the area filter.
    ShowAll,
    /// Blank text lists nothing until the user types.
    ShowNothing,
}

/// Result of a screen-level search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome<'a> {
    pub results: Vec<&'a Mandal>,
    /// Non-blank query with zero results. Distinct from "nothing typed yet".
    pub no_matches: bool,
}

/// Filters the catalog by `query`, preserving catalog order.
#[must_use]
pub fn filter<'a>(catalog: &'a [Mandal], query: &Query) -> Vec<&'a Mandal> {
    let _span = tracing::debug_span!(
        "query_filter",
        catalog_len = catalog.len(),
        query_len = query.text.len(),
        area = %query.area.label()
    )
    .entered();

    let results: Vec<&Mandal> = catalog.iter().filter(|m| query.matches(m)).collect();
    tracing::debug!(matched = results.len(), "query filter applied");
    results
}

/// Mandals whose id is in `favorites`, in catalog order.
#[must_use]
pub fn favorites<'a>(catalog: &'a [Mandal], favorites: &FavoriteSet) -> Vec<&'a Mandal> {
    catalog
        .iter()
        .filter(|m| favorites.contains(&m.id))
        .collect()
}

/// Runs `query` with the screen's blank-query policy and derives the
/// no-matches flag.
#[must_use]
pub fn search<'a>(catalog: &'a [Mandal], query: &Query, empty_query: EmptyQuery) -> SearchOutcome<'a> {
    if query.is_blank() && empty_query == EmptyQuery::ShowNothing {
        return SearchOutcome {
            results: Vec::new(),
            no_matches: false,
        };
    }

    let results = filter(catalog, query);
    let no_matches = results.is_empty() && !query.is_blank();
    SearchOutcome { results, no_matches }
}

/// Char-index ranges `(start, end)` of case-insensitive occurrences of `text`
/// in `haystack`, non-overlapping, left to right.
///
/// Returns nothing for blank text, or when lower-casing changes the length of
/// either string (ranges could not be mapped back onto the original chars).
#[must_use]
pub fn match_ranges(haystack: &str, text: &str) -> Vec<(usize, usize)> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let hay: Vec<char> = haystack.to_lowercase().chars().collect();
    let needle: Vec<char> = text.to_lowercase().chars().collect();
    if hay.len() != haystack.chars().count() || needle.len() != text.chars().count() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    while start + needle.len() <= hay.len() {
        if hay[start..start + needle.len()] == needle[..] {
            ranges.push((start, start + needle.len()));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactInfo, CrowdLevel};

    fn mandal(id: &str, name: &str, area: &str) -> Mandal {
        Mandal {
            id: id.into(),
            name: name.into(),
            area: area.into(),
            address: format!("{name}, {area}, Mumbai"),
            distance: "1 km".into(),
            visiting_hours: "24 hours".into(),
            established_year: 1950,
            crowd_level: CrowdLevel::Moderate,
            special_features: vec![],
            contact_info: ContactInfo::default(),
        }
    }

    fn two_mandals() -> Vec<Mandal> {
        vec![
            mandal("1", "Lalbaug Cha Raja", "Lalbaug"),
            mandal("2", "GSB Seva Mandal", "King's Circle"),
        ]
    }

    fn ids(results: &[&Mandal]) -> Vec<String> {
        results.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn all_areas_and_blank_text_returns_everything_in_order() {
        let catalog = two_mandals();
        assert_eq!(ids(&filter(&catalog, &Query::default())), vec!["1", "2"]);
        assert_eq!(ids(&filter(&catalog, &Query::text("   "))), vec!["1", "2"]);
    }

    #[test]
    fn text_matches_name_case_insensitively() {
        let catalog = two_mandals();
        assert_eq!(ids(&filter(&catalog, &Query::text("lal"))), vec!["1"]);
        assert_eq!(
            filter(&catalog, &Query::text("SEVA")),
            filter(&catalog, &Query::text("seva"))
        );
    }

    #[test]
    fn text_matches_area_substring() {
        let catalog = two_mandals();
        assert_eq!(ids(&filter(&catalog, &Query::text("king's"))), vec!["2"]);
    }

    #[test]
    fn text_is_not_trimmed() {
        let catalog = two_mandals();
        assert!(filter(&catalog, &Query::text(" lal")).is_empty());
    }

    #[test]
    fn area_filter_is_exact_and_case_sensitive() {
        let catalog = two_mandals();
        assert_eq!(ids(&filter(&catalog, &Query::area("Lalbaug"))), vec!["1"]);
        assert!(filter(&catalog, &Query::area("lalbaug")).is_empty());
        assert!(filter(&catalog, &Query::area("Lal")).is_empty());
    }

    #[test]
    fn area_and_text_combine_with_and() {
        let catalog = two_mandals();
        let query = Query::new("seva", AreaFilter::from("Lalbaug"));
        assert!(filter(&catalog, &query).is_empty());
    }

    #[test]
    fn all_sentinel_parses_to_all() {
        assert_eq!(AreaFilter::from("All"), AreaFilter::All);
        assert_eq!(AreaFilter::from("all"), AreaFilter::Only("all".into()));
        assert_eq!(AreaFilter::All.label(), "All");
    }

    #[test]
    fn search_flags_no_matches_only_for_non_blank_text() {
        let catalog = two_mandals();

        let miss = search(&catalog, &Query::text("zzz"), EmptyQuery::ShowAll);
        assert!(miss.results.is_empty());
        assert!(miss.no_matches);

        let blank = search(&catalog, &Query::default(), EmptyQuery::ShowNothing);
        assert!(blank.results.is_empty());
        assert!(!blank.no_matches);

        let listed = search(&catalog, &Query::default(), EmptyQuery::ShowAll);
        assert_eq!(listed.results.len(), 2);
        assert!(!listed.no_matches);
    }

    #[test]
    fn favorites_follow_catalog_order() {
        let catalog = two_mandals();
        let favs: FavoriteSet = ["2", "1", "ghost"].iter().map(ToString::to_string).collect();
        assert_eq!(ids(&favorites(&catalog, &favs)), vec!["1", "2"]);
    }

    #[test]
    fn match_ranges_find_every_occurrence() {
        assert_eq!(match_ranges("Lalbaugcha Raja", "RA"), vec![(11, 13)]);
        assert_eq!(match_ranges("aaaa", "aa"), vec![(0, 2), (2, 4)]);
        assert_eq!(match_ranges("Chembur Cha Raja", "cha"), vec![(8, 11)]);
        assert!(match_ranges("Fort", "").is_empty());
    }
}
