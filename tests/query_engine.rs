//! Query engine behavior against the embedded catalog.

use mandalguide::query::{favorites, filter, match_ranges, search};
use mandalguide::{AreaFilter, Catalog, EmptyQuery, FavoriteSet, Query};

fn ids(results: &[&mandalguide::Mandal]) -> Vec<String> {
    results.iter().map(|m| m.id.clone()).collect()
}

#[test]
fn all_with_blank_text_is_the_whole_catalog_in_order() {
    let catalog = Catalog::builtin();
    let all: Vec<String> = catalog.mandals().iter().map(|m| m.id.clone()).collect();
    assert_eq!(ids(&filter(catalog.mandals(), &Query::default())), all);
}

#[test]
fn area_filter_keeps_only_that_area_in_catalog_order() {
    let catalog = Catalog::builtin();
    for area in catalog.areas() {
        let hits = filter(catalog.mandals(), &Query::area(area.name.as_str()));
        assert_eq!(hits.len(), area.count);
        assert!(hits.iter().all(|m| m.area == area.name));

        let positions: Vec<usize> = hits
            .iter()
            .map(|hit| catalog.mandals().iter().position(|m| m.id == hit.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn text_is_case_insensitive() {
    let catalog = Catalog::builtin();
    assert_eq!(
        filter(catalog.mandals(), &Query::text("GANESH")),
        filter(catalog.mandals(), &Query::text("ganesh"))
    );
    assert!(!filter(catalog.mandals(), &Query::text("GANESH")).is_empty());
}

#[test]
fn area_name_as_text_returns_every_mandal_in_that_area() {
    let catalog = Catalog::builtin();
    let hits = filter(catalog.mandals(), &Query::text("girgaon"));
    let in_area: Vec<String> = catalog
        .mandals()
        .iter()
        .filter(|m| m.area == "Girgaon")
        .map(|m| m.id.clone())
        .collect();
    assert!(in_area.iter().all(|id| ids(&hits).contains(id)));
}

#[test]
fn area_and_text_must_both_match() {
    let catalog = Catalog::builtin();
    let query = Query::new("raja", AreaFilter::from("Lalbaug"));
    let hits = filter(catalog.mandals(), &query);
    assert_eq!(ids(&hits), vec!["1", "2"]);
}

#[test]
fn search_distinguishes_prompt_from_no_matches() {
    let catalog = Catalog::builtin();

    let prompt = search(catalog.mandals(), &Query::text(""), EmptyQuery::ShowNothing);
    assert!(prompt.results.is_empty());
    assert!(!prompt.no_matches);

    let miss = search(catalog.mandals(), &Query::text("zzz"), EmptyQuery::ShowNothing);
    assert!(miss.results.is_empty());
    assert!(miss.no_matches);

    let browse = search(catalog.mandals(), &Query::area("Lalbaug"), EmptyQuery::ShowAll);
    assert_eq!(ids(&browse.results), vec!["1", "2", "7"]);
}

#[test]
fn favorites_view_ignores_insertion_order_and_unknown_ids() {
    let catalog = Catalog::builtin();
    let set: FavoriteSet = ["12", "3", "404"].iter().map(ToString::to_string).collect();
    assert_eq!(ids(&favorites(catalog.mandals(), &set)), vec!["3", "12"]);
}

#[test]
fn highlight_ranges_point_at_the_matched_text() {
    let name = "Keshavji Naik Chawl Ganeshotsav";
    let ranges = match_ranges(name, "GANESH");
    assert_eq!(ranges, vec![(20, 26)]);
    let matched: String = name.chars().skip(20).take(6).collect();
    assert_eq!(matched, "Ganesh");
}
