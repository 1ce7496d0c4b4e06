//! Loading catalogs from user files.

use mandalguide::{initialize, Catalog, Config, CrowdLevel, MandalGuideError};
use std::io::Write;
use std::path::Path;

const JSON_CATALOG: &str = r#"[
  {
    "id": "a",
    "name": "Andheri Cha Raja",
    "area": "Andheri",
    "address": "Veera Desai Road, Andheri West, Mumbai",
    "distance": "18 km",
    "visitingHours": "24 hours",
    "establishedYear": 1966,
    "crowdLevel": "Very High",
    "specialFeatures": ["Wish-fulfilling idol"],
    "contactInfo": { "phone": "+91 22 0000 0000" }
  },
  {
    "id": "b",
    "name": "Fort Vibhag",
    "area": "Fort",
    "address": "Fort, Mumbai",
    "distance": "2 km",
    "visitingHours": "8 AM - 10 PM",
    "establishedYear": 1990,
    "crowdLevel": "Low"
  }
]"#;

const TOML_CATALOG: &str = r#"
[[mandals]]
id = "t1"
name = "Chembur Vibhag"
area = "Chembur"
address = "Chembur, Mumbai"
distance = "12 km"
visitingHours = "24 hours"
establishedYear = 1975
crowdLevel = "Moderate"
"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn loads_json_with_optional_fields_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "mandals.json", JSON_CATALOG);

    let catalog = Catalog::from_file(&path).unwrap();
    assert_eq!(catalog.len(), 2);

    let fort = catalog.get("b").unwrap();
    assert_eq!(fort.crowd_level, CrowdLevel::Low);
    assert!(fort.special_features.is_empty());
    assert_eq!(fort.contact_info.phone, None);
    assert_eq!(catalog.get("a").unwrap().crowd_level, CrowdLevel::VeryHigh);
}

#[test]
fn loads_toml_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "mandals.toml", TOML_CATALOG);

    let catalog = Catalog::from_file(&path).unwrap();
    assert_eq!(catalog.mandals()[0].name, "Chembur Vibhag");
    assert_eq!(catalog.areas()[0].count, 1);
}

#[test]
fn rejects_duplicate_ids_and_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    let duplicated = JSON_CATALOG.replace("\"id\": \"b\"", "\"id\": \"a\"");
    let path = write_file(dir.path(), "dup.json", &duplicated);
    assert!(matches!(Catalog::from_file(&path), Err(MandalGuideError::Catalog(_))));

    let broken = write_file(dir.path(), "broken.json", "[{\"id\": 1}]");
    assert!(matches!(Catalog::from_file(&broken), Err(MandalGuideError::Json(_))));

    assert!(matches!(
        Catalog::from_file(dir.path().join("missing.json")),
        Err(MandalGuideError::Io(_))
    ));
}

#[test]
fn configured_catalog_drives_the_app() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "mandals.json", JSON_CATALOG);

    let config = Config {
        catalog_file: Some(path),
        ..Config::default()
    };
    let state = initialize(&config);
    assert_eq!(state.catalog.len(), 2);
    assert_eq!(state.areas.len(), 2);
}
