#![cfg(feature = "json_store")]

mod common;

use pkgpolicy_engine as pe;
use pe::{GroupPolicy, JsonPolicyStore, PolicyState, StoreLocator, TogglePolicy};

fn document() -> String {
    serde_json::json!({
        "EnablePackageManager": 1,
        "EnableLocalManifestFiles": 0,
        "EnableExperimentalFeatures": "Wrong",
        "SourceAutoUpdateIntervalInMinutes": 20,
        "DefaultProxy": "http://proxy.contoso.test:8080",
        "AdditionalSources": {
            "0": common::simple_source_json("s0", r#"["Trusted"]"#, true),
            "1": "not a source",
            "2": {
                "Name": "s2-name", "Arg": "s2-arg", "Type": "s2-type", "Data": "s2-data",
                "Identifier": "s2-identifier", "TrustLevel": ["StoreOrigin"], "Explicit": false
            }
        },
        "AllowedSources": {}
    })
    .to_string()
}

fn assert_document_policies<S: pe::PolicyStore>(gp: &GroupPolicy<S>) {
    assert_eq!(gp.get_state(TogglePolicy::PackageManager), PolicyState::Enabled);
    assert_eq!(gp.get_state(TogglePolicy::LocalManifestFiles), PolicyState::Disabled);
    assert_eq!(gp.get_state(TogglePolicy::ExperimentalFeatures), PolicyState::NotConfigured);
    assert_eq!(gp.get_value::<pe::SourceAutoUpdateIntervalInMinutes>(), Some(20));
    assert_eq!(gp.get_value::<pe::DefaultProxy>().as_deref(), Some("http://proxy.contoso.test:8080"));

    let additional = gp.get_value::<pe::AdditionalSources>().unwrap();
    let names: Vec<_> = additional.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["s0-name", "s2-name"]);
    assert_eq!(gp.get_value::<pe::AllowedSources>(), Some(vec![]));
}

#[test]
fn document_from_string() {
    let gp = GroupPolicy::new(JsonPolicyStore::from_json_str(&document()).unwrap());
    assert_document_policies(&gp);
}

#[test]
fn document_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policies.json");
    std::fs::write(&path, document()).unwrap();

    let gp = GroupPolicy::new(JsonPolicyStore::open(&path).unwrap());
    assert_document_policies(&gp);

    let gp = pe::open_policies(&format!("file:{}", path.display())).unwrap();
    assert_document_policies(&gp);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = JsonPolicyStore::open(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, pe::PolicyError::Io(_)));
}

#[test]
fn document_from_env_locator() {
    std::env::set_var("PKGPOLICY_TEST_DOCUMENT", document());
    let locator: StoreLocator = "env:PKGPOLICY_TEST_DOCUMENT".parse().unwrap();
    assert_eq!(locator, StoreLocator::Env("PKGPOLICY_TEST_DOCUMENT".to_string()));

    let gp = GroupPolicy::new(locator.resolve().unwrap());
    assert_document_policies(&gp);
}

#[test]
fn env_locator_missing_variable() {
    let locator: StoreLocator = "env:PKGPOLICY_TEST_UNSET_VARIABLE".parse().unwrap();
    let err = locator.resolve().unwrap_err();
    assert!(err.to_string().contains("Environment variable not found"));
}

#[test]
fn invalid_locators() {
    for bad in ["registry:HKLM", "no-scheme", "file:", "env:  "] {
        let err = bad.parse::<StoreLocator>().unwrap_err();
        assert!(err.to_string().contains("Invalid") || err.to_string().contains("Missing"), "{bad}");
    }
    assert!(pe::open_policies("bogus").is_err());
}

#[test]
fn default_locator_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policies.json");
    std::fs::write(&path, document()).unwrap();

    std::env::set_var(pe::PolicyDefaults::STORE_LOCATOR_ENV, format!("file:{}", path.display()));
    let gp = pe::open_default_policies().unwrap().expect("locator set");
    std::env::remove_var(pe::PolicyDefaults::STORE_LOCATOR_ENV);
    assert_document_policies(&gp);

    assert!(pe::open_default_policies().unwrap().is_none());
}

#[test]
fn out_of_range_integers_are_enabled() {
    let store = JsonPolicyStore::from_json_str(
        r#"{ "EnablePackageManager": -1, "EnableSettings": 4294967296, "EnableHashOverride": 1.0 }"#,
    )
    .unwrap();
    let gp = GroupPolicy::new(store);

    assert_eq!(gp.get_state(TogglePolicy::PackageManager), PolicyState::Enabled);
    assert_eq!(gp.get_state(TogglePolicy::Settings), PolicyState::Enabled);
    // Floats are not integers.
    assert_eq!(gp.get_state(TogglePolicy::HashOverride), PolicyState::NotConfigured);
}
