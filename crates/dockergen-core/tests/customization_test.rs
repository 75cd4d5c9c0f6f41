use dockergen_core::{Edition, Product, Variant, VersionCustomizations};
use tempfile::TempDir;

#[test]
fn embedded_table_has_sync_gateway_devbuilds() {
    let table = VersionCustomizations::embedded().unwrap();
    assert_eq!(table.len(), 2);

    let variant = Variant::new(Edition::Community, Product::SyncGateway, "2.0.0-devbuild");
    let entry = table.get(&variant).unwrap();
    assert_eq!(
        entry.package_filename,
        "couchbase-sync-gateway-community_2.0.0-827_x86_64.rpm"
    );
    assert_eq!(
        entry.package_url,
        "http://cbmobile-packages.s3.amazonaws.com/couchbase-sync-gateway-community_2.0.0-827_x86_64.rpm"
    );
}

#[test]
fn lookup_misses_for_regular_versions() {
    let table = VersionCustomizations::embedded().unwrap();
    let variant = Variant::new(Edition::Community, Product::SyncGateway, "2.0.0");
    assert!(table.get(&variant).is_none());
}

#[test]
fn load_without_repository_file_is_embedded_table() {
    let tmp = TempDir::new().unwrap();
    let table = VersionCustomizations::load(tmp.path()).unwrap();
    assert_eq!(table, VersionCustomizations::embedded().unwrap());
}

#[test]
fn repository_file_extends_and_overrides() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("generate")).unwrap();
    std::fs::write(
        tmp.path().join("generate/version_customizations.json"),
        r#"{
  "sync-gateway_community_2.0.0-devbuild": {
    "package_url": "http://example.invalid/sg.rpm",
    "package_filename": "sg.rpm"
  },
  "couchbase-server_enterprise_8.0.0-1234": {
    "package_url": "http://example.invalid/cb.deb",
    "package_filename": "cb.deb"
  }
}"#,
    )
    .unwrap();

    let table = VersionCustomizations::load(tmp.path()).unwrap();
    assert_eq!(table.len(), 3);

    let sg = Variant::new(Edition::Community, Product::SyncGateway, "2.0.0-devbuild");
    assert_eq!(table.get(&sg).unwrap().package_filename, "sg.rpm");

    let cb = Variant::new(Edition::Enterprise, Product::Server, "8.0.0-1234");
    assert_eq!(table.get(&cb).unwrap().package_url, "http://example.invalid/cb.deb");
}

#[test]
fn malformed_repository_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("generate")).unwrap();
    std::fs::write(tmp.path().join("generate/version_customizations.json"), "[1, 2").unwrap();

    let err = VersionCustomizations::load(tmp.path()).unwrap_err().to_string();
    assert!(err.contains("version customizations"));
}
