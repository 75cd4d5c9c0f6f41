use dockergen_build::Resolver;
use dockergen_core::{Arch, Edition, Error, Product, Variant, VersionCustomizations};

fn resolver() -> Resolver {
    Resolver::new(VersionCustomizations::embedded().unwrap())
}

fn server(edition: Edition, version: &str) -> Variant {
    Variant::new(edition, Product::Server, version)
}

fn sync_gateway(edition: Edition, version: &str) -> Variant {
    Variant::new(edition, Product::SyncGateway, version)
}

// ── Server base image ──

#[test]
fn server_base_image_boundaries() {
    let r = resolver();
    let cases = [
        ("4.0.0", "ubuntu:14.04"),
        ("4.6.5", "ubuntu:14.04"),
        ("5.0.1", "ubuntu:16.04"),
        ("6.0.0", "ubuntu:16.04"),
        ("6.0.1", "ubuntu:18.04"),
        ("6.5.0", "ubuntu:18.04"),
        ("6.6.0", "ubuntu:18.04"),
        ("6.6.1", "ubuntu:18.04"),
        ("6.6.2", "ubuntu:20.04"),
        ("7.0.0", "ubuntu:20.04"),
        ("7.1.1", "ubuntu:20.04"),
    ];
    for (version, expected) in cases {
        assert_eq!(
            r.base_image(&server(Edition::Enterprise, version)).unwrap(),
            expected,
            "version {version}"
        );
    }
}

// ── Server packages ──

#[test]
fn server_package_before_linux_naming_is_ubuntu_qualified() {
    let r = resolver();
    let v = server(Edition::Enterprise, "7.0.5");
    let pkg = r.package_descriptor(&v, Arch::Generic).unwrap();

    assert_eq!(pkg.filename, "couchbase-server-enterprise_7.0.5-ubuntu20.04_amd64.deb");
    assert_eq!(
        pkg.url,
        "https://packages.couchbase.com/releases/7.0.5/couchbase-server-enterprise_7.0.5-ubuntu20.04_amd64.deb"
    );
}

#[test]
fn server_package_uses_resolved_ubuntu_release() {
    let r = resolver();
    let v = server(Edition::Community, "6.5.1");
    let pkg = r.package_descriptor(&v, Arch::Arm64).unwrap();

    // Pre-7.1 builds are amd64 only, whatever the requested arch.
    assert_eq!(pkg.filename, "couchbase-server-community_6.5.1-ubuntu18.04_amd64.deb");
}

#[test]
fn server_package_from_7_1_0_is_linux_per_arch() {
    let r = resolver();
    let v = server(Edition::Enterprise, "7.1.0");

    assert_eq!(
        r.package_descriptor(&v, Arch::Generic).unwrap().filename,
        "couchbase-server-enterprise_7.1.0-linux_@@ARCH@@.deb"
    );
    assert_eq!(
        r.package_descriptor(&v, Arch::Arm64).unwrap().url,
        "https://packages.couchbase.com/releases/7.1.0/couchbase-server-enterprise_7.1.0-linux_arm64.deb"
    );
}

#[test]
fn server_package_name_by_edition() {
    let r = resolver();
    assert_eq!(
        r.server_package_name(&server(Edition::Community, "7.1.1")),
        "couchbase-server-community"
    );
    assert_eq!(
        r.server_package_name(&server(Edition::Enterprise, "7.1.1")),
        "couchbase-server"
    );
}

#[test]
fn server_extra_dependencies_switch_at_6_5_0() {
    let r = resolver();
    assert_eq!(
        r.extra_dependencies(&server(Edition::Enterprise, "6.0.4")),
        "python-httplib2 runit"
    );
    assert_eq!(
        r.extra_dependencies(&server(Edition::Enterprise, "6.5.0")),
        "bzip2 runit"
    );
    assert_eq!(r.extra_dependencies(&sync_gateway(Edition::Enterprise, "3.1.0")), "");
}

#[test]
fn systemd_workaround_below_7_0_0() {
    let r = resolver();
    assert!(r.systemd_workaround(&server(Edition::Enterprise, "6.6.5")));
    assert!(!r.systemd_workaround(&server(Edition::Enterprise, "7.0.0")));
    assert!(!r.systemd_workaround(&sync_gateway(Edition::Enterprise, "1.5.0")));
}

#[test]
fn release_url_follows_staging_flag() {
    let r = resolver();
    assert_eq!(
        r.release_url(&server(Edition::Enterprise, "7.1.1")),
        "https://packages.couchbase.com/releases/7.1.1"
    );
    assert_eq!(
        r.release_url(&server(Edition::Enterprise, "7.2.0-staging")),
        "http://packages-staging.couchbase.com/releases/7.2.0"
    );
}

// ── Sync Gateway ──

#[test]
fn sync_gateway_base_image_boundaries() {
    let r = resolver();
    assert_eq!(
        r.base_image(&sync_gateway(Edition::Community, "3.0.3")).unwrap(),
        "centos:centos7"
    );
    assert_eq!(
        r.base_image(&sync_gateway(Edition::Community, "3.0.4")).unwrap(),
        "ubuntu:22.04"
    );
    assert_eq!(
        r.base_image(&sync_gateway(Edition::Community, "0.0.0-forestdb")).unwrap(),
        "tleyden5iwx/forestdb"
    );
}

#[test]
fn sync_gateway_package_rpm_then_deb() {
    let r = resolver();

    let old = r
        .package_descriptor(&sync_gateway(Edition::Enterprise, "3.0.3"), Arch::Generic)
        .unwrap();
    assert_eq!(old.filename, "couchbase-sync-gateway-enterprise_3.0.3_@@ARCH@@.rpm");
    assert_eq!(
        old.url,
        "http://packages.couchbase.com/releases/couchbase-sync-gateway/3.0.3/couchbase-sync-gateway-enterprise_3.0.3_@@ARCH@@.rpm"
    );

    let new = r
        .package_descriptor(&sync_gateway(Edition::Community, "3.0.4"), Arch::Generic)
        .unwrap();
    assert_eq!(new.filename, "couchbase-sync-gateway-community_3.0.4_@@ARCH@@.deb");
}

#[test]
fn sync_gateway_staging_package_host() {
    let r = resolver();
    let pkg = r
        .package_descriptor(&sync_gateway(Edition::Community, "3.2.0-staging"), Arch::Generic)
        .unwrap();
    assert_eq!(
        pkg.url,
        "http://packages-staging.couchbase.com/releases/couchbase-sync-gateway/3.2.0/couchbase-sync-gateway-community_3.2.0_@@ARCH@@.deb"
    );
}

#[test]
fn customization_wins_over_naming_rules() {
    let r = resolver();
    let v = sync_gateway(Edition::Community, "2.0.0-devbuild");
    let pkg = r.package_descriptor(&v, Arch::Generic).unwrap();

    assert_eq!(pkg.filename, "couchbase-sync-gateway-community_2.0.0-827_x86_64.rpm");
    assert_eq!(
        pkg.url,
        "http://cbmobile-packages.s3.amazonaws.com/couchbase-sync-gateway-community_2.0.0-827_x86_64.rpm"
    );
}

#[test]
fn empty_customizations_fall_back_to_rules() {
    let r = Resolver::default();
    let v = sync_gateway(Edition::Community, "2.0.0-devbuild");
    let pkg = r.package_descriptor(&v, Arch::Generic).unwrap();

    assert_eq!(
        pkg.filename,
        "couchbase-sync-gateway-community_2.0.0-devbuild_@@ARCH@@.rpm"
    );
}

// ── Sandbox and unknown products ──

#[test]
fn sandbox_builds_on_server_image() {
    let r = resolver();
    let v = Variant::new(Edition::Enterprise, Product::Sandbox, "7.1.1");
    assert_eq!(r.base_image(&v).unwrap(), "couchbase/server:7.1.1");
}

#[test]
fn unregistered_product_is_a_typed_error() {
    let r = resolver();
    let v = Variant::new(Edition::Enterprise, Product::from("operator"), "2.3.0");

    assert!(matches!(
        r.base_image(&v),
        Err(Error::UnregisteredProduct(name)) if name == "operator"
    ));
    assert!(matches!(
        r.package_descriptor(&v, Arch::Amd64),
        Err(Error::UnregisteredProduct(_))
    ));
}
