//! trybuild coverage for `#[derive(Mergeable)]` in downstream crates.
//!
//! Each case is compiled as its own binary, so the derive output is checked
//! against the public API exactly as an external user would see it.

#[test]
fn derive_compiles_in_downstream_crates() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/crate_path_alias.rs");
    t.pass("tests/trybuild/generic_record.rs");
    t.pass("tests/trybuild/tagged_union.rs");
}
