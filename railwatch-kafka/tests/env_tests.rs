use railwatch::config::{build_config, load_bootstrap};
use std::path::PathBuf;

// Separate test binary: it mutates the process environment.
#[test]
fn environment_overrides_bootstrap() {
    unsafe { std::env::set_var("RAIL_BOOTSTRAP", "broker-1:19092") };
    let config = build_config(PathBuf::from(env!("CARGO_MANIFEST_DIR"))).unwrap();
    assert_eq!(load_bootstrap(&config), "broker-1:19092");
    unsafe { std::env::remove_var("RAIL_BOOTSTRAP") };
}
