use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Keys exported to the crate as compile-time environment variables.
const CONFIG_KEYS: &[&str] = &[
    "CONFIG_PACER_PRIMARY_LEVEL",
    "CONFIG_PACER_SECONDARY_LEVEL",
    "CONFIG_PACER_BLINK_TOGGLE",
    "CONFIG_PACER_FLASH_SIZE_MB",
];

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"));
    let defaults = manifest_dir.join("sdkconfig.defaults");
    println!("cargo:rerun-if-changed={}", defaults.display());

    let mut values = HashMap::new();
    for entry in dotenvy::from_path_iter(&defaults).expect("failed to open sdkconfig.defaults") {
        let (key, value) = entry.expect("malformed line in sdkconfig.defaults");
        values.insert(key, value);
    }

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={key}");
        let value = env::var(key)
            .ok()
            .or_else(|| values.get(*key).cloned())
            .unwrap_or_else(|| panic!("{key} is missing from sdkconfig.defaults"));
        println!("cargo:rustc-env={key}={value}");
    }

    println!("cargo:rustc-link-arg-bins=-Tlinkall.x");
}
