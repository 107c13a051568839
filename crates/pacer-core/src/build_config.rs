//! Build-time configuration values
//!
//! The firmware's build script reads `sdkconfig.defaults`-style `KEY=VALUE`
//! files and exports each entry as a compile-time environment variable. The
//! helpers here turn those strings into numbers inside `const` items, so a
//! mismatching value fails the build instead of the boot.
//!
//! ```
//! use pacer_core::build_config::parse_config_value;
//!
//! const LEVEL: u32 = parse_config_value("3");
//! const _: () = assert!(LEVEL == 3);
//! ```

/// Parse a decimal configuration value in `const` context.
///
/// Panics (a compile error when evaluated in a `const` item) on empty input,
/// non-digit characters or overflow.
pub const fn parse_config_value(value: &str) -> u32 {
    match try_parse_config_value(value) {
        Some(parsed) => parsed,
        None => panic!("configuration value is not a decimal u32"),
    }
}

/// Non-panicking variant of [`parse_config_value`]. Surrounding double quotes
/// are accepted since sdkconfig files quote some values.
pub const fn try_parse_config_value(value: &str) -> Option<u32> {
    let bytes = value.as_bytes();
    let mut start = 0;
    let mut end = bytes.len();

    if end >= 2 && bytes[0] == b'"' && bytes[end - 1] == b'"' {
        start = 1;
        end -= 1;
    }
    if start == end {
        return None;
    }

    let mut acc: u32 = 0;
    let mut i = start;
    while i < end {
        let byte = bytes[i];
        if !byte.is_ascii_digit() {
            return None;
        }
        acc = match acc.checked_mul(10) {
            Some(shifted) => match shifted.checked_add((byte - b'0') as u32) {
                Some(next) => next,
                None => return None,
            },
            None => return None,
        };
        i += 1;
    }
    Some(acc)
}

/// `true` when `value` parses and equals `expected`.
pub const fn config_matches(value: &str, expected: u32) -> bool {
    match try_parse_config_value(value) {
        Some(parsed) => parsed == expected,
        None => false,
    }
}

/// Fail the build unless a configuration string equals the expected number.
///
/// ```
/// pacer_core::assert_config_value!("4", 4);
/// ```
#[macro_export]
macro_rules! assert_config_value {
    ($value:expr, $expected:expr) => {
        const _: () = assert!(
            $crate::build_config::config_matches($value, $expected),
            "build configuration value does not match the expected setting"
        );
    };
}
