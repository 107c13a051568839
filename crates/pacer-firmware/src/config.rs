//! Values baked in from `sdkconfig.defaults` by `build.rs`

use pacer_core::build_config::parse_config_value;

pub const PRIMARY_LEVEL: u32 = parse_config_value(env!("CONFIG_PACER_PRIMARY_LEVEL"));
pub const SECONDARY_LEVEL: u32 = parse_config_value(env!("CONFIG_PACER_SECONDARY_LEVEL"));

/// Use the toggle blink instead of the on/off blink.
pub const BLINK_TOGGLE: bool = parse_config_value(env!("CONFIG_PACER_BLINK_TOGGLE")) != 0;

pub const FLASH_SIZE_MB: u32 = parse_config_value(env!("CONFIG_PACER_FLASH_SIZE_MB"));
