// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./shiftplan.toml` > `~/.config/shiftplan/shiftplan.toml` >
//! `/etc/shiftplan/shiftplan.toml` with environment variable overrides via `SHIFTPLAN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ShiftplanConfig;

/// Config sections that environment variables can address.
const ENV_SECTIONS: &[&str] = &["app", "storage", "schedule", "scoring"];

pub(crate) const LOCAL_CONFIG: &str = "shiftplan.toml";
pub(crate) const USER_CONFIG: &str = "shiftplan/shiftplan.toml";
pub(crate) const SYSTEM_CONFIG: &str = "/etc/shiftplan/shiftplan.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/shiftplan/shiftplan.toml` (system-wide)
/// 3. `~/.config/shiftplan/shiftplan.toml` (user XDG config)
/// 4. `./shiftplan.toml` (local directory)
/// 5. `SHIFTPLAN_*` environment variables
pub fn load_config() -> Result<ShiftplanConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ShiftplanConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShiftplanConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ShiftplanConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShiftplanConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ShiftplanConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join(USER_CONFIG))
                .unwrap_or_default(),
        ))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// Environment provider mapping `SHIFTPLAN_<SECTION>_<KEY>` to `section.key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `SHIFTPLAN_SCHEDULE_FIRST_SLOT_START` maps to `schedule.first_slot_start`.
/// The `[[positions]]` table is file-only.
fn env_provider() -> Env {
    Env::prefixed("SHIFTPLAN_").map(|key| {
        // Keys arrive with their original case; lowercasing happens after mapping.
        let key_str = key.as_str().to_ascii_lowercase();
        ENV_SECTIONS
            .iter()
            .find_map(|section| {
                key_str
                    .strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|rest| format!("{section}.{rest}"))
            })
            .unwrap_or(key_str)
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_section_fields() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SHIFTPLAN_STORAGE_WAL_MODE", "false");
            jail.set_env("SHIFTPLAN_SCHEDULE_WEEK_STARTS_ON", "monday");

            let config: ShiftplanConfig = Figment::new()
                .merge(Serialized::defaults(ShiftplanConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert!(!config.storage.wal_mode);
            assert_eq!(config.schedule.week_starts_on, "monday");
            Ok(())
        });
    }
}
