// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as parseable clock times, a strictly decreasing bonus ladder and
//! unique position names.

use std::collections::HashSet;

use shiftplan_core::{ClockTime, ShiftTime, TimeSlot};

use crate::diagnostic::ConfigError;
use crate::model::ShiftplanConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Three-letter forms (`mon`) are accepted as well.
const WEEKDAYS: &[&str] = &[
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Accepted as aliases of `first` and `second`.
const LEGACY_SLOT_LABELS: &[&str] = &["evening", "morning"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ShiftplanConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let log_level = config.app.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&log_level.as_str()) {
        errors.push(ConfigError::unknown_value(
            "app.log_level",
            &config.app.log_level,
            LOG_LEVELS,
        ));
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    validate_schedule(config, &mut errors);
    validate_scoring(config, &mut errors);
    validate_positions(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_schedule(config: &ShiftplanConfig, errors: &mut Vec<ConfigError>) {
    let schedule = &config.schedule;

    if schedule.week_start_day().is_err() {
        errors.push(ConfigError::unknown_value(
            "schedule.week_starts_on",
            &schedule.week_starts_on,
            WEEKDAYS,
        ));
    }

    for (key, value) in [
        ("first_slot_start", &schedule.first_slot_start),
        ("first_slot_end", &schedule.first_slot_end),
    ] {
        if let Err(e) = value.trim().parse::<ClockTime>() {
            errors.push(ConfigError::Validation {
                message: format!("schedule.{key}: {e} (expected HH:MM)"),
            });
        }
    }

    if schedule.slot_times.is_empty() {
        return;
    }

    let labels: Vec<&str> = TimeSlot::ALL
        .iter()
        .map(|slot| slot.as_str())
        .chain(LEGACY_SLOT_LABELS.iter().copied())
        .collect();
    let before = errors.len();
    for (label, range) in &schedule.slot_times {
        if label.parse::<TimeSlot>().is_err() {
            errors.push(ConfigError::unknown_value("schedule.slot_times", label, &labels));
        }
        if let Err(e) = range.trim().parse::<ShiftTime>() {
            errors.push(ConfigError::Validation {
                message: format!("schedule.slot_times.{label}: {e} (expected HH:MM-HH:MM)"),
            });
        }
    }

    // Repeated or missing slots, once every entry parses.
    if errors.len() == before
        && let Err(e) = schedule.shift_times()
    {
        errors.push(ConfigError::Validation {
            message: format!("schedule.slot_times: {e}"),
        });
    }
}

fn validate_scoring(config: &ShiftplanConfig, errors: &mut Vec<ConfigError>) {
    let scoring = &config.scoring;
    let before = errors.len();

    for (key, value) in [
        ("first_choice_bonus", scoring.first_choice_bonus),
        ("second_choice_bonus", scoring.second_choice_bonus),
        ("third_choice_bonus", scoring.third_choice_bonus),
        ("fairness_weight", scoring.fairness_weight),
        ("jitter", scoring.jitter),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(ConfigError::Validation {
                message: format!("scoring.{key} must be a non-negative number, got {value}"),
            });
        }
    }

    // Per-key problems are already reported; only check the ladder on sane numbers.
    if errors.len() == before
        && let Err(e) = scoring.weights().validate()
    {
        errors.push(ConfigError::Validation {
            message: format!("scoring: {e}"),
        });
    }
}

fn validate_positions(config: &ShiftplanConfig, errors: &mut Vec<ConfigError>) {
    let mut seen = HashSet::new();
    for (i, position) in config.positions.iter().enumerate() {
        let name = position.name.trim();
        if name.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("positions[{i}].name must not be empty"),
            });
            continue;
        }
        if !seen.insert(name) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate position name `{name}` in [[positions]] array"),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PositionConfig;
    use shiftplan_core::GenderRequirement;

    fn position(name: &str) -> PositionConfig {
        PositionConfig {
            name: name.to_string(),
            gender: GenderRequirement::Any,
            auto_assign: true,
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&ShiftplanConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = ShiftplanConfig::default();
        config.app.log_level = "loud".into();
        config.schedule.first_slot_start = "25:00".into();
        config.scoring.jitter = -1.0;
        config.positions = vec![position("Gate"), position(" Gate "), position("")];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5, "{errors:?}");
    }

    #[test]
    fn unknown_weekday_and_log_level_get_suggestions() {
        let mut config = ShiftplanConfig::default();
        config.app.log_level = "debgu".into();
        config.schedule.week_starts_on = "Tuesdy".into();

        let errors = validate_config(&config).unwrap_err();
        let suggestions: Vec<Option<&str>> = errors
            .iter()
            .map(|e| match e {
                ConfigError::UnknownValue { suggestion, .. } => suggestion.as_deref(),
                other => panic!("expected UnknownValue, got {other:?}"),
            })
            .collect();
        assert_eq!(suggestions, [Some("debug"), Some("tuesday")]);
    }

    #[test]
    fn slot_time_labels_come_from_the_slot_vocabulary() {
        let mut config = ShiftplanConfig::default();
        config.schedule.slot_times = [
            ("frist".to_string(), "20:00-00:00".to_string()),
            ("second".to_string(), "8am".to_string()),
        ]
        .into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2, "{errors:?}");
        match &errors[0] {
            ConfigError::UnknownValue {
                value, suggestion, ..
            } => {
                assert_eq!(value, "frist");
                assert_eq!(suggestion.as_deref(), Some("first"));
            }
            other => panic!("expected UnknownValue, got {other:?}"),
        }
        assert!(errors[1].to_string().contains("schedule.slot_times.second"));
    }

    #[test]
    fn slot_times_must_name_the_first_slot_once() {
        let mut config = ShiftplanConfig::default();
        config.schedule.slot_times = [
            ("first".to_string(), "20:00-00:00".to_string()),
            ("evening".to_string(), "00:00-04:00".to_string()),
        ]
        .into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("more than once"), "{errors:?}");

        config.schedule.slot_times = [("morning".to_string(), "08:00-12:00".to_string())].into();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("schedule.slot_times"), "{errors:?}");
    }

    #[test]
    fn equal_bonuses_are_rejected() {
        let mut config = ShiftplanConfig::default();
        config.scoring.second_choice_bonus = config.scoring.first_choice_bonus;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("strictly decrease"));
    }
}
