//! Runtime configuration
//!
//! Read once at program start from the environment of the instrumented
//! program.

use crate::error::{SylibError, SylibResult};

/// Environment variable selecting region discipline
pub const ENV_REGION_CHECK: &str = "SYLIB_REGION_CHECK";
/// Environment variable for preallocated slot capacity
pub const ENV_SLOT_CAPACITY: &str = "SYLIB_SLOT_CAPACITY";
/// Environment variable holding a tracing filter directive
pub const ENV_LOG: &str = "SYLIB_LOG";

/// Largest accepted `slot_capacity`; the vector still grows past it on demand
pub const MAX_SLOT_CAPACITY: usize = 1 << 20;

/// How the registry treats begin/end alternation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegionDiscipline {
    /// No tracking; misuse yields a meaningless duration silently
    #[default]
    Permissive,
    /// Track open/idle state and record a diagnostic on misuse
    Checked,
}

/// Runtime configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Begin/end alternation handling
    pub discipline: RegionDiscipline,
    /// Slots preallocated at construction
    pub slot_capacity: usize,
    /// Tracing filter directive; `None` leaves logging off
    pub log_filter: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            discipline: RegionDiscipline::Permissive,
            slot_capacity: 1024,
            log_filter: None,
        }
    }
}

impl RuntimeConfig {
    /// Defaults with checked region discipline
    pub fn checked() -> Self {
        RuntimeConfig {
            discipline: RegionDiscipline::Checked,
            ..Default::default()
        }
    }

    /// Load from the process environment
    pub fn from_env() -> SylibResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> SylibResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = RuntimeConfig::default();

        if let Some(value) = lookup(ENV_REGION_CHECK) {
            config.discipline = parse_discipline(&value)?;
        }

        if let Some(value) = lookup(ENV_SLOT_CAPACITY) {
            config.slot_capacity = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|capacity| *capacity <= MAX_SLOT_CAPACITY)
                .ok_or_else(|| SylibError::InvalidConfig {
                    key: ENV_SLOT_CAPACITY,
                    value: value.clone(),
                })?;
        }

        config.log_filter = lookup(ENV_LOG).filter(|filter| !filter.trim().is_empty());

        Ok(config)
    }
}

fn parse_discipline(value: &str) -> SylibResult<RegionDiscipline> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "checked" => Ok(RegionDiscipline::Checked),
        "0" | "false" | "off" | "permissive" | "" => Ok(RegionDiscipline::Permissive),
        _ => Err(SylibError::InvalidConfig {
            key: ENV_REGION_CHECK,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.discipline, RegionDiscipline::Permissive);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[
            (ENV_REGION_CHECK, "On"),
            (ENV_SLOT_CAPACITY, " 64 "),
            (ENV_LOG, "sylib=trace"),
        ]))
        .unwrap();

        assert_eq!(config.discipline, RegionDiscipline::Checked);
        assert_eq!(config.slot_capacity, 64);
        assert_eq!(config.log_filter.as_deref(), Some("sylib=trace"));
    }

    #[test]
    fn test_blank_log_filter_is_off() {
        let config = RuntimeConfig::from_lookup(lookup_from(&[(ENV_LOG, "  ")])).unwrap();
        assert_eq!(config.log_filter, None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = RuntimeConfig::from_lookup(lookup_from(&[(ENV_REGION_CHECK, "maybe")]))
            .unwrap_err();
        assert_eq!(
            err,
            SylibError::InvalidConfig {
                key: ENV_REGION_CHECK,
                value: "maybe".to_string()
            }
        );

        let err = RuntimeConfig::from_lookup(lookup_from(&[(ENV_SLOT_CAPACITY, "-3")]))
            .unwrap_err();
        assert!(matches!(
            err,
            SylibError::InvalidConfig {
                key: ENV_SLOT_CAPACITY,
                ..
            }
        ));
    }

    #[test]
    fn test_slot_capacity_bounded() {
        let max = MAX_SLOT_CAPACITY.to_string();
        let config =
            RuntimeConfig::from_lookup(lookup_from(&[(ENV_SLOT_CAPACITY, max.as_str())])).unwrap();
        assert_eq!(config.slot_capacity, MAX_SLOT_CAPACITY);

        for value in [(MAX_SLOT_CAPACITY + 1).to_string(), usize::MAX.to_string()] {
            let err = RuntimeConfig::from_lookup(lookup_from(&[(ENV_SLOT_CAPACITY, value.as_str())]))
                .unwrap_err();
            assert_eq!(
                err,
                SylibError::InvalidConfig {
                    key: ENV_SLOT_CAPACITY,
                    value
                }
            );
        }
    }
}
