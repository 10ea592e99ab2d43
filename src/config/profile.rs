//! Profile overrides: a section named after the active deployment profile rewrites other sections.

use crate::config::source::{RawConfigSource, DEFAULT_SECTION};

/// Separator between target section and option in a profile key (`Database.dsn`).
pub const PROFILE_KEY_SEPARATOR: char = '.';

/// Return `base` with the `profile` section's overrides applied.
///
/// `Section.option = value` writes into `Section` (created when absent), splitting on the
/// first separator only; undotted keys land in `DEFAULT`. Entries apply in file order, so a
/// later key with the same target wins. A missing profile section leaves `base` unchanged.
/// Keys targeting the profile section itself are ignored, so the profile section never changes
/// and applying the same profile again is a no-op.
pub fn apply_profile(base: &RawConfigSource, profile: &str) -> RawConfigSource {
    let mut merged = base.clone();
    let Some(overrides) = base.section(profile) else {
        tracing::debug!(profile, "no profile section; overrides skipped");
        return merged;
    };
    for (key, value) in overrides.entries() {
        match key.split_once(PROFILE_KEY_SEPARATOR) {
            Some((section, _)) if section.eq_ignore_ascii_case(profile) => {
                tracing::warn!(profile, key, "profile key targets its own section; ignored");
            }
            Some((section, option)) => merged.set(section, option, value),
            None => merged.set(DEFAULT_SECTION, key, value),
        }
    }
    tracing::debug!(profile, count = overrides.entries().count(), "profile overrides applied");
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = r#"
[DEFAULT]
log_level = info

[ComponentA]
compA_variable = base

[staging]
ComponentA.compA_variable = staged
Cache.url = redis://cache:6379
log_level = debug
Server.ops.port = 9000
staging.extra = 1

[production]
log_level = warning
DEFAULT.log_level = error
"#;

    fn base() -> RawConfigSource {
        RawConfigSource::parse(BASE).unwrap()
    }

    #[test]
    fn dotted_key_overrides_component_section() {
        let merged = apply_profile(&base(), "staging");
        assert_eq!(merged.get_raw("ComponentA", "compA_variable"), Some("staged"));
    }

    #[test]
    fn dotted_key_creates_missing_section() {
        let src = base();
        assert!(!src.has_section("Cache"));
        let merged = apply_profile(&src, "staging");
        assert_eq!(merged.get_raw("Cache", "url"), Some("redis://cache:6379"));
    }

    #[test]
    fn undotted_key_lands_in_defaults() {
        let merged = apply_profile(&base(), "staging");
        assert_eq!(merged.get_raw(DEFAULT_SECTION, "log_level"), Some("debug"));
        assert_eq!(merged.get_raw("ComponentA", "log_level"), Some("debug"));
    }

    #[test]
    fn splits_on_first_separator_only() {
        let merged = apply_profile(&base(), "staging");
        assert_eq!(merged.get_raw("Server", "ops.port"), Some("9000"));
    }

    #[test]
    fn later_key_with_same_target_wins() {
        let merged = apply_profile(&base(), "production");
        assert_eq!(merged.get_raw(DEFAULT_SECTION, "log_level"), Some("error"));
    }

    #[test]
    fn missing_profile_is_not_an_error() {
        let src = base();
        assert_eq!(apply_profile(&src, "qa"), src);
    }

    #[test]
    fn base_is_left_untouched() {
        let src = base();
        let _ = apply_profile(&src, "staging");
        assert_eq!(src.get_raw("ComponentA", "compA_variable"), Some("base"));
    }

    #[test]
    fn keys_targeting_the_profile_section_are_ignored() {
        let merged = apply_profile(&base(), "staging");
        assert_eq!(merged.get_raw("staging", "extra"), None);
        assert_eq!(merged.get_raw(DEFAULT_SECTION, "extra"), None);
        assert_eq!(merged.section("staging"), base().section("staging"));
    }

    #[test]
    fn reapplying_a_profile_changes_nothing() {
        let src = base();
        for profile in ["staging", "production"] {
            let once = apply_profile(&src, profile);
            let twice = apply_profile(&once, profile);
            assert_eq!(once, twice, "profile {}", profile);
        }
    }
}
