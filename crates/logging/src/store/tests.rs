use super::*;
use crate::clamp::{LEVEL_CEILING, LEVEL_FLOOR};
use proptest::prelude::*;

fn value(text: &str) -> LevelValue {
    text.parse().expect("level value parses")
}

#[test]
fn defaults_match_info_with_unrestricted_clamp() {
    let config = LevelConfig::new();
    assert_eq!(config.level(), 6);
    assert_eq!(config.min(), LEVEL_FLOOR);
    assert_eq!(config.max(), LEVEL_CEILING);
    assert!(config.categories().is_empty());
}

#[test]
fn set_level_accepts_names_and_numbers() {
    let config = LevelConfig::new();
    assert_eq!(config.set_level(value("warning")), Ok(4));
    assert_eq!(config.set_level(value("8")), Ok(8));
    assert_eq!(config.set_level(Severity::Notice), Ok(5));
    assert_eq!(config.set_level(2), Ok(2));
}

#[test]
fn set_level_relative_adjusts_current() {
    let config = LevelConfig::new();
    assert_eq!(config.set_level(value("+1")), Ok(7));
    assert_eq!(config.set_level(value("-3")), Ok(4));
}

#[test]
fn set_level_clamps_instead_of_failing() {
    let config = LevelConfig::new();
    assert_eq!(config.set_level(100), Ok(LEVEL_CEILING));
    assert_eq!(config.set_level(-100), Ok(LEVEL_FLOOR));
}

#[test]
fn oversized_level_text_clamps_to_the_bounds() {
    let config = LevelConfig::new();
    assert_eq!(config.set_level(value("99999999999")), Ok(LEVEL_CEILING));
    assert_eq!(config.set_level(value("-99999999999")), Ok(LEVEL_FLOOR));
    assert_eq!(config.set_level(value("+99999999999")), Ok(LEVEL_CEILING));
    assert_eq!(config.set_level(value("-2147483648")), Ok(LEVEL_FLOOR));
}

#[test]
fn unknown_names_leave_state_untouched() {
    let config = LevelConfig::new();
    let before = config.generation();
    let error = config.set_level(value("loud")).unwrap_err();
    assert_eq!(error, LevelError::UnknownSeverity("loud".into()));
    assert_eq!(config.level(), 6);
    assert_eq!(config.generation(), before);
}

#[test]
fn repeated_offsets_saturate_at_bounds() {
    let config = LevelConfig::new();
    config.set_max(Severity::Debug).expect("max set");
    for _ in 0..10 {
        config.set_level(value("+1")).expect("offset applies");
    }
    assert_eq!(config.level(), 7);

    config.set_min(Severity::Error).expect("min set");
    for _ in 0..10 {
        config.apply_offset(-1);
    }
    assert_eq!(config.level(), 3);
}

#[test]
fn clamp_changes_reclamp_the_global_level() {
    let config = LevelConfig::new();
    config.set_level(Severity::Trace).expect("level set");
    assert_eq!(config.set_max(Severity::Notice), Ok(5));
    assert_eq!(config.level(), 5);

    config.set_level(Severity::Alert).expect("level set");
    assert_eq!(config.set_min(value("warning")), Ok(4));
    assert_eq!(config.level(), 4);
}

#[test]
fn relative_clamp_values_adjust_current_bound() {
    let config = LevelConfig::new();
    assert_eq!(config.set_max(value("-2")), Ok(LEVEL_CEILING - 2));
    assert_eq!(config.set_min(value("+3")), Ok(LEVEL_FLOOR + 3));
}

#[test]
fn category_override_ignores_global_changes() {
    let config = LevelConfig::new();
    config
        .set_category_level("net", Some(value("error")))
        .expect("override set");

    for level in [0, 4, 8] {
        config.set_level(level).expect("level set");
        assert_eq!(config.category_level("net"), 3);
        assert_eq!(config.category_level("disk"), level);
    }
}

#[test]
fn category_override_is_reclamped_by_its_own_bounds() {
    let config = LevelConfig::new();
    config
        .set_category_level("net", Some(Severity::Trace.into()))
        .expect("override set");
    assert_eq!(config.category_level("net"), 8);

    assert_eq!(config.set_category_max("net", Some(value("notice"))), Ok(5));
    assert_eq!(config.category_level("net"), 5);

    assert_eq!(config.set_category_max("net", None), Ok(LEVEL_CEILING));
    assert_eq!(config.category_level("net"), 8);
}

#[test]
fn category_clamps_apply_after_later_global_changes() {
    let config = LevelConfig::new();
    config
        .set_category_min("net", Some(Severity::Warning.into()))
        .expect("min set");
    config.set_level(Severity::Alert).expect("level set");
    assert_eq!(config.category_level("net"), 4);
    assert_eq!(config.category_level("disk"), 1);
}

#[test]
fn clearing_override_tracks_current_global_level() {
    let config = LevelConfig::new();
    config
        .set_category_level("net", Some(value("debug")))
        .expect("override set");
    config.set_level(Severity::Error).expect("level set");
    assert!(config.has_category_override("net"));

    assert_eq!(config.set_category_level("net", None), Ok(3));
    assert!(!config.has_category_override("net"));
    assert!(config.categories().is_empty());
}

#[test]
fn category_relative_offsets_use_category_level() {
    let config = LevelConfig::new();
    config
        .set_category_level("net", Some(value("error")))
        .expect("override set");
    assert_eq!(config.set_category_level("net", Some(value("+2"))), Ok(5));

    assert_eq!(config.set_category_level("disk", Some(value("-1"))), Ok(5));
    config.set_level(Severity::Trace).expect("level set");
    assert_eq!(config.category_level("disk"), 5);
}

#[test]
fn category_relative_bounds_start_from_effective_bound() {
    let config = LevelConfig::new();
    config.set_max(Severity::Debug).expect("max set");
    assert_eq!(config.set_category_max("net", Some(value("-2"))), Ok(5));
    assert_eq!(config.category_max("net"), 5);
    assert_eq!(config.category_max("disk"), 7);
}

#[test]
fn every_mutation_bumps_the_generation() {
    let config = LevelConfig::new();
    let mut last = config.generation();
    let mut check = |config: &LevelConfig| {
        let current = config.generation();
        assert!(current > last, "generation must advance");
        last = current;
    };

    config.set_level(3).expect("level set");
    check(&config);
    config.apply_offset(1);
    check(&config);
    config.set_min(0).expect("min set");
    check(&config);
    config.set_max(8).expect("max set");
    check(&config);
    config.set_category_level("a", Some(LevelValue::Absolute(2))).expect("set");
    check(&config);
    config.set_category_min("a", None).expect("clear");
    check(&config);
    config.set_category_max("a", Some(LevelValue::Absolute(5))).expect("set");
    check(&config);
    config.invalidate_all();
    check(&config);
    config.reset();
    check(&config);
}

#[test]
fn reset_restores_defaults() {
    let config = LevelConfig::new();
    config.set_level(1).expect("level set");
    config.set_max(4).expect("max set");
    config
        .set_category_level("net", Some(LevelValue::Absolute(8)))
        .expect("override set");

    config.reset();
    assert_eq!(config.level(), 6);
    assert_eq!(config.clamp(), LevelClamp::unrestricted());
    assert_eq!(config.category_level("net"), 6);
}

#[test]
fn custom_resolver_handles_names() {
    let config = LevelConfig::with_resolver(|name: &str| match name {
        "chatty" => Ok(8),
        "hushed" => Ok(2),
        other => Err(LevelError::UnknownSeverity(other.to_owned())),
    });
    assert_eq!(config.set_level(value("chatty")), Ok(8));
    assert_eq!(config.set_level(value("hushed")), Ok(2));
    assert!(config.set_level(value("info")).is_err());
}

#[test]
fn independent_instances_do_not_share_state() {
    let first = LevelConfig::new();
    let second = LevelConfig::new();
    first.set_level(0).expect("level set");
    assert_eq!(second.level(), 6);
}

#[test]
fn global_instance_is_shared() {
    let a = LevelConfig::global();
    let b = LevelConfig::global();
    assert!(Arc::ptr_eq(a, b));
}

#[test]
fn concurrent_offsets_are_not_lost() {
    let config = Arc::new(LevelConfig::new());
    config.set_level(LevelValue::Absolute(0)).expect("level set");
    config.set_max(1_000).expect("max set");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = Arc::clone(&config);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    config.apply_offset(1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("thread joins");
    }

    assert_eq!(config.level(), 400);
}

proptest! {
    #[test]
    fn set_level_matches_clamp_of_input(min in -1i32..5, span in 0i32..6, input in -50i32..50) {
        let config = LevelConfig::new();
        config.set_min(min).expect("min set");
        config.set_max(min + span).expect("max set");
        let level = config.set_level(input).expect("level set");
        prop_assert_eq!(level, LevelClamp::new(min, min + span).apply(input));
        prop_assert_eq!(config.level(), level);
    }

    #[test]
    fn offsets_never_escape_the_clamp(steps in proptest::collection::vec(-3i32..=3, 0..64)) {
        let config = LevelConfig::new();
        for step in steps {
            let level = config.apply_offset(step);
            prop_assert!(config.clamp().contains(level));
        }
    }
}
