// tests/crisis_tests.rs
mod common;

use common::setup;
use mindful_guard::crisis::rules::RuleSet;
use mindful_guard::{CrisisDetector, CrisisLevel};

fn every_keyword(level: CrisisLevel) -> Vec<String> {
    RuleSet::builtin()
        .tiers
        .into_iter()
        .find(|t| t.level == level)
        .map(|t| t.keywords)
        .unwrap_or_default()
}

#[test]
fn test_any_critical_keyword_wins_over_other_tiers() {
    setup();
    let detector = CrisisDetector::default();
    let lower_tiers = "hopeless, depressed, sozinho, pânico";

    for kw in every_keyword(CrisisLevel::Critical) {
        let msg = format!("{lower_tiers} ... {kw}");
        let a = detector.classify(&msg);
        assert_eq!(a.level, CrisisLevel::Critical, "keyword {kw:?}");
        assert!(a.triggers.contains(&kw));
    }
}

#[test]
fn test_each_high_keyword_alone_is_high() {
    let detector = CrisisDetector::default();
    for kw in every_keyword(CrisisLevel::High) {
        assert_eq!(detector.classify(&kw).level, CrisisLevel::High, "keyword {kw:?}");
    }
}

#[test]
fn test_each_medium_keyword_alone_is_medium() {
    let detector = CrisisDetector::default();
    for kw in every_keyword(CrisisLevel::Medium) {
        assert_eq!(
            detector.classify(&kw).level,
            CrisisLevel::Medium,
            "keyword {kw:?}"
        );
    }
}

#[test]
fn test_confidence_stays_in_unit_interval() {
    let detector = CrisisDetector::default();
    let messages = [
        "",
        "nothing never nobody cant wont não nunca ninguém",
        "suicide kill myself end it all want to die never nobody",
        "alone useless failure give up hopeless worthless",
    ];
    for m in messages {
        let c = detector.classify(m).confidence;
        assert!((0.0..=1.0).contains(&c), "{m:?} -> {c}");
    }
}

#[test]
fn test_neutral_message_is_low_with_no_triggers() {
    let a = CrisisDetector::default().classify("Fui caminhar e tomei um café");
    assert_eq!(a.level, CrisisLevel::Low);
    assert!(a.triggers.is_empty());
    assert_eq!(a.confidence, 0.0);
    assert_eq!(a.suggested_action, "Continue monitoring");
}

#[test]
fn test_deterioration_over_a_conversation() {
    let mut d = CrisisDetector::new("en-US");
    let conversation = [
        ("hi there", false),
        ("I feel useless", false),
        ("work was fine", false),
        ("I'm a failure", false),
        ("nobody cares about me", true), // third HIGH within the last five
        ("had lunch", true),
        ("watched a film", false), // first HIGH left the window
        ("went for a run", false),
    ];
    for (msg, expected) in conversation {
        d.analyze_message(msg);
        assert_eq!(d.check_deterioration_pattern(), expected, "after {msg:?}");
    }
}
