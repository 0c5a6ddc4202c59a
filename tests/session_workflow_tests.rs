// tests/session_workflow_tests.rs
//! End-to-end flow of one chat turn: limit, screen, encrypt, store, reopen
mod common;

use std::time::Duration;

use common::{fast_encryption, setup};
use mindful_guard::consts::UNDECRYPTABLE_PLACEHOLDER;
use mindful_guard::safety::{PromptMode, FALLBACK_REPLY};
use mindful_guard::transcript::Role;
use mindful_guard::{
    decrypt_transcript, CrisisDetector, CrisisLevel, RateLimiter, ReplyVerdict, SafetyGate,
    SessionEncryption, StoredMessage, UserVerdict,
};

#[test]
fn test_low_risk_turn_is_stored_and_reopened_after_restart() {
    setup();
    let limiter = RateLimiter::new(20, Duration::from_secs(60));
    let mut detector = CrisisDetector::new("pt-BR");
    let gate = SafetyGate;

    let session = SessionEncryption::new(fast_encryption("master"), "sess-42");
    let created_at = session.created_at_ms();

    assert!(limiter.check("sess-42"));
    let verdict = gate.screen_user_message(&mut detector, "Hoje quero falar sobre trabalho");
    let UserVerdict::Proceed { assessment, mode } = verdict else {
        panic!("low-risk message should proceed");
    };
    assert_eq!(mode, PromptMode::Technique);
    assert_eq!(assessment.level, CrisisLevel::Low);

    let reply = "Claro! Vamos conversar sobre isso.";
    assert_eq!(gate.screen_assistant_reply(&detector, reply), ReplyVerdict::Accept);

    let stored = vec![
        StoredMessage::seal(&session, "m1", Role::User, "Hoje quero falar sobre trabalho")
            .unwrap(),
        StoredMessage::seal(&session, "m2", Role::Assistant, reply).unwrap(),
    ];
    let persisted = serde_json::to_string(&stored).unwrap();
    drop(session);

    // A later request rebuilds the helper from the persisted creation time.
    let reopened = SessionEncryption::at(fast_encryption("master"), "sess-42", created_at);
    let loaded: Vec<StoredMessage> = serde_json::from_str(&persisted).unwrap();
    let transcript = decrypt_transcript(&reopened, &loaded);

    assert!(transcript.iter().all(|m| m.decrypted));
    assert_eq!(transcript[1].content, reply);
}

#[test]
fn test_helper_built_later_without_timestamp_cannot_read_history() {
    let first = SessionEncryption::at(fast_encryption("master"), "sess-1", 1_000);
    let stored = vec![StoredMessage::seal(&first, "m1", Role::User, "oi").unwrap()];

    let later = SessionEncryption::at(fast_encryption("master"), "sess-1", 2_000);
    let transcript = decrypt_transcript(&later, &stored);
    assert_eq!(transcript[0].content, UNDECRYPTABLE_PLACEHOLDER);
    assert!(!transcript[0].decrypted);
}

#[test]
fn test_critical_turn_escalates_and_bad_reply_is_flagged() {
    let mut detector = CrisisDetector::new("pt-BR");
    let gate = SafetyGate;

    let verdict = gate.screen_user_message(&mut detector, "Eu penso em suicídio");
    assert!(matches!(verdict, UserVerdict::Escalate { .. }));
    assert_eq!(verdict.assessment().triggers, vec!["suicídio"]);
    assert!(detector.is_emergency_mode());

    let session = SessionEncryption::new(fast_encryption("master"), "sess-7");
    let ReplyVerdict::Replace {
        message,
        flag_reason,
    } = gate.screen_assistant_reply(&detector, "Talvez seja melhor desistir")
    else {
        panic!("crisis-laden reply must be replaced");
    };
    assert_eq!(message, FALLBACK_REPLY);

    let stored = StoredMessage::seal(&session, "m9", Role::Assistant, message)
        .unwrap()
        .flag(flag_reason);
    assert!(stored.flagged);
    assert_eq!(decrypt_transcript(&session, &[stored])[0].content, FALLBACK_REPLY);
}
