// src/crisis/detector.rs
use chrono::{DateTime, Utc};
use tracing::{error, warn};

use super::contacts::{crisis_message, emergency_contacts, EmergencyContact};
use super::history::DetectionHistory;
use super::rules::RuleSet;
use super::CrisisAssessment;
use crate::config::Config;
use crate::consts::{DEFAULT_HISTORY_CAPACITY, DEFAULT_LOCALE};
use crate::enums::{CrisisLevel, Region};

/// Keyword-based crisis detector with a rolling history
#[derive(Debug, Clone)]
pub struct CrisisDetector {
    rules: RuleSet,
    locale: String,
    history: DetectionHistory,
    last_detection: Option<DateTime<Utc>>,
    emergency_mode: bool,
}

impl CrisisDetector {
    pub fn new(locale: &str) -> Self {
        Self::with_rules(RuleSet::builtin(), locale)
    }

    pub fn with_rules(rules: RuleSet, locale: &str) -> Self {
        Self {
            rules,
            locale: locale.to_string(),
            history: DetectionHistory::with_capacity(DEFAULT_HISTORY_CAPACITY),
            last_detection: None,
            emergency_mode: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut detector = Self::new(&config.crisis.locale);
        detector.history = DetectionHistory::with_capacity(config.crisis.history_capacity);
        detector
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Classify without touching history or emergency state.
    pub fn classify(&self, message: &str) -> CrisisAssessment {
        let eval = self.rules.evaluate(message);
        CrisisAssessment {
            level: eval.level,
            confidence: eval.confidence,
            triggers: eval.triggers,
            suggested_action: eval.level.suggested_action().to_string(),
        }
    }

    /// Classify, record, and react to elevated levels.
    pub fn analyze_message(&mut self, message: &str) -> CrisisAssessment {
        let assessment = self.classify(message);

        self.history.push(assessment.clone());
        self.last_detection = Some(Utc::now());

        if assessment.level.is_elevated() {
            self.handle_crisis(&assessment);
        }

        assessment
    }

    fn handle_crisis(&mut self, assessment: &CrisisAssessment) {
        // Triggers and message text stay out of the logs.
        warn!(
            level = %assessment.level,
            confidence = assessment.confidence,
            trigger_count = assessment.triggers.len(),
            rules = %self.rules.version,
            "crisis detected"
        );

        if assessment.level == CrisisLevel::Critical {
            if !self.emergency_mode {
                error!(locale = %self.locale, "emergency protocol activated");
            }
            self.emergency_mode = true;
        }
    }

    /// Set by a CRITICAL assessment; callers suspend AI replies while it holds.
    pub fn is_emergency_mode(&self) -> bool {
        self.emergency_mode
    }

    pub fn clear_emergency_mode(&mut self) {
        self.emergency_mode = false;
    }

    pub fn last_detection_time(&self) -> Option<DateTime<Utc>> {
        self.last_detection
    }

    pub fn history(&self) -> &DetectionHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn check_deterioration_pattern(&self) -> bool {
        self.history.shows_deterioration()
    }

    pub fn emergency_contacts(&self) -> Vec<EmergencyContact> {
        emergency_contacts(Region::from_locale(&self.locale))
    }

    pub fn crisis_message(&self, level: CrisisLevel) -> &'static str {
        crisis_message(level, &self.locale)
    }
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}
