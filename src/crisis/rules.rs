// src/crisis/rules.rs
//! Versioned keyword rule set and its evaluator
//!
//! Tiers are evaluated in priority order; the first tier with any match wins
//! the level and contributes every one of its matching keywords as triggers.

use serde::{Deserialize, Serialize};

use crate::enums::CrisisLevel;
use crate::error::{CoreError, Result};

pub const BUILTIN_RULESET_VERSION: &str = "2024.1";

const CRITICAL_KEYWORDS: &[&str] = &[
    // pt-BR
    "suicídio",
    "suicidar",
    "me matar",
    "acabar com tudo",
    "não aguento mais",
    "quero morrer",
    "vou morrer",
    "acabar com minha vida",
    "tirar minha vida",
    "overdose",
    "me cortar",
    "me machucar",
    // en
    "suicide",
    "kill myself",
    "end it all",
    "cant take it anymore",
    "want to die",
    "going to die",
    "end my life",
    "take my life",
    "cut myself",
    "hurt myself",
    "self harm",
];

const HIGH_KEYWORDS: &[&str] = &[
    // pt-BR
    "sem esperança",
    "não vale a pena",
    "ninguém se importa",
    "sozinho",
    "inútil",
    "fracassado",
    "desistir",
    "não consigo mais",
    // en
    "hopeless",
    "worthless",
    "nobody cares",
    "alone",
    "useless",
    "failure",
    "give up",
    "cant anymore",
];

const MEDIUM_KEYWORDS: &[&str] = &[
    // pt-BR
    "deprimido",
    "ansioso",
    "triste demais",
    "cansado de tudo",
    "não durmo",
    "pesadelos",
    "pânico",
    // en
    "depressed",
    "anxious",
    "too sad",
    "tired of everything",
    "cant sleep",
    "nightmares",
    "panic",
];

const NEGATIVE_WORDS: &[&str] = &[
    "não", "nunca", "ninguém", "nothing", "never", "nobody", "cant", "wont",
];

/// One severity tier: its keywords and how each match moves the confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRule {
    pub level: CrisisLevel,
    pub keywords: Vec<String>,
    /// Added to the confidence for each matching keyword
    pub increment: f64,
    /// Confidence ceiling while accumulating this tier
    pub ceiling: f64,
}

/// Everything the classifier needs, as plain data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub version: String,
    /// Highest priority first
    pub tiers: Vec<TierRule>,
    pub negative_words: Vec<String>,
    /// Added per distinct negative word present
    pub negative_bonus: f64,
}

/// Level, confidence and triggers before any side effects
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub level: CrisisLevel,
    pub confidence: f64,
    pub triggers: Vec<String>,
    pub negative_hits: usize,
}

// NaN and infinities fail the range check too.
fn unit_interval(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidRules(format!(
            "{field} must be within [0, 1], got {value}"
        )))
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl RuleSet {
    pub fn builtin() -> Self {
        RuleSet {
            version: BUILTIN_RULESET_VERSION.to_string(),
            tiers: vec![
                TierRule {
                    level: CrisisLevel::Critical,
                    keywords: owned(CRITICAL_KEYWORDS),
                    increment: 0.9,
                    ceiling: 1.0,
                },
                TierRule {
                    level: CrisisLevel::High,
                    keywords: owned(HIGH_KEYWORDS),
                    increment: 0.6,
                    ceiling: 0.9,
                },
                TierRule {
                    level: CrisisLevel::Medium,
                    keywords: owned(MEDIUM_KEYWORDS),
                    increment: 0.4,
                    ceiling: 0.7,
                },
            ],
            negative_words: owned(NEGATIVE_WORDS),
            negative_bonus: 0.1,
        }
    }

    /// Load a rule set shipped as JSON; tiers are re-sorted by severity.
    ///
    /// Every increment, ceiling and the negative bonus must lie in `[0, 1]`,
    /// and each level above LOW may own at most one tier.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut rules: RuleSet = serde_json::from_str(json)?;
        rules.validate()?;
        rules.normalize();
        Ok(rules)
    }

    fn validate(&self) -> Result<()> {
        unit_interval("negative_bonus", self.negative_bonus)?;

        let mut seen: Vec<CrisisLevel> = Vec::with_capacity(self.tiers.len());
        for tier in &self.tiers {
            if tier.level == CrisisLevel::Low {
                return Err(CoreError::InvalidRules(
                    "LOW is the no-match result and cannot own keywords".into(),
                ));
            }
            if seen.contains(&tier.level) {
                return Err(CoreError::InvalidRules(format!(
                    "duplicate tier for {}",
                    tier.level
                )));
            }
            seen.push(tier.level);

            unit_interval(&format!("{} increment", tier.level), tier.increment)?;
            unit_interval(&format!("{} ceiling", tier.level), tier.ceiling)?;
        }
        Ok(())
    }

    fn normalize(&mut self) {
        self.tiers.sort_by(|a, b| b.level.cmp(&a.level));
        for tier in &mut self.tiers {
            for kw in &mut tier.keywords {
                *kw = kw.to_lowercase();
            }
        }
        for word in &mut self.negative_words {
            *word = word.to_lowercase();
        }
    }

    /// Pure evaluation of `message` against the rule set.
    pub fn evaluate(&self, message: &str) -> Evaluation {
        let lower = message.to_lowercase();

        let mut level = CrisisLevel::Low;
        let mut confidence = 0.0_f64;
        let mut triggers = Vec::new();

        for tier in &self.tiers {
            for kw in &tier.keywords {
                if lower.contains(kw.as_str()) {
                    triggers.push(kw.clone());
                    confidence = (confidence + tier.increment).min(tier.ceiling);
                }
            }
            if !triggers.is_empty() {
                level = tier.level;
                break;
            }
        }

        let negative_hits = self
            .negative_words
            .iter()
            .filter(|w| lower.contains(w.as_str()))
            .count();
        confidence = (confidence + negative_hits as f64 * self.negative_bonus).clamp(0.0, 1.0);

        Evaluation {
            level,
            confidence,
            triggers,
            negative_hits,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}
