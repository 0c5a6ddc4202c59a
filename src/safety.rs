// src/safety.rs
//! Message safety gate
//!
//! Wraps the crisis detector with the decisions a chat endpoint makes around
//! it: when to bypass the assistant entirely, which prompt mode to use, and
//! whether an assistant reply is fit to show.

use serde::Serialize;

use crate::crisis::{CrisisAssessment, CrisisDetector, EmergencyContact};
use crate::enums::CrisisLevel;

/// Sent instead of an assistant reply when the user message is CRITICAL
pub const ESCALATION_MESSAGE: &str = "Por sua segurança, detectamos sinais que requerem atenção profissional imediata. Por favor, entre em contato com um dos serviços de emergência: CVV (188), SAMU (192) ou procure o CAPS mais próximo. Sua vida tem valor e há pessoas prontas para ajudar.";

/// Replaces an assistant reply that itself reads as HIGH or CRITICAL
pub const FALLBACK_REPLY: &str = "Percebo que você está passando por um momento difícil. É importante lembrar que você não está sozinho. Existem pessoas e recursos disponíveis para apoiá-lo. Como posso ajudar você a encontrar o suporte necessário neste momento?";

/// Shown when the upstream model refuses for safety reasons
pub const SAFETY_BLOCK_MESSAGE: &str = "Desculpe, não posso responder a essa mensagem por razões de segurança. Se você está passando por dificuldades, considere buscar ajuda profissional.";

pub const FLAG_REASON_CRISIS_REPLY: &str = "AI response contained crisis content";

/// Error label returned alongside [`SAFETY_BLOCK_MESSAGE`]
pub const SAFETY_BLOCK_ERROR: &str = "safety_block";

/// Reply for a turn the upstream model refused on safety grounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetyBlock {
    pub message: &'static str,
    pub suggest_professional_help: bool,
    pub error: &'static str,
}

/// How the assistant prompt should be framed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PromptMode {
    /// Crisis-aware prompt for MEDIUM/HIGH messages
    Crisis(CrisisLevel),
    /// Regular technique-driven prompt
    Technique,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum UserVerdict {
    /// Do not consult the assistant; answer with the escalation message.
    Escalate {
        assessment: CrisisAssessment,
        message: &'static str,
        contacts: Vec<EmergencyContact>,
    },
    Proceed {
        assessment: CrisisAssessment,
        mode: PromptMode,
    },
}

impl UserVerdict {
    pub fn assessment(&self) -> &CrisisAssessment {
        match self {
            UserVerdict::Escalate { assessment, .. } | UserVerdict::Proceed { assessment, .. } => {
                assessment
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ReplyVerdict {
    Accept,
    Replace {
        message: &'static str,
        flag_reason: &'static str,
    },
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SafetyGate;

impl SafetyGate {
    pub fn screen_user_message(&self, detector: &mut CrisisDetector, text: &str) -> UserVerdict {
        let assessment = detector.analyze_message(text);
        match assessment.level {
            CrisisLevel::Critical => UserVerdict::Escalate {
                contacts: detector.emergency_contacts(),
                message: ESCALATION_MESSAGE,
                assessment,
            },
            level @ (CrisisLevel::High | CrisisLevel::Medium) => UserVerdict::Proceed {
                assessment,
                mode: PromptMode::Crisis(level),
            },
            CrisisLevel::Low => UserVerdict::Proceed {
                assessment,
                mode: PromptMode::Technique,
            },
        }
    }

    /// Screen an assistant reply. Uses `classify`, so replies never enter the user's history.
    pub fn screen_assistant_reply(&self, detector: &CrisisDetector, reply: &str) -> ReplyVerdict {
        let assessment = detector.classify(reply);
        if assessment.level.is_elevated() {
            tracing::warn!(level = %assessment.level, "assistant reply replaced");
            ReplyVerdict::Replace {
                message: FALLBACK_REPLY,
                flag_reason: FLAG_REASON_CRISIS_REPLY,
            }
        } else {
            ReplyVerdict::Accept
        }
    }

    /// Map an upstream model error to the safety-block reply when it is a safety refusal.
    ///
    /// Any other error is left for the caller to report.
    pub fn safety_block_for(&self, upstream_error: &str) -> Option<SafetyBlock> {
        upstream_error.contains("SAFETY").then(|| {
            tracing::warn!("assistant refused the turn for safety reasons");
            SafetyBlock {
                message: SAFETY_BLOCK_MESSAGE,
                suggest_professional_help: true,
                error: SAFETY_BLOCK_ERROR,
            }
        })
    }

    pub fn suggest_professional_help(&self, level: CrisisLevel, detector: &CrisisDetector) -> bool {
        matches!(level, CrisisLevel::High | CrisisLevel::Medium)
            || detector.check_deterioration_pattern()
    }

    /// Contacts to attach to a response, if any
    pub fn resources_for(
        &self,
        level: CrisisLevel,
        detector: &CrisisDetector,
    ) -> Option<Vec<EmergencyContact>> {
        (level != CrisisLevel::Low).then(|| detector.emergency_contacts())
    }
}
