// src/crisis/contacts.rs
//! Region-keyed emergency contacts and localized crisis messages

use serde::Serialize;

use crate::enums::{ContactCategory, CrisisLevel, Region};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyContact {
    pub name: &'static str,
    /// Number to call, or an instruction when there is no single number
    pub phone: &'static str,
    pub available: &'static str,
    pub category: ContactCategory,
}

pub const BRAZIL_CONTACTS: &[EmergencyContact] = &[
    EmergencyContact {
        name: "CVV - Centro de Valorização da Vida",
        phone: "188",
        available: "24 horas",
        category: ContactCategory::Hotline,
    },
    EmergencyContact {
        name: "SAMU - Emergência",
        phone: "192",
        available: "24 horas",
        category: ContactCategory::Emergency,
    },
    EmergencyContact {
        name: "CAPS - Centro de Atenção Psicossocial",
        phone: "Procure o mais próximo",
        available: "Horário comercial",
        category: ContactCategory::Support,
    },
];

pub const US_CONTACTS: &[EmergencyContact] = &[
    EmergencyContact {
        name: "988 Suicide & Crisis Lifeline",
        phone: "988",
        available: "24/7",
        category: ContactCategory::Hotline,
    },
    EmergencyContact {
        name: "Crisis Text Line",
        phone: "Text HOME to 741741",
        available: "24/7",
        category: ContactCategory::Support,
    },
    EmergencyContact {
        name: "Emergency",
        phone: "911",
        available: "24/7",
        category: ContactCategory::Emergency,
    },
];

pub fn emergency_contacts(region: Region) -> Vec<EmergencyContact> {
    match region {
        Region::Brazil => BRAZIL_CONTACTS.to_vec(),
        Region::UnitedStates => US_CONTACTS.to_vec(),
        Region::Both => BRAZIL_CONTACTS.iter().chain(US_CONTACTS).cloned().collect(),
    }
}

pub fn crisis_message(level: CrisisLevel, locale: &str) -> &'static str {
    let pt = locale.contains("pt");
    match (level, pt) {
        (CrisisLevel::Critical, true) => "Percebo que você está passando por um momento extremamente difícil. Sua vida tem valor e há pessoas que querem ajudar. Por favor, procure ajuda imediatamente.",
        (CrisisLevel::Critical, false) => "I can see you're going through an extremely difficult time. Your life has value and there are people who want to help. Please seek help immediately.",
        (CrisisLevel::High, true) => "Você não está sozinho. Há suporte profissional disponível para ajudá-lo neste momento. Por favor, considere entrar em contato com um dos recursos abaixo.",
        (CrisisLevel::High, false) => "You're not alone. Professional support is available to help you through this. Please consider reaching out to one of the resources below.",
        (CrisisLevel::Medium, true) => "Está tudo bem não estar bem. Vamos encontrar recursos para apoiá-lo. Você é importante e merece ajuda.",
        (CrisisLevel::Medium, false) => "It's okay to not be okay. Let's find resources to support you. You matter and deserve help.",
        (CrisisLevel::Low, true) => "Estou aqui para ouvir e apoiar você. Como posso ajudar?",
        (CrisisLevel::Low, false) => "I'm here to listen and support you. How can I help?",
    }
}
