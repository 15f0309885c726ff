//! Built-in case types of the municipal back office

use super::definition::{CaseTypeDefinition, StageDefinition};

pub const LAND_REGULARIZATION: &str = "land-regularization";
pub const MEDICAL_REFERRAL: &str = "medical-referral";
pub const SERVICE_TICKET: &str = "service-ticket";

pub fn builtin_definitions() -> Vec<CaseTypeDefinition> {
    vec![land_regularization(), medical_referral(), service_ticket()]
}

/// Land regularization: from protocol to registered title.
pub fn land_regularization() -> CaseTypeDefinition {
    CaseTypeDefinition::new(
        LAND_REGULARIZATION,
        "Land regularization",
        vec![
            StageDefinition::new("protocol", "Protocol", &[]),
            StageDefinition::new(
                "document-analysis",
                "Document analysis",
                &["rg", "cpf", "proof-of-residence", "purchase-contract"],
            ),
            StageDefinition::new("site-inspection", "Site inspection", &["inspection-report"]),
            StageDefinition::new(
                "technical-opinion",
                "Technical opinion",
                &["technical-opinion"],
            ),
            StageDefinition::new("approval", "Approval", &["approval-decree"]),
            StageDefinition::new("titling", "Title registration", &["registered-title"]),
        ],
    )
}

/// Out-of-town medical referral (TFD).
pub fn medical_referral() -> CaseTypeDefinition {
    CaseTypeDefinition::new(
        MEDICAL_REFERRAL,
        "Out-of-town medical referral (TFD)",
        vec![
            StageDefinition::new(
                "request",
                "Request",
                &["medical-report", "rg", "sus-card", "proof-of-residence"],
            ),
            StageDefinition::new(
                "medical-evaluation",
                "Medical evaluation",
                &["specialist-referral"],
            ),
            StageDefinition::new(
                "scheduling",
                "Appointment scheduling",
                &["appointment-confirmation"],
            ),
            StageDefinition::new("travel", "Travel", &["travel-authorization"]),
            StageDefinition::new("return", "Return and accountability", &["attendance-statement"]),
        ],
    )
}

/// Special collection and service request tickets.
pub fn service_ticket() -> CaseTypeDefinition {
    CaseTypeDefinition::new(
        SERVICE_TICKET,
        "Service request",
        vec![
            StageDefinition::new("opened", "Opened", &[]),
            StageDefinition::new("triage", "Triage", &["address-proof"]),
            StageDefinition::new("scheduled", "Scheduled", &[]),
            StageDefinition::new("execution", "Execution", &["service-report"]),
        ],
    )
}
