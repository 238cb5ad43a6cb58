use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DispensaryError;
use crate::store::Record;

/// Prescription lifecycle: written (`Issued`) and fulfilled (`Dispensed`).
///
/// `Issued → Dispensed` is the only forward transition; identity
/// transitions are accepted as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    Issued,
    Dispensed,
}

impl PrescriptionStatus {
    pub fn can_transition_to(self, next: PrescriptionStatus) -> bool {
        self == next
            || matches!(
                (self, next),
                (PrescriptionStatus::Issued, PrescriptionStatus::Dispensed)
            )
    }
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrescriptionStatus::Issued => write!(f, "issued"),
            PrescriptionStatus::Dispensed => write!(f, "dispensed"),
        }
    }
}

/// One medication entry within a prescription.
///
/// `name` is the medication's display name captured when the
/// prescription was written; later catalog renames never reach back into
/// historical prescriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionLine {
    pub medication_id: String,
    pub name: String,
    pub dosage: String,
    pub quantity: u32,
}

/// A prescription header owning its ordered line items.
///
/// Lines live inside the prescription record: they have no lifecycle of
/// their own and are read and written only through their prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub created_at: DateTime<Utc>,
    pub status: PrescriptionStatus,
    #[serde(rename = "medications")]
    pub lines: Vec<PrescriptionLine>,
}

impl Record for Prescription {
    const COLLECTION: &'static str = "prescriptions";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Prescription {
    pub fn is_dispensed(&self) -> bool {
        self.status == PrescriptionStatus::Dispensed
    }
}

/// Input for writing a prescription; `created_at` is assigned at
/// creation and `status` defaults to `Issued`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionDraft {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    #[serde(rename = "medications")]
    pub lines: Vec<PrescriptionLine>,
    #[serde(default)]
    pub status: Option<PrescriptionStatus>,
}

impl PrescriptionDraft {
    /// Reject malformed drafts before anything is written: a blank id,
    /// an empty line list, a blank medication reference, or a
    /// non-positive quantity.
    pub fn validate(&self) -> Result<(), DispensaryError> {
        if self.id.trim().is_empty() {
            return Err(DispensaryError::invalid_input(
                "prescription id must not be blank",
            ));
        }
        if self.lines.is_empty() {
            return Err(DispensaryError::invalid_input(
                "prescription must contain at least one line",
            ));
        }
        for line in &self.lines {
            if line.medication_id.trim().is_empty() {
                return Err(DispensaryError::invalid_input(
                    "prescription line is missing a medication id",
                ));
            }
            if line.quantity == 0 {
                return Err(DispensaryError::invalid_input(format!(
                    "line for {} has a non-positive quantity",
                    line.medication_id
                )));
            }
        }
        Ok(())
    }
}
