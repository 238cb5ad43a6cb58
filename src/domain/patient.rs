use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DispensaryError;
use crate::store::Record;

/// Where a patient stands in the visit workflow.
///
/// The only forward transition is `Pending → Completed`, driven by
/// prescription creation; identity transitions are accepted as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Pending,
    Completed,
}

impl PatientStatus {
    pub fn can_transition_to(self, next: PatientStatus) -> bool {
        self == next || matches!((self, next), (PatientStatus::Pending, PatientStatus::Completed))
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientStatus::Pending => write!(f, "pending"),
            PatientStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    pub register_time: DateTime<Utc>,
    pub status: PatientStatus,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
}

impl Record for Patient {
    const COLLECTION: &'static str = "patients";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for registering a patient; `register_time` is assigned by the
/// directory at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDraft {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    #[serde(default)]
    pub status: Option<PatientStatus>,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
}

impl PatientDraft {
    pub fn validate(&self) -> Result<(), DispensaryError> {
        if self.id.trim().is_empty() {
            return Err(DispensaryError::invalid_input("patient id must not be blank"));
        }
        if self.name.trim().is_empty() {
            return Err(DispensaryError::invalid_input("patient name must not be blank"));
        }
        Ok(())
    }

    pub(crate) fn into_patient(self, register_time: DateTime<Utc>) -> Patient {
        Patient {
            id: self.id,
            name: self.name,
            age: self.age,
            gender: self.gender,
            phone: self.phone,
            register_time,
            status: self.status.unwrap_or(PatientStatus::Pending),
            symptoms: self.symptoms,
            diagnosis: self.diagnosis,
        }
    }
}

/// Partial update of a patient record (symptoms, diagnosis, status).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientUpdate {
    pub symptoms: Option<String>,
    pub diagnosis: Option<String>,
    pub status: Option<PatientStatus>,
}
