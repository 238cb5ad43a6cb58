use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A prescriber. Referenced by `Prescription::doctor_id`; carries no
/// behavior of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub department: String,
    pub title: String,
}

impl Record for Doctor {
    const COLLECTION: &'static str = "doctors";

    fn id(&self) -> &str {
        &self.id
    }
}
