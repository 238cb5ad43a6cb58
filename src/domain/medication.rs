use serde::{Deserialize, Serialize};

use crate::store::Record;

/// One entry in the medication catalog, carrying the live stock counter.
///
/// `stock` is unsigned: the type rules out negative inventory, and every
/// decrement is checked against the counter before it is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub spec: String,
    pub unit: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
}

impl Record for Medication {
    const COLLECTION: &'static str = "medications";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Medication {
    /// Whether current stock covers `quantity` units.
    pub fn can_fill(&self, quantity: u32) -> bool {
        self.stock >= quantity
    }
}

/// Partial update of a medication's descriptive fields.
///
/// Stock is deliberately absent: stock only moves through dispensing and
/// explicit adjustment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationUpdate {
    pub name: Option<String>,
    pub spec: Option<String>,
    pub unit: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

impl MedicationUpdate {
    pub(crate) fn apply_to(&self, medication: &mut Medication) {
        if let Some(name) = &self.name {
            medication.name = name.clone();
        }
        if let Some(spec) = &self.spec {
            medication.spec = spec.clone();
        }
        if let Some(unit) = &self.unit {
            medication.unit = unit.clone();
        }
        if let Some(price) = self.price {
            medication.price = price;
        }
        if let Some(category) = &self.category {
            medication.category = category.clone();
        }
    }
}
