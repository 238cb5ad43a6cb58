//! Demo catalog seeding.

use tracing::{debug, info};

use crate::domain::{Doctor, Medication};
use crate::store::{RecordStore, RecordsExt};
use crate::{Dispensary, DispensaryError};

/// Load the demo formulary and seed doctor into an empty dispensary.
///
/// Idempotent: a catalog that already holds medications is left
/// untouched, so calling this on every startup is safe.
pub fn demo_catalog<S: RecordStore>(dispensary: &Dispensary<S>) -> Result<(), DispensaryError> {
    let medications = dispensary.store().records::<Medication>();
    if !medications.all()?.is_empty() {
        debug!("catalog already populated, skipping demo seed");
        return Ok(());
    }

    for medication in demo_medications() {
        dispensary.add_medication(medication)?;
    }

    let doctors = dispensary.store().records::<Doctor>();
    if doctors.get("DOC001")?.is_none() {
        doctors.insert(&Doctor {
            id: "DOC001".into(),
            name: "Dr. Wang".into(),
            department: "Internal Medicine".into(),
            title: "Chief Physician".into(),
        })?;
    }

    info!("demo catalog seeded");
    Ok(())
}

/// The demo formulary.
pub fn demo_medications() -> Vec<Medication> {
    fn med(id: &str, name: &str, spec: &str, unit: &str, price: f64, category: &str, stock: u32) -> Medication {
        Medication {
            id: id.into(),
            name: name.into(),
            spec: spec.into(),
            unit: unit.into(),
            price,
            category: category.into(),
            stock,
        }
    }

    vec![
        med("M001", "Amoxicillin Capsules", "0.25g*24", "box", 12.5, "Antibiotic", 500),
        med("M002", "Ibuprofen Sustained-Release Capsules", "0.3g*10", "box", 25.0, "Analgesic", 45),
        med("M003", "Lianhua Qingwen Capsules", "0.35g*24", "box", 18.8, "Cold Remedy", 150),
        med("M004", "Calcium Gluconate Oral Solution", "10ml*10", "box", 32.0, "Supplement", 12),
        med("M005", "Sodium Chloride Injection", "100ml:0.9g", "bag", 5.5, "Infusion", 1000),
        med("M006", "Erythromycin Ointment", "10g:0.1g", "tube", 8.0, "Dermatological", 30),
        med("M007", "Metformin Tablets", "0.5g*30", "box", 15.6, "Antidiabetic", 200),
    ]
}
