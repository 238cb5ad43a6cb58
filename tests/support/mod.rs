use dispensary::{seed, Dispensary, PatientDraft, PrescriptionDraft, PrescriptionLine};

/// A dispensary over a fresh in-memory store, loaded with the demo
/// formulary (M001–M007) and seed doctor.
pub fn dispensary() -> Dispensary {
    let dispensary = Dispensary::in_memory();
    seed::demo_catalog(&dispensary).unwrap();
    dispensary
}

pub fn patient(id: &str, name: &str) -> PatientDraft {
    PatientDraft {
        id: id.into(),
        name: name.into(),
        age: 34,
        gender: "female".into(),
        phone: "13800000000".into(),
        status: None,
        symptoms: None,
        diagnosis: None,
    }
}

pub fn line(medication_id: &str, name: &str, quantity: u32) -> PrescriptionLine {
    PrescriptionLine {
        medication_id: medication_id.into(),
        name: name.into(),
        dosage: "1 unit, three times daily".into(),
        quantity,
    }
}

pub fn draft(id: &str, patient_id: &str, lines: Vec<PrescriptionLine>) -> PrescriptionDraft {
    PrescriptionDraft {
        id: id.into(),
        patient_id: patient_id.into(),
        doctor_id: "DOC001".into(),
        lines,
        status: None,
    }
}
