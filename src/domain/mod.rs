//! Domain records: the medication catalog, the patient directory, and
//! prescriptions with their line items.
//!
//! Records serialize with the camelCase field names of the upstream wire
//! format (`patientId`, `registerTime`, `medicationId`). Status fields
//! are closed enumerations with explicit transition tables; identity
//! transitions are permitted as no-ops, anything else is rejected.

mod doctor;
mod medication;
mod patient;
mod prescription;

pub use doctor::Doctor;
pub use medication::{Medication, MedicationUpdate};
pub use patient::{Patient, PatientDraft, PatientStatus, PatientUpdate};
pub use prescription::{
    Prescription, PrescriptionDraft, PrescriptionLine, PrescriptionStatus,
};
