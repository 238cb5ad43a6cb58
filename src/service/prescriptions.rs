//! Prescription creation and queries.

use chrono::Utc;
use tracing::{debug, info};

use crate::domain::{Patient, PatientStatus, Prescription, PrescriptionDraft, PrescriptionStatus};
use crate::events::topics;
use crate::store::{RecordStore, RecordsExt, WriteBatch};
use crate::{Dispensary, DispensaryError};

impl<S: RecordStore> Dispensary<S> {
    /// Write a prescription: persist the header with its lines and move
    /// the referenced patient to `Completed`, as one atomic commit.
    ///
    /// The patient cascade is best-effort: a patient id that does not
    /// resolve is skipped and the prescription is still created, since a
    /// prescription may reference a patient managed outside this
    /// directory. No stock is checked here; stock is validated at
    /// dispense time.
    pub fn create_prescription(
        &self,
        draft: PrescriptionDraft,
    ) -> Result<Prescription, DispensaryError> {
        draft.validate()?;

        let _guard = self.lock_all(vec![
            Self::record_key::<Prescription>(&draft.id),
            Self::record_key::<Patient>(&draft.patient_id),
        ])?;

        if self.store().records::<Prescription>().get(&draft.id)?.is_some() {
            return Err(DispensaryError::duplicate_id(draft.id));
        }

        let prescription = Prescription {
            id: draft.id,
            patient_id: draft.patient_id,
            doctor_id: draft.doctor_id,
            created_at: Utc::now(),
            status: draft.status.unwrap_or(PrescriptionStatus::Issued),
            lines: draft.lines,
        };

        let mut batch = WriteBatch::new();
        batch.insert(&prescription)?;

        match self.store().records::<Patient>().get(&prescription.patient_id)? {
            Some(found) => {
                let mut patient = found.data;
                if patient.status != PatientStatus::Completed {
                    patient.status = PatientStatus::Completed;
                    batch.update(&patient, found.version)?;
                }
            }
            None => {
                debug!(
                    "patient {} not in directory, skipping status cascade for prescription {}",
                    prescription.patient_id, prescription.id
                );
            }
        }

        self.store().apply(batch)?;

        info!(
            "prescription {} created for patient {} with {} lines",
            prescription.id,
            prescription.patient_id,
            prescription.lines.len()
        );
        self.events().emit(topics::PRESCRIPTION_CREATED, &prescription);

        Ok(prescription)
    }

    /// Get a prescription by id.
    pub fn get_prescription(&self, id: &str) -> Result<Prescription, DispensaryError> {
        match self.store().records::<Prescription>().get(id)? {
            Some(found) => Ok(found.data),
            None => Err(DispensaryError::not_found("prescription", id)),
        }
    }

    /// All prescriptions, newest first.
    pub fn list_prescriptions(&self) -> Result<Vec<Prescription>, DispensaryError> {
        let mut prescriptions: Vec<Prescription> = self
            .store()
            .records::<Prescription>()
            .all()?
            .into_iter()
            .map(|found| found.data)
            .collect();
        prescriptions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(prescriptions)
    }
}
