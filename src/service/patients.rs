//! The patient directory.

use chrono::Utc;
use tracing::info;

use crate::domain::{Patient, PatientDraft, PatientUpdate};
use crate::events::topics;
use crate::store::{RecordStore, RecordsExt};
use crate::{Dispensary, DispensaryError};

impl<S: RecordStore> Dispensary<S> {
    /// Register a patient. `register_time` is set here, once; status
    /// defaults to `Pending`.
    pub fn register_patient(&self, draft: PatientDraft) -> Result<Patient, DispensaryError> {
        draft.validate()?;

        let _guard = self.lock_all(vec![Self::record_key::<Patient>(&draft.id)])?;

        let patients = self.store().records::<Patient>();
        if patients.get(&draft.id)?.is_some() {
            return Err(DispensaryError::duplicate_id(draft.id));
        }

        let patient = draft.into_patient(Utc::now());
        patients.insert(&patient)?;

        info!("patient {} registered", patient.id);
        self.events().emit(topics::PATIENT_REGISTERED, &patient);

        Ok(patient)
    }

    /// Partially update a patient: symptoms, diagnosis, and/or status.
    /// A requested status change must be an allowed transition.
    pub fn update_patient(
        &self,
        id: &str,
        update: PatientUpdate,
    ) -> Result<Patient, DispensaryError> {
        let _guard = self.lock_all(vec![Self::record_key::<Patient>(id)])?;

        let patients = self.store().records::<Patient>();
        let found = match patients.get(id)? {
            Some(found) => found,
            None => return Err(DispensaryError::not_found("patient", id)),
        };
        let mut patient = found.data;

        if let Some(status) = update.status {
            if !patient.status.can_transition_to(status) {
                return Err(DispensaryError::invalid_input(format!(
                    "patient status cannot change from {} to {}",
                    patient.status, status
                )));
            }
            patient.status = status;
        }
        if let Some(symptoms) = update.symptoms {
            patient.symptoms = Some(symptoms);
        }
        if let Some(diagnosis) = update.diagnosis {
            patient.diagnosis = Some(diagnosis);
        }

        patients.update(&patient, found.version)?;
        Ok(patient)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: &str) -> Result<Patient, DispensaryError> {
        match self.store().records::<Patient>().get(id)? {
            Some(found) => Ok(found.data),
            None => Err(DispensaryError::not_found("patient", id)),
        }
    }

    /// All registered patients, most recently registered first.
    pub fn list_patients(&self) -> Result<Vec<Patient>, DispensaryError> {
        let mut patients: Vec<Patient> = self
            .store()
            .records::<Patient>()
            .all()?
            .into_iter()
            .map(|found| found.data)
            .collect();
        patients.sort_by(|a, b| b.register_time.cmp(&a.register_time));
        Ok(patients)
    }
}
