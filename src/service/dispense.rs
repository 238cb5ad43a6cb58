//! The dispense engine: check-then-apply fulfillment of a prescription.

use tracing::{debug, info, warn};

use crate::domain::{Medication, Prescription, PrescriptionStatus};
use crate::events::topics;
use crate::store::{RecordStore, RecordsExt, Versioned, WriteBatch};
use crate::{Dispensary, DispensaryError};

/// Result of a dispense call.
///
/// `AlreadyDispensed` is the idempotent no-op: the prescription was
/// fulfilled earlier and no stock moved in this call. Callers should
/// treat both variants as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispenseOutcome {
    Dispensed,
    AlreadyDispensed,
}

impl DispenseOutcome {
    pub fn already_dispensed(self) -> bool {
        matches!(self, DispenseOutcome::AlreadyDispensed)
    }
}

impl<S: RecordStore> Dispensary<S> {
    /// Fulfill a prescription: decrement stock for every line and mark
    /// the prescription `Dispensed`, all-or-nothing.
    ///
    /// The operation runs in two phases under the prescription's lock
    /// and the locks of every referenced medication: first every line is
    /// checked against current stock; only if all checks pass does every
    /// decrement and the status change commit as one batch. A line
    /// whose medication is not in the catalog has nothing to decrement
    /// and is skipped, matching the soft coupling at creation time.
    ///
    /// Dispensing an already-dispensed prescription returns
    /// `AlreadyDispensed` without touching stock, so client retries
    /// cannot double-deduct.
    pub fn dispense(&self, prescription_id: &str) -> Result<DispenseOutcome, DispensaryError> {
        let _prescription_guard =
            self.lock_all(vec![Self::record_key::<Prescription>(prescription_id)])?;

        let found = match self.store().records::<Prescription>().get(prescription_id)? {
            Some(found) => found,
            None => return Err(DispensaryError::not_found("prescription", prescription_id)),
        };
        let mut prescription = found.data;
        let prescription_version = found.version;

        if prescription.is_dispensed() {
            debug!("prescription {} already dispensed, nothing to do", prescription_id);
            return Ok(DispenseOutcome::AlreadyDispensed);
        }

        // Aggregate required units per medication, in first-seen order,
        // so two lines naming the same medication must jointly fit the
        // stock.
        let mut requirements: Vec<(String, u32)> = Vec::new();
        for line in &prescription.lines {
            match requirements
                .iter_mut()
                .find(|(id, _)| id == &line.medication_id)
            {
                Some((_, required)) => *required += line.quantity,
                None => requirements.push((line.medication_id.clone(), line.quantity)),
            }
        }

        let _medication_guard = self.lock_all(
            requirements
                .iter()
                .map(|(id, _)| Self::record_key::<Medication>(id))
                .collect(),
        )?;

        let medications = self.store().records::<Medication>();
        let mut to_decrement: Vec<(Versioned<Medication>, u32)> = Vec::new();
        for (medication_id, required) in &requirements {
            match medications.get(medication_id)? {
                Some(found_medication) => {
                    if !found_medication.data.can_fill(*required) {
                        return Err(DispensaryError::InsufficientStock {
                            medication_id: medication_id.clone(),
                            name: found_medication.data.name.clone(),
                            required: *required,
                            available: found_medication.data.stock,
                        });
                    }
                    to_decrement.push((found_medication, *required));
                }
                None => {
                    warn!(
                        "medication {} on prescription {} is not in the catalog, skipping its lines",
                        medication_id, prescription_id
                    );
                }
            }
        }

        let mut batch = WriteBatch::new();
        for (mut found_medication, required) in to_decrement {
            found_medication.data.stock -= required;
            batch.update(&found_medication.data, found_medication.version)?;
        }
        prescription.status = PrescriptionStatus::Dispensed;
        batch.update(&prescription, prescription_version)?;

        self.store().apply(batch)?;

        info!(
            "prescription {} dispensed ({} lines)",
            prescription_id,
            prescription.lines.len()
        );
        self.events().emit(topics::PRESCRIPTION_DISPENSED, &prescription);

        Ok(DispenseOutcome::Dispensed)
    }
}
