//! Inventory operations on the medication catalog.

use tracing::{debug, info};

use crate::domain::{Medication, MedicationUpdate};
use crate::events::topics;
use crate::store::{RecordStore, RecordsExt};
use crate::{Dispensary, DispensaryError};

impl<S: RecordStore> Dispensary<S> {
    /// Add a medication to the catalog.
    pub fn add_medication(&self, medication: Medication) -> Result<Medication, DispensaryError> {
        if medication.id.trim().is_empty() {
            return Err(DispensaryError::invalid_input(
                "medication id must not be blank",
            ));
        }

        let _guard = self.lock_all(vec![Self::record_key::<Medication>(&medication.id)])?;

        let medications = self.store().records::<Medication>();
        if medications.get(&medication.id)?.is_some() {
            return Err(DispensaryError::duplicate_id(medication.id));
        }

        medications.insert(&medication)?;
        info!("medication {} added to catalog", medication.id);
        Ok(medication)
    }

    /// Manually adjust stock by a signed delta (restock or correction).
    ///
    /// The result clamps at zero, so an over-large negative correction
    /// empties the shelf rather than going negative. Serialized against
    /// concurrent dispenses of the same medication.
    pub fn adjust_stock(&self, id: &str, delta: i64) -> Result<Medication, DispensaryError> {
        let _guard = self.lock_all(vec![Self::record_key::<Medication>(id)])?;

        let medications = self.store().records::<Medication>();
        let found = match medications.get(id)? {
            Some(found) => found,
            None => return Err(DispensaryError::not_found("medication", id)),
        };

        let mut medication = found.data;
        let adjusted = i64::from(medication.stock) + delta;
        medication.stock = u32::try_from(adjusted.max(0)).unwrap_or(u32::MAX);

        medications.update(&medication, found.version)?;

        debug!("stock of {} adjusted by {} to {}", id, delta, medication.stock);
        self.events().emit(topics::STOCK_ADJUSTED, &medication);

        Ok(medication)
    }

    /// Update a medication's descriptive fields (name, spec, unit,
    /// price, category). Never touches stock; prescription lines keep
    /// the name they captured at creation time.
    pub fn update_medication(
        &self,
        id: &str,
        update: MedicationUpdate,
    ) -> Result<Medication, DispensaryError> {
        let _guard = self.lock_all(vec![Self::record_key::<Medication>(id)])?;

        let medications = self.store().records::<Medication>();
        let found = match medications.get(id)? {
            Some(found) => found,
            None => return Err(DispensaryError::not_found("medication", id)),
        };

        let mut medication = found.data;
        update.apply_to(&mut medication);
        medications.update(&medication, found.version)?;

        Ok(medication)
    }

    /// Get a medication by id.
    pub fn get_medication(&self, id: &str) -> Result<Medication, DispensaryError> {
        match self.store().records::<Medication>().get(id)? {
            Some(found) => Ok(found.data),
            None => Err(DispensaryError::not_found("medication", id)),
        }
    }

    /// The full catalog, ordered by medication id.
    pub fn list_medications(&self) -> Result<Vec<Medication>, DispensaryError> {
        let mut medications: Vec<Medication> = self
            .store()
            .records::<Medication>()
            .all()?
            .into_iter()
            .map(|found| found.data)
            .collect();
        medications.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(medications)
    }
}
