//! Prescription creation: validation, the patient status cascade, and
//! the denormalized line snapshot.

mod support;

use std::thread;
use std::time::Duration;

use dispensary::{
    DispensaryError, MedicationUpdate, PatientStatus, PrescriptionStatus,
};
use support::{dispensary, draft, line, patient};

#[test]
fn creating_a_prescription_completes_the_patient() {
    let pharmacy = dispensary();
    let registered = pharmacy
        .register_patient(patient("P001", "Zhang San"))
        .unwrap();
    assert_eq!(registered.status, PatientStatus::Pending);

    pharmacy
        .create_prescription(draft(
            "RX1",
            "P001",
            vec![line("M001", "Amoxicillin Capsules", 2)],
        ))
        .unwrap();

    assert_eq!(
        pharmacy.get_patient("P001").unwrap().status,
        PatientStatus::Completed
    );
}

#[test]
fn cascade_is_skipped_for_an_unknown_patient() {
    let pharmacy = dispensary();

    let prescription = pharmacy
        .create_prescription(draft(
            "RX1",
            "P-EXTERNAL",
            vec![line("M001", "Amoxicillin Capsules", 2)],
        ))
        .unwrap();

    assert_eq!(prescription.status, PrescriptionStatus::Issued);
    assert_eq!(pharmacy.get_prescription("RX1").unwrap().id, "RX1");
}

#[test]
fn duplicate_prescription_id_is_rejected() {
    let pharmacy = dispensary();
    pharmacy
        .create_prescription(draft(
            "RX1",
            "P001",
            vec![line("M001", "Amoxicillin Capsules", 2)],
        ))
        .unwrap();

    let err = pharmacy
        .create_prescription(draft(
            "RX1",
            "P002",
            vec![line("M003", "Lianhua Qingwen Capsules", 1)],
        ))
        .unwrap_err();

    assert!(matches!(
        err,
        DispensaryError::DuplicateId { ref id } if id == "RX1"
    ));
}

#[test]
fn empty_line_list_is_rejected_before_any_write() {
    let pharmacy = dispensary();

    let err = pharmacy
        .create_prescription(draft("RX1", "P001", vec![]))
        .unwrap_err();

    assert!(matches!(err, DispensaryError::InvalidInput { .. }));
    assert!(pharmacy.get_prescription("RX1").is_err());
}

#[test]
fn zero_quantity_line_is_rejected() {
    let pharmacy = dispensary();
    pharmacy
        .register_patient(patient("P001", "Zhang San"))
        .unwrap();

    let err = pharmacy
        .create_prescription(draft(
            "RX1",
            "P001",
            vec![
                line("M001", "Amoxicillin Capsules", 2),
                line("M002", "Ibuprofen Sustained-Release Capsules", 0),
            ],
        ))
        .unwrap_err();

    assert!(matches!(err, DispensaryError::InvalidInput { .. }));
    // The rejection had no side effects at all.
    assert!(pharmacy.get_prescription("RX1").is_err());
    assert_eq!(
        pharmacy.get_patient("P001").unwrap().status,
        PatientStatus::Pending
    );
}

#[test]
fn no_stock_check_happens_at_creation_time() {
    let pharmacy = dispensary();

    // 200 units of M004 against a stock of 12: creation still succeeds.
    let prescription = pharmacy
        .create_prescription(draft(
            "RX1",
            "P001",
            vec![line("M004", "Calcium Gluconate Oral Solution", 200)],
        ))
        .unwrap();

    assert_eq!(prescription.lines[0].quantity, 200);
    assert_eq!(pharmacy.get_medication("M004").unwrap().stock, 12);
}

#[test]
fn lines_round_trip_with_their_captured_names() {
    let pharmacy = dispensary();
    pharmacy
        .create_prescription(draft(
            "RX1",
            "P001",
            vec![
                line("M001", "Amoxicillin Capsules", 2),
                line("M003", "Lianhua Qingwen Capsules", 1),
                line("M007", "Metformin Tablets", 3),
            ],
        ))
        .unwrap();

    // Rename a medication in the catalog after the fact.
    pharmacy
        .update_medication(
            "M001",
            MedicationUpdate {
                name: Some("Amoxicillin 500 Capsules".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(
        pharmacy.get_medication("M001").unwrap().name,
        "Amoxicillin 500 Capsules"
    );

    let prescription = pharmacy.get_prescription("RX1").unwrap();
    assert_eq!(prescription.lines.len(), 3);
    assert_eq!(prescription.lines[0].medication_id, "M001");
    // The line keeps the name captured at creation time.
    assert_eq!(prescription.lines[0].name, "Amoxicillin Capsules");
    assert_eq!(prescription.lines[1].name, "Lianhua Qingwen Capsules");
    assert_eq!(prescription.lines[2].quantity, 3);
}

#[test]
fn created_prescriptions_default_to_issued() {
    let pharmacy = dispensary();
    let prescription = pharmacy
        .create_prescription(draft(
            "RX1",
            "P001",
            vec![line("M001", "Amoxicillin Capsules", 2)],
        ))
        .unwrap();
    assert_eq!(prescription.status, PrescriptionStatus::Issued);
}

#[test]
fn prescriptions_list_newest_first() {
    let pharmacy = dispensary();
    pharmacy
        .create_prescription(draft(
            "RX1",
            "P001",
            vec![line("M001", "Amoxicillin Capsules", 2)],
        ))
        .unwrap();
    thread::sleep(Duration::from_millis(5));
    pharmacy
        .create_prescription(draft(
            "RX2",
            "P002",
            vec![line("M003", "Lianhua Qingwen Capsules", 1)],
        ))
        .unwrap();

    let listed = pharmacy.list_prescriptions().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, "RX2");
    assert_eq!(listed[1].id, "RX1");
}

#[test]
fn creating_for_an_already_completed_patient_is_fine() {
    let pharmacy = dispensary();
    pharmacy
        .register_patient(patient("P001", "Zhang San"))
        .unwrap();

    pharmacy
        .create_prescription(draft(
            "RX1",
            "P001",
            vec![line("M001", "Amoxicillin Capsules", 2)],
        ))
        .unwrap();
    pharmacy
        .create_prescription(draft(
            "RX2",
            "P001",
            vec![line("M003", "Lianhua Qingwen Capsules", 1)],
        ))
        .unwrap();

    assert_eq!(
        pharmacy.get_patient("P001").unwrap().status,
        PatientStatus::Completed
    );
    assert_eq!(pharmacy.list_prescriptions().unwrap().len(), 2);
}
