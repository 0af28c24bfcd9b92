//! Consultation notes flowing into alert evaluation.

use clinical_alerts_consult::{
    parse_consultation_output, structure_consultation, KeywordRecognizer, SidecarTranscriber,
};
use clinical_alerts_core::{generate_contextual_alert_texts, PatientRecord};

#[test]
fn test_notes_do_not_change_alerts() {
    let patient = PatientRecord::new()
        .with_medications(["warfarin", "amiodarone"])
        .with_age(70);
    let baseline = generate_contextual_alert_texts(&patient);

    let consultation = parse_consultation_output(
        r#"{"transcript":"AF on anticoagulation","diagnoses":["atrial fibrillation"],"treatment_plans":["anticoagulation"],"key_elements":["warfarin"]}"#,
    )
    .unwrap();
    let annotated = consultation.attach_to(patient);

    assert!(annotated.clinical_notes.is_some());
    assert_eq!(generate_contextual_alert_texts(&annotated), baseline);
}

#[test]
fn test_sidecar_pipeline_roundtrips_through_patient_json() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("consultation.wav");
    std::fs::write(&audio, b"RIFF").unwrap();
    std::fs::write(
        dir.path().join("consultation.txt"),
        "Known hypertension. Plan: blood test and dose reduction of metformin.",
    )
    .unwrap();

    let consultation =
        structure_consultation(&SidecarTranscriber, &KeywordRecognizer::new(), &audio).unwrap();

    assert_eq!(consultation.diagnoses, vec!["hypertension"]);
    assert_eq!(consultation.treatment_plans, vec!["blood test", "dose reduction"]);
    assert_eq!(consultation.key_elements, vec!["metformin"]);

    let patient = consultation.attach_to(PatientRecord::new().with_medications(["metformin"]));
    let json = serde_json::to_string(&patient).unwrap();
    let reloaded = PatientRecord::from_json(&json).unwrap();

    assert_eq!(reloaded, patient);
}

#[test]
fn test_unintelligible_audio_gives_empty_notes() {
    let dir = tempfile::tempdir().unwrap();
    let audio = dir.path().join("silent.wav");
    std::fs::write(&audio, b"RIFF").unwrap();

    let consultation =
        structure_consultation(&SidecarTranscriber, &KeywordRecognizer::new(), &audio).unwrap();

    assert!(consultation.transcript.is_empty());
    assert!(consultation.diagnoses.is_empty());
}
