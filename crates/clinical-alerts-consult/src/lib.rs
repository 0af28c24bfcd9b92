//! Consultation transcription and clinical-entity extraction.
//!
//! This crate sits at the edge of the alert engine: it turns recorded
//! consultations into structured notes that can ride along on a
//! [`clinical_alerts_core::PatientRecord`]. The alert checkers never read them.
//!
//! Real speech and NER services plug in through the [`Transcriber`] and
//! [`EntityRecognizer`] traits.

pub mod consultation;
pub mod recognizer;
pub mod transcription;

pub use consultation::*;
pub use recognizer::*;
pub use transcription::*;
