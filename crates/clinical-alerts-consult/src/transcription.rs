//! Speech-to-text boundary.

use std::path::Path;

use thiserror::Error;

/// Why a transcription service produced no text.
#[derive(Error, Debug)]
pub enum TranscriptionFailure {
    #[error("Speech was unintelligible")]
    Unintelligible,

    #[error("Transcription request failed: {0}")]
    Request(anyhow::Error),
}

/// Converts recorded consultation audio to text.
pub trait Transcriber {
    fn transcribe(&self, audio: &Path) -> Result<String, TranscriptionFailure>;
}

/// Returns a fixed transcript regardless of the audio (offline use and tests).
#[derive(Debug, Clone, Default)]
pub struct StaticTranscriber {
    transcript: String,
}

impl StaticTranscriber {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}

impl Transcriber for StaticTranscriber {
    fn transcribe(&self, _audio: &Path) -> Result<String, TranscriptionFailure> {
        Ok(self.transcript.clone())
    }
}

/// Reads a sidecar `.txt` transcript next to the audio file.
///
/// `visit.wav` is transcribed from `visit.txt`; a missing sidecar counts as
/// unintelligible audio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarTranscriber;

impl Transcriber for SidecarTranscriber {
    fn transcribe(&self, audio: &Path) -> Result<String, TranscriptionFailure> {
        let sidecar = audio.with_extension("txt");
        if !sidecar.exists() {
            return Err(TranscriptionFailure::Unintelligible);
        }
        std::fs::read_to_string(&sidecar)
            .map(|text| text.trim().to_string())
            .map_err(|e| TranscriptionFailure::Request(e.into()))
    }
}
