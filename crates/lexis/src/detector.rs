use lingua::LanguageDetectorBuilder;
use thiserror::Error;

use crate::profile::LanguageScore;

/// Detection backends below this confidence are noise, not signal. Mirrors
/// the plausible-language cutoff of the trigram detectors this replaces.
const MIN_CONFIDENCE: f64 = 0.01;

#[derive(Error, Debug)]
pub enum DetectError {
  #[error("no scoreable features in text: {reason}")]
  Unscoreable { reason: String },

  #[error("detector backend failed: {message}")]
  Backend { message: String },
}

impl DetectError {
  pub fn unscoreable(reason: impl Into<String>) -> Self {
    Self::Unscoreable { reason: reason.into() }
  }

  pub fn backend(message: impl Into<String>) -> Self {
    Self::Backend { message: message.into() }
  }
}

/// A language detector: raw text in, ranked (code, confidence) pairs out.
///
/// No ordering contract is guaranteed by the trait itself, confidences live
/// in [0, 1] and need not sum to 1, and implementations are allowed to fail
/// on unscoreable input. Callers that must not abort go through
/// [`crate::profile::build_profile`], which absorbs failures.
pub trait Detect: Send + Sync {
  fn detect(&self, text: &str) -> Result<Vec<LanguageScore>, DetectError>;
}

/// Lingua-backed detector.
///
/// Chosen for determinism: lingua's statistical model carries no random
/// seeding, so identical text always yields identical confidence values.
/// Emission order is lingua's, which is descending by confidence.
pub struct LinguaDetector {
  detector: lingua::LanguageDetector,
}

impl LinguaDetector {
  pub fn new() -> Self {
    let detector = LanguageDetectorBuilder::from_all_spoken_languages().build();
    Self { detector }
  }
}

impl Default for LinguaDetector {
  fn default() -> Self {
    Self::new()
  }
}

impl Detect for LinguaDetector {
  fn detect(&self, text: &str) -> Result<Vec<LanguageScore>, DetectError> {
    if !text.chars().any(char::is_alphabetic) {
      return Err(DetectError::unscoreable("no alphabetic characters"));
    }

    let ranked = self.detector.compute_language_confidence_values(text);

    Ok(
      ranked
        .into_iter()
        .filter(|(_, confidence)| *confidence >= MIN_CONFIDENCE)
        .map(|(language, confidence)| LanguageScore {
          code: language.iso_code_639_1().to_string().to_lowercase(),
          confidence,
        })
        .collect(),
    )
  }
}
