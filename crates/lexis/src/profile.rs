use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

use crate::detector::Detect;

/// One detected language and its confidence.
///
/// Serializes as a single-key map (`{"en": 0.99}`) because that is the shape
/// the document index stores and downstream consumers query.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageScore {
  pub code: String,
  pub confidence: f64,
}

impl LanguageScore {
  pub fn new(code: impl Into<String>, confidence: f64) -> Self {
    Self { code: code.into(), confidence }
  }
}

impl Serialize for LanguageScore {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(&self.code, &self.confidence)?;
    map.end()
  }
}

impl<'de> Deserialize<'de> for LanguageScore {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct ScoreVisitor;

    impl<'de> Visitor<'de> for ScoreVisitor {
      type Value = LanguageScore;

      fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a single-entry map of language code to confidence")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let (code, confidence): (String, f64) =
          access.next_entry()?.ok_or_else(|| de::Error::invalid_length(0, &self))?;
        if access.next_entry::<String, f64>()?.is_some() {
          return Err(de::Error::custom("expected exactly one language entry"));
        }
        Ok(LanguageScore { code, confidence })
      }
    }

    deserializer.deserialize_map(ScoreVisitor)
  }
}

/// Ordered list of scores for one piece of text. Order is detector emission
/// order, not confidence order.
pub type LanguageProfile = Vec<LanguageScore>;

/// How [`englishness`] picks the English score when a malformed detector
/// emits duplicate `"en"` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnglishnessMode {
  /// First `"en"` entry in emission order, maximum for the non-English
  /// competitor. This asymmetry is the long-observed production behavior
  /// and stays the default so existing indexed scores remain comparable.
  #[default]
  Observed,
  /// Maximum on both sides.
  StrictMax,
}

/// Score `text` into a language profile.
///
/// Absent or empty text short-circuits to an empty profile without touching
/// the detector. A detector failure is absorbed here: one informational log
/// line, empty profile, never an error to the caller. Enrichment degrades
/// gracefully; it does not abort a whole repository because one text field
/// was unscoreable.
///
/// The returned profile keeps the detector's emission order. Nothing here
/// re-sorts, so downstream consumers that need confidence order must sort
/// themselves (as [`main_language`] and [`englishness`] do).
pub fn build_profile(detector: &dyn Detect, text: Option<&str>) -> LanguageProfile {
  let text = match text {
    Some(t) if !t.is_empty() => t,
    _ => return Vec::new(),
  };

  match detector.detect(text) {
    Ok(scores) => scores,
    Err(err) => {
      foghorn::info(&format!("could not detect languages: {err}"));
      Vec::new()
    }
  }
}

/// The highest-confidence language code in `profile`, or the empty string
/// for an empty profile.
///
/// Sorts a copy descending by confidence with a stable sort, so ties keep
/// the detector's emission order. That is the fixed tie-break.
pub fn main_language(profile: &[LanguageScore]) -> String {
  let mut sorted = profile.to_vec();
  sorted.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal));
  sorted.first().map(|score| score.code.clone()).unwrap_or_default()
}

/// How dominant English is over the strongest non-English competitor.
///
/// | English present? | non-English present? | result |
/// |---|---|---|
/// | no  | no  | `None` |
/// | yes | no  | `Some(1.0)` |
/// | no  | yes | `Some(0.0)` |
/// | yes | yes | `english / (english + top non-English)` |
pub fn englishness(profile: &[LanguageScore]) -> Option<f64> {
  englishness_with(profile, EnglishnessMode::Observed)
}

/// [`englishness`] with an explicit duplicate-entry policy.
pub fn englishness_with(profile: &[LanguageScore], mode: EnglishnessMode) -> Option<f64> {
  let (english, non_english): (Vec<&LanguageScore>, Vec<&LanguageScore>) =
    profile.iter().partition(|score| score.code == "en");

  match (english.is_empty(), non_english.is_empty()) {
    (true, true) => None,
    (false, true) => Some(1.0),
    (true, false) => Some(0.0),
    (false, false) => {
      let english_score = match mode {
        EnglishnessMode::Observed => english[0].confidence,
        EnglishnessMode::StrictMax => {
          english.iter().map(|score| score.confidence).fold(f64::NEG_INFINITY, f64::max)
        }
      };

      // The competitor is always the maximum; the profile itself is in
      // emission order, so this sort is required, not decorative.
      let mut competitors = non_english;
      competitors.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal));
      let top_non_english = competitors[0].confidence;

      Some(english_score / (english_score + top_non_english))
    }
  }
}
