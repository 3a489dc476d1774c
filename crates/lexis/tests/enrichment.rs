use chrono::{TimeZone, Utc};
use lexis::detector::{Detect, DetectError};
use lexis::enrichment::{enrich, OwnerSnapshot, RepoSnapshot};
use lexis::profile::LanguageScore;

/// Scores whatever marker word it finds in the text, so each of the three
/// text fields can carry a distinguishable profile.
struct MarkerDetector;

impl Detect for MarkerDetector {
  fn detect(&self, text: &str) -> Result<Vec<LanguageScore>, DetectError> {
    if text.contains("README") {
      Ok(vec![LanguageScore::new("en", 0.9), LanguageScore::new("de", 0.2)])
    } else if text.contains("DESCRIPTION") {
      Ok(vec![LanguageScore::new("fr", 0.7)])
    } else if text.contains("BIO") {
      Ok(vec![LanguageScore::new("ja", 0.8)])
    } else {
      Err(DetectError::unscoreable("no marker"))
    }
  }
}

fn snapshot() -> RepoSnapshot {
  RepoSnapshot {
    id: 4242,
    full_name: "octocat/hello-world".to_string(),
    description: Some("DESCRIPTION text".to_string()),
    readme: Some("README text".to_string()),
    language: Some("Rust".to_string()),
    owner: OwnerSnapshot {
      login: "octocat".to_string(),
      name: Some("The Octocat".to_string()),
      bio: Some("BIO text".to_string()),
      company: Some("GitHub".to_string()),
      location: Some("San Francisco".to_string()),
      public_repos: Some(8),
      contributions: None,
      followers: Some(4000),
      following: Some(9),
    },
    stargazers_count: 1500,
    watchers_count: 1500,
    forks_count: 300,
    created_at: Utc.with_ymd_and_hms(2016, 2, 29, 12, 0, 0).unwrap(),
  }
}

#[test]
fn derived_fields_come_from_the_readme_profile() {
  let record = enrich(&MarkerDetector, &snapshot());

  assert_eq!(record.main_lang, "en");
  let englishness = record.readme_englishness.unwrap();
  assert!((englishness - 0.9 / (0.9 + 0.2)).abs() < 1e-9);
}

#[test]
fn three_profiles_are_independent() {
  let record = enrich(&MarkerDetector, &snapshot());

  assert_eq!(record.readme_human_languages.len(), 2);
  assert_eq!(record.description_human_languages, vec![LanguageScore::new("fr", 0.7)]);
  assert_eq!(record.owner.bio_lang, vec![LanguageScore::new("ja", 0.8)]);
}

#[test]
fn pass_through_fields_are_copied_verbatim() {
  let snap = snapshot();
  let record = enrich(&MarkerDetector, &snap);

  assert_eq!(record.id, snap.id);
  assert_eq!(record.full_name, snap.full_name);
  assert_eq!(record.language, snap.language);
  assert_eq!(record.stargazers_count, snap.stargazers_count);
  assert_eq!(record.watchers_count, snap.watchers_count);
  assert_eq!(record.forks_count, snap.forks_count);
  assert_eq!(record.created_at, snap.created_at);
  assert_eq!(record.owner.login, snap.owner.login);
  assert_eq!(record.owner.name, snap.owner.name);
  assert_eq!(record.owner.company, snap.owner.company);
  assert_eq!(record.owner.location, snap.owner.location);
  assert_eq!(record.owner.public_repos, snap.owner.public_repos);
  assert_eq!(record.owner.followers, snap.owner.followers);
  assert_eq!(record.owner.following, snap.owner.following);
}

#[test]
fn missing_readme_degrades_instead_of_failing() {
  let mut snap = snapshot();
  snap.readme = None;

  let record = enrich(&MarkerDetector, &snap);

  assert!(record.readme_human_languages.is_empty());
  assert_eq!(record.main_lang, "");
  assert_eq!(record.readme_englishness, None);
  // The other profiles are unaffected
  assert!(!record.description_human_languages.is_empty());
}

#[test]
fn fully_bare_snapshot_still_produces_a_record() {
  let mut snap = snapshot();
  snap.readme = None;
  snap.description = None;
  snap.owner.bio = None;

  let record = enrich(&MarkerDetector, &snap);

  assert!(record.readme_human_languages.is_empty());
  assert!(record.description_human_languages.is_empty());
  assert!(record.owner.bio_lang.is_empty());
  assert_eq!(record.full_name, "octocat/hello-world");
}

#[test]
fn enrichment_is_idempotent_for_a_fixed_snapshot() {
  let snap = snapshot();

  let first = enrich(&MarkerDetector, &snap);
  let second = enrich(&MarkerDetector, &snap);

  assert_eq!(first, second);
}

#[test]
fn record_serializes_with_null_englishness_when_absent() {
  let mut snap = snapshot();
  snap.readme = None;

  let record = enrich(&MarkerDetector, &snap);
  let json = serde_json::to_value(&record).unwrap();

  assert!(json["readme_englishness"].is_null());
  assert_eq!(json["main_lang"], "");
  assert_eq!(json["description_human_languages"][0]["fr"], 0.7);
}
