use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detector::Detect;
use crate::profile::{build_profile, englishness, main_language, LanguageProfile};

/// Point-in-time owner data as fetched from the hosting API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerSnapshot {
  pub login: String,
  pub name: Option<String>,
  pub bio: Option<String>,
  pub company: Option<String>,
  pub location: Option<String>,
  pub public_repos: Option<u64>,
  pub contributions: Option<u64>,
  pub followers: Option<u64>,
  pub following: Option<u64>,
}

/// Point-in-time repository data as fetched from the hosting API.
///
/// `readme` is already-decoded text; transport and base64 concerns belong to
/// the hosting client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSnapshot {
  pub id: u64,
  pub full_name: String,
  pub description: Option<String>,
  pub readme: Option<String>,
  /// Primary programming language as reported by the hosting platform.
  pub language: Option<String>,
  pub owner: OwnerSnapshot,
  pub stargazers_count: u64,
  pub watchers_count: u64,
  pub forks_count: u64,
  pub created_at: DateTime<Utc>,
}

/// Owner sub-record of an [`EnrichmentRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerRecord {
  pub login: String,
  pub name: Option<String>,
  pub bio_lang: LanguageProfile,
  pub company: Option<String>,
  pub location: Option<String>,
  pub public_repos: Option<u64>,
  pub contributions: Option<u64>,
  pub followers: Option<u64>,
  pub following: Option<u64>,
}

/// The document upserted into the search index, keyed by `id`.
///
/// Constructed fresh per repository, never mutated afterwards. A second
/// upsert with the same id overwrites the prior document wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentRecord {
  pub id: u64,
  pub full_name: String,
  pub readme_human_languages: LanguageProfile,
  /// `None` serializes as null: no language signal in the README at all.
  pub readme_englishness: Option<f64>,
  pub description_human_languages: LanguageProfile,
  pub main_lang: String,
  pub language: Option<String>,
  pub owner: OwnerRecord,
  pub stargazers_count: u64,
  pub watchers_count: u64,
  pub forks_count: u64,
  pub created_at: DateTime<Utc>,
}

/// Assemble one enrichment record from a repository snapshot.
///
/// Three profiles are built independently (README, description, owner bio);
/// the dominant language and the Englishness score both come from the README
/// profile. Missing text fields flow into the empty-profile path, so there
/// is no failure mode here beyond what the profile builder already absorbs.
pub fn enrich(detector: &dyn Detect, snapshot: &RepoSnapshot) -> EnrichmentRecord {
  let readme_profile = build_profile(detector, snapshot.readme.as_deref());
  let description_profile = build_profile(detector, snapshot.description.as_deref());
  let bio_profile = build_profile(detector, snapshot.owner.bio.as_deref());

  let main_lang = main_language(&readme_profile);
  let readme_englishness = englishness(&readme_profile);

  EnrichmentRecord {
    id: snapshot.id,
    full_name: snapshot.full_name.clone(),
    readme_human_languages: readme_profile,
    readme_englishness,
    description_human_languages: description_profile,
    main_lang,
    language: snapshot.language.clone(),
    owner: OwnerRecord {
      login: snapshot.owner.login.clone(),
      name: snapshot.owner.name.clone(),
      bio_lang: bio_profile,
      company: snapshot.owner.company.clone(),
      location: snapshot.owner.location.clone(),
      public_repos: snapshot.owner.public_repos,
      contributions: snapshot.owner.contributions,
      followers: snapshot.owner.followers,
      following: snapshot.owner.following,
    },
    stargazers_count: snapshot.stargazers_count,
    watchers_count: snapshot.watchers_count,
    forks_count: snapshot.forks_count,
    created_at: snapshot.created_at,
  }
}
