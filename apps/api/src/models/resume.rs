//! Resume data model: the structured form every pipeline stage operates on.
//!
//! The extractor stage produces this shape from raw resume text; the executor
//! stage rewrites `summary` and `experience` on it. Field names match the
//! JSON contract consumed by the frontend, so no renames are needed.

use serde::{Deserialize, Deserializer, Serialize};

/// A full structured resume.
///
/// Models are instructed to use empty strings/arrays for anything missing
/// from the source text, but `null` leaks through often enough that the
/// sequence fields tolerate it explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Option<Education>,
}

/// One work-experience position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub period: String,
    /// Bullet points for the position. Never `null` after deserialization;
    /// an absent or null description becomes an empty list.
    #[serde(default, deserialize_with = "null_to_default")]
    pub description: Vec<String>,
}

/// Education block. The source schema carries a single entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub period: String,
}

/// Deserializes `null` as `T::default()`. Combined with `#[serde(default)]`
/// this covers both an absent key and an explicit null.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
