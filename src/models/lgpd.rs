use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

/// A catalogued piece of personal data. `id` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalData {
    pub id: String,
    pub name: String,
    pub category: String,
    pub source: String,
    pub sensitivity: Sensitivity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Create body: a [`PersonalData`] before the server assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPersonalData {
    pub name: String,
    pub category: String,
    pub source: String,
    pub sensitivity: Sensitivity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Partial update. Absent fields are neither sent nor applied.
///
/// `description` has three states: `None` leaves it alone, `Some(None)` sends
/// `null` and clears it, `Some(Some(text))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDataPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<Sensitivity>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub description: Option<Option<String>>,
}

impl PersonalDataPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Keeps an explicit `null` distinct from a missing field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl PersonalData {
    /// Returns a copy with every field present in `patch` overwritten.
    pub fn patched(&self, patch: &PersonalDataPatch) -> Self {
        Self {
            id: self.id.clone(),
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            category: patch
                .category
                .clone()
                .unwrap_or_else(|| self.category.clone()),
            source: patch.source.clone().unwrap_or_else(|| self.source.clone()),
            sensitivity: patch.sensitivity.unwrap_or(self.sensitivity),
            description: match &patch.description {
                Some(description) => description.clone(),
                None => self.description.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    pub sensitivity: Sensitivity,
    pub include_context: bool,
    pub identify_patterns: bool,
    pub check_compliance: bool,
    pub generate_recommendations: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sensitivity: Sensitivity::Medium,
            include_context: true,
            identify_patterns: true,
            check_compliance: true,
            generate_recommendations: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StartAnalysisRequest<'a> {
    pub config: &'a AnalysisConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisTicket {
    pub analysis_id: String,
}

/// Set by the server only; the client never transitions it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AnalysisStatus {
    Completed,
    Processing,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    pub severity: Sensitivity,
    pub description: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub score: f64,
    #[serde(default)]
    pub issues: Vec<ComplianceIssue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,
    #[serde(default)]
    pub personal_data: Vec<PersonalData>,
    pub created_at: DateTime<Utc>,
    pub status: AnalysisStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ComplianceReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub config: AnalysisConfig,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
