use std::collections::BTreeMap;
use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::models::catalog;

/// Years of professional experience as offered by the intake form:
/// an integer 0–10 or the open-ended "10+".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Experience {
    Years(u8),
    TenPlus,
}

impl Default for Experience {
    fn default() -> Self {
        Self::Years(0)
    }
}

pub const MAX_LISTED_YEARS: u8 = 10;
const TEN_PLUS_LABEL: &str = "10+";

impl Experience {
    /// Returns `None` for values outside the 0–10 picker range.
    pub fn years(years: u8) -> Option<Self> {
        (years <= MAX_LISTED_YEARS).then_some(Self::Years(years))
    }

    pub fn level(&self) -> ExperienceLevel {
        match self {
            Self::Years(0..=2) => ExperienceLevel::Junior,
            Self::Years(3..=6) => ExperienceLevel::MidLevel,
            Self::Years(_) | Self::TenPlus => ExperienceLevel::Senior,
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Years(n) => write!(f, "{n}"),
            Self::TenPlus => f.write_str(TEN_PLUS_LABEL),
        }
    }
}

impl Serialize for Experience {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Years(n) => serializer.serialize_u8(*n),
            Self::TenPlus => serializer.serialize_str(TEN_PLUS_LABEL),
        }
    }
}

impl<'de> Deserialize<'de> for Experience {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Label(String),
        }

        let years = match Raw::deserialize(deserializer)? {
            Raw::Label(label) if label.trim() == TEN_PLUS_LABEL => return Ok(Self::TenPlus),
            Raw::Label(label) => label
                .trim()
                .parse::<u64>()
                .map_err(|_| de::Error::custom(format!("invalid experience value '{label}'")))?,
            Raw::Number(n) => n,
        };

        u8::try_from(years)
            .ok()
            .and_then(Self::years)
            .ok_or_else(|| {
                de::Error::custom(format!(
                    "experience must be between 0 and {MAX_LISTED_YEARS} or \"{TEN_PLUS_LABEL}\""
                ))
            })
    }
}

/// Seniority bucket used to pitch generated questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    Junior,
    MidLevel,
    Senior,
}

impl ExperienceLevel {
    pub fn category(&self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::MidLevel => "mid-level",
            Self::Senior => "senior",
        }
    }

    pub fn descriptor(&self) -> &'static str {
        match self {
            Self::Junior => "entry-level",
            Self::MidLevel => "intermediate",
            Self::Senior => "experienced",
        }
    }
}

/// Validated applicant profile collected in the basic-info step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub experience: Experience,
    pub position: String,
    pub location: Option<String>,
}

/// Raw basic-info form payload. Missing text fields arrive as empty strings
/// so they surface as field errors rather than body rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BasicInfoInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub experience: Experience,
    pub position: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TechCategory {
    Languages,
    Frontend,
    Backend,
    Databases,
    Cloud,
    Devops,
    Mobile,
    DataScience,
    Testing,
    Cms,
    Other,
}

impl TechCategory {
    pub const ALL: [TechCategory; 11] = [
        Self::Languages,
        Self::Frontend,
        Self::Backend,
        Self::Databases,
        Self::Cloud,
        Self::Devops,
        Self::Mobile,
        Self::DataScience,
        Self::Testing,
        Self::Cms,
        Self::Other,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Languages => "languages",
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Databases => "databases",
            Self::Cloud => "cloud",
            Self::Devops => "devops",
            Self::Mobile => "mobile",
            Self::DataScience => "data-science",
            Self::Testing => "testing",
            Self::Cms => "cms",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Languages => "Programming Languages",
            Self::Frontend => "Frontend Frameworks",
            Self::Backend => "Backend Frameworks",
            Self::Databases => "Databases",
            Self::Cloud => "Cloud Platforms",
            Self::Devops => "DevOps & Development Tools",
            Self::Mobile => "Mobile Development",
            Self::DataScience => "Data Science & Analytics",
            Self::Testing => "Testing Frameworks & Tools",
            Self::Cms => "CMS & E-commerce Platforms",
            Self::Other => "Other Technologies & Specializations",
        }
    }

    /// Picker options shown by the front end. Applicants may still send tags
    /// outside this list.
    pub fn suggested_options(&self) -> &'static [&'static str] {
        catalog::options_for(*self)
    }
}

/// Self-reported skills grouped by category plus a free-text note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechStackSelection {
    pub categories: BTreeMap<TechCategory, Vec<String>>,
    pub additional_skills: Option<String>,
}

impl TechStackSelection {
    /// Trims tags, drops blanks and repeated tags, removes empty categories
    /// and collapses a blank note to `None`.
    pub fn normalized(self) -> Self {
        let categories = self
            .categories
            .into_iter()
            .filter_map(|(category, tags)| {
                let mut cleaned: Vec<String> = Vec::with_capacity(tags.len());
                for tag in tags {
                    let tag = tag.trim();
                    if !tag.is_empty() && !cleaned.iter().any(|t| t == tag) {
                        cleaned.push(tag.to_string());
                    }
                }
                (!cleaned.is_empty()).then_some((category, cleaned))
            })
            .collect();

        let additional_skills = self
            .additional_skills
            .map(|note| note.trim().to_string())
            .filter(|note| !note.is_empty());

        Self {
            categories,
            additional_skills,
        }
    }

    pub fn tags(&self, category: TechCategory) -> &[String] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn tag_count(&self) -> usize {
        self.categories
            .values()
            .map(|tags| tags.iter().filter(|t| !t.trim().is_empty()).count())
            .sum()
    }

    pub fn has_additional_skills(&self) -> bool {
        self.additional_skills
            .as_deref()
            .is_some_and(|note| !note.trim().is_empty())
    }

    /// At least one tag or a non-blank additional-skills note.
    pub fn has_any_skill(&self) -> bool {
        self.tag_count() > 0 || self.has_additional_skills()
    }
}
