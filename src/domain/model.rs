use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Provider 回傳的原始 JSON 物件
pub type Document = serde_json::Map<String, serde_json::Value>;

/// A calendar date whose precision in the source may be partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInfo {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl DateInfo {
    pub const DEFAULT_DAY: u32 = 1;
    pub const DEFAULT_MONTH: u32 = 1;
    pub const DEFAULT_YEAR: i32 = 1970;

    /// Returns `None` when the parts do not form a real calendar date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub starts_at: Option<DateInfo>,
    pub ends_at: Option<DateInfo>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub authority: String,
    pub name: String,
    pub starts_at: Option<DateInfo>,
    pub ends_at: Option<DateInfo>,
    pub license_number: Option<String>,
    pub url: Option<String>,
    pub display_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree_name: Option<String>,
    pub field_of_study: Option<String>,
    pub starts_at: Option<DateInfo>,
    pub ends_at: Option<DateInfo>,
    pub description: Option<String>,
    pub school_linkedin_profile_url: Option<String>,
    pub logo_url: Option<String>,
    pub activities_and_societies: Option<String>,
    pub grade: Option<String>,
    pub school_facebook_profile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: Option<DateInfo>,
    pub ends_at: Option<DateInfo>,
    pub location: Option<String>,
    pub company_linkedin_profile_url: Option<String>,
    pub logo_url: Option<String>,
    pub company_facebook_profile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub title: String,
    pub activity_status: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub author: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarProfile {
    pub name: String,
    pub link: String,
    pub location: Option<String>,
    pub summary: Option<String>,
}

/// Normalized profile aggregate. Built once by
/// [`ProfileNormalizer`](crate::core::normalizer::ProfileNormalizer) and not
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub headline: String,
    pub summary: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub country_full_name: String,
    pub occupation: String,
    pub connections: i64,
    pub profile_pic_url: String,
    pub background_cover_image_url: String,
    pub public_identifier: String,
    pub follower_count: Option<i64>,

    pub certifications: Vec<Certification>,
    pub education: Vec<Education>,
    pub experiences: Vec<Experience>,
    pub activities: Vec<Activity>,
    pub projects: Vec<Project>,
    pub recommendations: Vec<Recommendation>,
    pub similarly_named_profiles: Vec<SimilarProfile>,

    // 未建模的欄位，原樣保留
    pub accomplishment_courses: Vec<serde_json::Value>,
    pub accomplishment_honors_awards: Vec<serde_json::Value>,
    pub accomplishment_organisations: Vec<serde_json::Value>,
    pub accomplishment_patents: Vec<serde_json::Value>,
    pub accomplishment_publications: Vec<serde_json::Value>,
    pub accomplishment_test_scores: Vec<serde_json::Value>,
    pub articles: Vec<serde_json::Value>,
    pub groups: Vec<serde_json::Value>,
    pub people_also_viewed: Vec<serde_json::Value>,
    pub volunteer_work: Vec<serde_json::Value>,
}

/// 一筆攤平後的表格資料，欄位順序即輸出順序
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRow {
    pub columns: Vec<(&'static str, String)>,
}

impl ProfileRow {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|(name, _)| *name).collect()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub profile: Profile,
    pub row: ProfileRow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_info_to_date() {
        let date = DateInfo {
            day: 15,
            month: 3,
            year: 2020,
        };
        assert_eq!(date.to_date(), NaiveDate::from_ymd_opt(2020, 3, 15));
    }

    #[test]
    fn test_date_info_invalid_calendar_date() {
        let date = DateInfo {
            day: 31,
            month: 2,
            year: 2021,
        };
        assert!(date.to_date().is_none());
    }
}
