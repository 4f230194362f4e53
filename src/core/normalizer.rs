//! Conversion of a raw provider document into the typed [`Profile`] aggregate.
//!
//! Every key is optional. A missing key, or one whose value is `null`, takes
//! the field's declared default: `""` for required strings, `None` for
//! optional fields and an empty `Vec` for sequences. A value that is present
//! but has the wrong JSON type is reported as
//! [`EtlError::DocumentShapeError`] with the path of the offending value.

use crate::domain::model::{
    Activity, Certification, DateInfo, Document, Education, Experience, Profile, Project,
    Recommendation, SimilarProfile,
};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

pub struct ProfileNormalizer;

impl ProfileNormalizer {
    pub fn normalize(document: &Document) -> Result<Profile> {
        let fields = Fields::root(document);

        Ok(Profile {
            first_name: fields.string("first_name")?,
            last_name: fields.string("last_name")?,
            full_name: fields.string("full_name")?,
            headline: fields.string("headline")?,
            summary: fields.string("summary")?,
            city: fields.string("city")?,
            state: fields.string("state")?,
            country: fields.string("country")?,
            country_full_name: fields.string("country_full_name")?,
            occupation: fields.string("occupation")?,
            connections: fields.opt_int::<i64>("connections")?.unwrap_or(0),
            profile_pic_url: fields.string("profile_pic_url")?,
            background_cover_image_url: fields.string("background_cover_image_url")?,
            public_identifier: fields.string("public_identifier")?,
            follower_count: fields.opt_int("follower_count")?,

            certifications: fields.entities("certifications", certification)?,
            education: fields.entities("education", education)?,
            experiences: fields.entities("experiences", experience)?,
            activities: fields.entities("activities", activity)?,
            // Provider 使用 accomplishment_projects 作為來源鍵
            projects: fields.entities("accomplishment_projects", project)?,
            recommendations: fields.entities("recommendations", recommendation)?,
            similarly_named_profiles: fields.entities("similarly_named_profiles", similar_profile)?,

            accomplishment_courses: fields.opaque("accomplishment_courses")?,
            accomplishment_honors_awards: fields.opaque("accomplishment_honors_awards")?,
            accomplishment_organisations: fields.opaque("accomplishment_organisations")?,
            accomplishment_patents: fields.opaque("accomplishment_patents")?,
            accomplishment_publications: fields.opaque("accomplishment_publications")?,
            accomplishment_test_scores: fields.opaque("accomplishment_test_scores")?,
            articles: fields.opaque("articles")?,
            groups: fields.opaque("groups")?,
            people_also_viewed: fields.opaque("people_also_viewed")?,
            volunteer_work: fields.opaque("volunteer_work")?,
        })
    }

    /// Normalizes a decoded response body, which must be a JSON object.
    pub fn normalize_value(value: &Value) -> Result<Profile> {
        match value {
            Value::Object(document) => Self::normalize(document),
            other => Err(EtlError::shape("$", "object", other)),
        }
    }
}

fn project(fields: &Fields) -> Result<Project> {
    Ok(Project {
        title: fields.string("title")?,
        description: fields.string("description")?,
        starts_at: fields.date("starts_at")?,
        ends_at: fields.date("ends_at")?,
        url: fields.opt_string("url")?,
    })
}

fn certification(fields: &Fields) -> Result<Certification> {
    Ok(Certification {
        authority: fields.string("authority")?,
        name: fields.string("name")?,
        starts_at: fields.date("starts_at")?,
        ends_at: fields.date("ends_at")?,
        license_number: fields.opt_string("license_number")?,
        url: fields.opt_string("url")?,
        display_source: fields.opt_string("display_source")?,
    })
}

fn education(fields: &Fields) -> Result<Education> {
    Ok(Education {
        school: fields.string("school")?,
        degree_name: fields.opt_string("degree_name")?,
        field_of_study: fields.opt_string("field_of_study")?,
        starts_at: fields.date("starts_at")?,
        ends_at: fields.date("ends_at")?,
        description: fields.opt_string("description")?,
        school_linkedin_profile_url: fields.opt_string("school_linkedin_profile_url")?,
        logo_url: fields.opt_string("logo_url")?,
        activities_and_societies: fields.opt_string("activities_and_societies")?,
        grade: fields.opt_string("grade")?,
        school_facebook_profile_url: fields.opt_string("school_facebook_profile_url")?,
    })
}

fn experience(fields: &Fields) -> Result<Experience> {
    Ok(Experience {
        company: fields.string("company")?,
        title: fields.string("title")?,
        description: fields.opt_string("description")?,
        starts_at: fields.date("starts_at")?,
        ends_at: fields.date("ends_at")?,
        location: fields.opt_string("location")?,
        company_linkedin_profile_url: fields.opt_string("company_linkedin_profile_url")?,
        logo_url: fields.opt_string("logo_url")?,
        company_facebook_profile_url: fields.opt_string("company_facebook_profile_url")?,
    })
}

fn activity(fields: &Fields) -> Result<Activity> {
    Ok(Activity {
        title: fields.string("title")?,
        activity_status: fields.string("activity_status")?,
        link: fields.string("link")?,
    })
}

fn recommendation(fields: &Fields) -> Result<Recommendation> {
    Ok(Recommendation {
        author: fields.string("author")?,
        text: fields.string("text")?,
    })
}

fn similar_profile(fields: &Fields) -> Result<SimilarProfile> {
    Ok(SimilarProfile {
        name: fields.string("name")?,
        link: fields.string("link")?,
        location: fields.opt_string("location")?,
        summary: fields.opt_string("summary")?,
    })
}

/// A view over one JSON object that knows its own location in the document,
/// so shape errors can point at the exact value.
struct Fields<'a> {
    doc: &'a Document,
    path: String,
}

impl<'a> Fields<'a> {
    fn root(doc: &'a Document) -> Self {
        Self {
            doc,
            path: String::new(),
        }
    }

    fn path_of(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    // null 與缺少的鍵視為相同
    fn present(&self, key: &str) -> Option<&'a Value> {
        self.doc.get(key).filter(|value| !value.is_null())
    }

    fn string(&self, key: &str) -> Result<String> {
        Ok(self.opt_string(key)?.unwrap_or_default())
    }

    fn opt_string(&self, key: &str) -> Result<Option<String>> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(other) => Err(EtlError::shape(&self.path_of(key), "string", other)),
        }
    }

    fn opt_int<T: TryFrom<i64>>(&self, key: &str) -> Result<Option<T>> {
        let Some(value) = self.present(key) else {
            return Ok(None);
        };
        let in_range = value.as_i64().and_then(|number| T::try_from(number).ok());
        match in_range {
            Some(number) => Ok(Some(number)),
            // 整數但超出目標型別範圍
            None if value.is_u64() || value.is_i64() => Err(EtlError::shape(
                &self.path_of(key),
                "integer in range",
                value,
            )),
            None => Err(EtlError::shape(&self.path_of(key), "integer", value)),
        }
    }

    fn date(&self, key: &str) -> Result<Option<DateInfo>> {
        let Some(value) = self.present(key) else {
            return Ok(None);
        };
        let Value::Object(parts) = value else {
            return Err(EtlError::shape(&self.path_of(key), "object", value));
        };
        if parts.is_empty() {
            return Ok(None);
        }

        let parts = Fields {
            doc: parts,
            path: self.path_of(key),
        };
        Ok(Some(DateInfo {
            day: parts.opt_int("day")?.unwrap_or(DateInfo::DEFAULT_DAY),
            month: parts.opt_int("month")?.unwrap_or(DateInfo::DEFAULT_MONTH),
            year: parts.opt_int("year")?.unwrap_or(DateInfo::DEFAULT_YEAR),
        }))
    }

    fn entities<T>(&self, key: &str, build: fn(&Fields) -> Result<T>) -> Result<Vec<T>> {
        let Some(value) = self.present(key) else {
            return Ok(Vec::new());
        };
        let Value::Array(items) = value else {
            return Err(EtlError::shape(&self.path_of(key), "array", value));
        };

        let base = self.path_of(key);
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let path = format!("{}[{}]", base, index);
                match item {
                    Value::Object(doc) => build(&Fields { doc, path }),
                    other => Err(EtlError::shape(&path, "object", other)),
                }
            })
            .collect()
    }

    fn opaque(&self, key: &str) -> Result<Vec<Value>> {
        match self.present(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(other) => Err(EtlError::shape(&self.path_of(key), "array", other)),
        }
    }
}
