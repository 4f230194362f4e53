use profile_etl::{DateInfo, Document, EtlError, ProfileNormalizer};
use serde_json::json;

fn provider_response() -> serde_json::Value {
    json!({
        "public_identifier": "janedoe",
        "profile_pic_url": "https://media.example.com/jane.jpg",
        "background_cover_image_url": null,
        "first_name": "Jane",
        "last_name": "Doe",
        "full_name": "Jane Doe",
        "follower_count": 2048,
        "occupation": "Staff Engineer at Acme",
        "headline": "Building data platforms",
        "summary": "Ten years of distributed systems.",
        "country": "TW",
        "country_full_name": "Taiwan",
        "city": "Taipei",
        "state": "Taipei City",
        "connections": 500,
        "experiences": [
            {
                "starts_at": {"day": 1, "month": 4, "year": 2019},
                "ends_at": null,
                "company": "Acme",
                "company_linkedin_profile_url": "https://www.linkedin.com/company/acme",
                "title": "Staff Engineer",
                "description": null,
                "location": "Taipei",
                "logo_url": "https://media.example.com/acme.png"
            },
            {
                "starts_at": {"year": 2014},
                "ends_at": {"month": 3, "year": 2019},
                "company": "Initech",
                "title": "Engineer"
            }
        ],
        "education": [
            {
                "starts_at": {"day": 1, "month": 9, "year": 2008},
                "ends_at": {"day": 30, "month": 6, "year": 2012},
                "field_of_study": "Computer Science",
                "degree_name": "BSc",
                "school": "National Taiwan University",
                "grade": null,
                "activities_and_societies": "Robotics club"
            }
        ],
        "accomplishment_projects": [
            {"title": "Stream Processor", "description": "Exactly-once pipelines", "url": "https://example.com/sp"}
        ],
        "certifications": [
            {"name": "CKA", "authority": "CNCF", "license_number": "LF-123", "display_source": "cncf.io"}
        ],
        "activities": [
            {"title": "Talk at RustCon", "link": "https://example.com/talk", "activity_status": "Shared by Jane"}
        ],
        "recommendations": [
            {"author": "John Smith", "text": "Great engineer."}
        ],
        "similarly_named_profiles": [
            {"name": "Jane Doe", "link": "https://www.linkedin.com/in/janedoe2", "summary": "Designer", "location": "Berlin"}
        ],
        "accomplishment_courses": [{"name": "Compilers", "number": "CS143"}],
        "accomplishment_publications": [],
        "articles": [],
        "groups": [{"name": "Rust Taiwan", "url": "https://example.com/g"}],
        "people_also_viewed": [{"name": "Someone", "link": "https://example.com/p"}],
        "volunteer_work": null,
        "skills": ["rust", "kafka"],
        "personal_emails": []
    })
}

#[test]
fn test_normalize_full_provider_response() {
    let profile = ProfileNormalizer::normalize_value(&provider_response()).unwrap();

    assert_eq!(profile.full_name, "Jane Doe");
    assert_eq!(profile.public_identifier, "janedoe");
    assert_eq!(profile.background_cover_image_url, "");
    assert_eq!(profile.connections, 500);
    assert_eq!(profile.follower_count, Some(2048));
    assert_eq!(profile.city, "Taipei");

    assert_eq!(profile.experiences.len(), 2);
    assert_eq!(profile.experiences[0].company, "Acme");
    assert_eq!(profile.experiences[0].ends_at, None);
    assert_eq!(profile.experiences[0].description, None);
    assert_eq!(profile.experiences[0].location.as_deref(), Some("Taipei"));
    assert_eq!(profile.experiences[0].company_facebook_profile_url, None);
    assert_eq!(
        profile.experiences[1].starts_at,
        Some(DateInfo {
            day: 1,
            month: 1,
            year: 2014
        })
    );
    assert_eq!(
        profile.experiences[1].ends_at,
        Some(DateInfo {
            day: 1,
            month: 3,
            year: 2019
        })
    );

    let education = &profile.education[0];
    assert_eq!(education.school, "National Taiwan University");
    assert_eq!(education.degree_name.as_deref(), Some("BSc"));
    assert_eq!(education.grade, None);
    assert_eq!(
        education.ends_at.and_then(|d| d.to_date()),
        chrono::NaiveDate::from_ymd_opt(2012, 6, 30)
    );

    assert_eq!(profile.projects[0].title, "Stream Processor");
    assert_eq!(profile.projects[0].url.as_deref(), Some("https://example.com/sp"));
    assert_eq!(profile.certifications[0].license_number.as_deref(), Some("LF-123"));
    assert_eq!(profile.certifications[0].url, None);
    assert_eq!(profile.activities[0].activity_status, "Shared by Jane");
    assert_eq!(profile.recommendations[0].author, "John Smith");
    assert_eq!(
        profile.similarly_named_profiles[0].location.as_deref(),
        Some("Berlin")
    );

    assert_eq!(profile.accomplishment_courses.len(), 1);
    assert_eq!(profile.groups[0]["name"], "Rust Taiwan");
    assert!(profile.accomplishment_publications.is_empty());
    assert!(profile.accomplishment_patents.is_empty());
    assert!(profile.volunteer_work.is_empty());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let mut document = Document::new();
    document.insert("skills".to_string(), json!(["rust"]));
    document.insert("inferred_salary".to_string(), json!({"min": 1}));

    let with_unknown = ProfileNormalizer::normalize(&document).unwrap();
    let empty = ProfileNormalizer::normalize(&Document::new()).unwrap();

    assert_eq!(with_unknown, empty);
}

#[test]
fn test_profile_serializes_with_target_field_names() {
    let profile = ProfileNormalizer::normalize_value(&provider_response()).unwrap();
    let value = serde_json::to_value(&profile).unwrap();

    assert!(value.get("projects").is_some());
    assert!(value.get("accomplishment_projects").is_none());

    let restored: profile_etl::Profile = serde_json::from_value(value).unwrap();
    assert_eq!(restored, profile);
}

#[test]
fn test_entity_that_is_not_an_object_is_rejected() {
    let err = ProfileNormalizer::normalize_value(&json!({
        "recommendations": [{"author": "A", "text": "B"}, "plain text"]
    }))
    .unwrap_err();

    match err {
        EtlError::DocumentShapeError { path, expected, found } => {
            assert_eq!(path, "recommendations[1]");
            assert_eq!(expected, "object");
            assert_eq!(found, "string");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_fractional_connections_are_rejected() {
    let err = ProfileNormalizer::normalize_value(&json!({"connections": 12.5})).unwrap_err();
    assert!(matches!(
        err,
        EtlError::DocumentShapeError { ref path, found: "number", .. } if path == "connections"
    ));
}
