use crate::domain::model::{Profile, ProfileRow};
use crate::utils::error::Result;

pub const DEFAULT_TABLE_FILE: &str = "linkedin_profile_data.csv";

/// 將 Profile 攤平成單列表格資料
pub fn flatten_profile(profile: &Profile) -> Result<ProfileRow> {
    let columns = vec![
        ("First Name", profile.first_name.clone()),
        ("Last Name", profile.last_name.clone()),
        ("Full Name", profile.full_name.clone()),
        ("Headline", profile.headline.clone()),
        ("Summary", profile.summary.clone()),
        ("City", profile.city.clone()),
        ("State", profile.state.clone()),
        ("Country", profile.country.clone()),
        ("Country Full Name", profile.country_full_name.clone()),
        ("Occupation", profile.occupation.clone()),
        ("Connections", profile.connections.to_string()),
        ("Profile Pic URL", profile.profile_pic_url.clone()),
        (
            "Background Cover Image URL",
            profile.background_cover_image_url.clone(),
        ),
        ("Public Identifier", profile.public_identifier.clone()),
        (
            "Certifications",
            json_cell(profile.certifications.iter().map(|c| &c.name))?,
        ),
        (
            "Education",
            json_cell(profile.education.iter().map(|e| &e.school))?,
        ),
        (
            "Experiences",
            json_cell(profile.experiences.iter().map(|e| &e.company))?,
        ),
        (
            "Activities",
            json_cell(profile.activities.iter().map(|a| &a.title))?,
        ),
        (
            "Projects",
            json_cell(profile.projects.iter().map(|p| &p.title))?,
        ),
        (
            "Follower Count",
            profile
                .follower_count
                .map(|count| count.to_string())
                .unwrap_or_default(),
        ),
        (
            "Accomplishment Courses",
            json_cell(&profile.accomplishment_courses)?,
        ),
        (
            "Accomplishment Honors Awards",
            json_cell(&profile.accomplishment_honors_awards)?,
        ),
        (
            "Accomplishment Organisations",
            json_cell(&profile.accomplishment_organisations)?,
        ),
        (
            "Accomplishment Patents",
            json_cell(&profile.accomplishment_patents)?,
        ),
        (
            "Accomplishment Publications",
            json_cell(&profile.accomplishment_publications)?,
        ),
        (
            "Accomplishment Test Scores",
            json_cell(&profile.accomplishment_test_scores)?,
        ),
        ("Articles", json_cell(&profile.articles)?),
        ("Groups", json_cell(&profile.groups)?),
        ("People Also Viewed", json_cell(&profile.people_also_viewed)?),
        ("Volunteer Work", json_cell(&profile.volunteer_work)?),
    ];

    Ok(ProfileRow { columns })
}

fn json_cell<I>(items: I) -> Result<String>
where
    I: IntoIterator,
    I::Item: serde::Serialize,
{
    let values: Vec<I::Item> = items.into_iter().collect();
    Ok(serde_json::to_string(&values)?)
}

/// Appends `row` to an existing CSV table (or starts a new one when
/// `existing` is `None`) and returns the full file content.
///
/// The resulting header is the existing header followed by any columns of
/// `row` it did not have yet; cells a row does not provide are left empty.
pub fn append_row(existing: Option<&[u8]>, row: &ProfileRow) -> Result<Vec<u8>> {
    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    if let Some(data) = existing.filter(|data| !data.is_empty()) {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(data);
        headers = reader.headers()?.iter().map(str::to_string).collect();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
    }

    for name in row.headers() {
        if !headers.iter().any(|existing| existing == name) {
            headers.push(name.to_string());
        }
    }

    let new_row: Vec<String> = headers
        .iter()
        .map(|header| row.get(header).unwrap_or_default().to_string())
        .collect();
    rows.push(new_row);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&headers)?;
    for mut record in rows {
        record.resize(headers.len(), String::new());
        writer.write_record(&record)?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}
