use crate::utils::error::{EtlError, Result};
use std::ops::RangeInclusive;
use std::path::{Component, Path};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> EtlError {
    EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Parses an `http`/`https` URL that names a host, such as the provider
/// endpoint or the profile being fetched.
pub fn validate_http_url(field_name: &str, value: &str) -> Result<Url> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "URL cannot be empty"));
    }

    let url = Url::parse(value)
        .map_err(|e| invalid(field_name, value, format!("Invalid URL format: {}", e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        let reason = format!("Unsupported URL scheme: {}", url.scheme());
        return Err(invalid(field_name, value, reason));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field_name, value, "URL has no host"));
    }

    Ok(url)
}

pub fn validate_output_dir(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

/// 表格檔必須是輸出目錄下的單一檔名，副檔名為 .csv
pub fn validate_table_file(field_name: &str, file: &str) -> Result<()> {
    let path = Path::new(file);

    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => {
            return Err(invalid(
                field_name,
                file,
                "Must be a plain file name inside the output directory",
            ))
        }
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(()),
        Some(ext) => Err(invalid(
            field_name,
            file,
            format!("Unsupported file extension: {}. Expected csv", ext),
        )),
        None => Err(invalid(field_name, file, "File name has no .csv extension")),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| EtlError::MissingConfigError {
        field: field_name.to_string(),
    })
}

/// Rejects blank values and `${VAR}` placeholders left behind when the
/// variable was not set.
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    if trimmed.starts_with("${") && trimmed.ends_with('}') {
        return Err(invalid(field_name, value, "Environment variable is not set"));
    }
    Ok(())
}

pub fn validate_range<T>(field_name: &str, value: T, allowed: RangeInclusive<T>) -> Result<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if allowed.contains(&value) {
        return Ok(());
    }
    let reason = format!(
        "Value must be between {} and {}",
        allowed.start(),
        allowed.end()
    );
    Err(invalid(field_name, value, reason))
}
