use crate::domain::model::Profile;
use crate::domain::ports::Storage;
use reqwest::Client;

pub const PROFILE_PIC_FILE: &str = "profile_pic.jpg";
pub const BACKGROUND_COVER_FILE: &str = "background_cover.jpg";

const UNKNOWN_PROFILE_FOLDER: &str = "unknown_profile";

/// Folder name for a profile's assets: the full name with spaces replaced
/// by underscores. Path separators are replaced too, and a leading `.` becomes
/// `_`, so the name is always a single segment below the output directory.
pub fn profile_folder_name(full_name: &str) -> String {
    let trimmed = full_name.trim();
    // 空白或只有點 (".", "..") 的名稱無法當作資料夾
    if trimmed.chars().all(|c| c == '.') {
        return UNKNOWN_PROFILE_FOLDER.to_string();
    }

    trimmed
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            ' ' | '/' | '\\' => '_',
            '.' if i == 0 => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// 下載頭像與背景圖，回傳成功寫入的檔案路徑
///
/// A failed download is logged and skipped; it never fails the run.
pub async fn download_profile_images<S: Storage>(
    client: &Client,
    storage: &S,
    folder: &str,
    profile: &Profile,
) -> Vec<String> {
    let targets = [
        (profile.profile_pic_url.as_str(), PROFILE_PIC_FILE),
        (
            profile.background_cover_image_url.as_str(),
            BACKGROUND_COVER_FILE,
        ),
    ];

    let mut saved = Vec::new();
    for (url, file_name) in targets {
        if url.is_empty() {
            tracing::debug!("No URL for {}, skipping", file_name);
            continue;
        }

        let path = format!("{}/{}", folder, file_name);
        match download_image(client, storage, url, &path).await {
            Ok(true) => {
                tracing::info!("🖼️ Saved {}", path);
                saved.push(path);
            }
            Ok(false) => {}
            Err(e) => tracing::warn!("⚠️ Failed to save {}: {}", path, e),
        }
    }

    saved
}

async fn download_image<S: Storage>(
    client: &Client,
    storage: &S,
    url: &str,
    path: &str,
) -> crate::utils::error::Result<bool> {
    tracing::debug!("Downloading image from: {}", url);
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        tracing::warn!(
            "⚠️ Image request returned {} for {}, skipping",
            response.status(),
            url
        );
        return Ok(false);
    }

    let bytes = response.bytes().await?;
    storage.write_file(path, &bytes).await?;
    Ok(true)
}
