use serde_json::Value;

use crate::{mangacat::ApiClient, sniff::ImageFile, types::ChapterRequest};

pub const CHAPTERS: &str = "series_chapters";

/// Creates a chapter and returns its id.
///
/// The id is read from `id` or, failing that, `chapter.id` of the response.
/// Returns `None` (after logging why) if the request failed or no id was
/// found.
pub async fn create(client: &ApiClient, request: &ChapterRequest, token: &str) -> Option<u64> {
    let Some(res) = client.submit_json(CHAPTERS, request, Some(token)).await else {
        log::error!("Empty response");
        return None;
    };

    match chapter_id(&res) {
        Some(id) => Some(id),
        None => {
            log::error!("{}", res);
            None
        }
    }
}

/// Uploads the page images of chapter `id` in batches.
pub async fn upload_pages(client: &ApiClient, id: u64, files: &[ImageFile], token: &str) -> i32 {
    let url = format!("{CHAPTERS}/{id}");
    client.submit_files(&url, files, Some(token)).await
}

fn chapter_id(res: &Value) -> Option<u64> {
    res["id"].as_u64().or_else(|| res["chapter"]["id"].as_u64())
}
