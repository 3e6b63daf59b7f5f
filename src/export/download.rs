use std::path::PathBuf;

use crate::error::Result;
use crate::platform::{Blob, Downloads};

/// Hand `blob` to the download service under `filename`.
///
/// The object URL is revoked as soon as the save has been triggered,
/// whether or not it succeeded.
pub async fn download_file(downloads: &dyn Downloads, blob: Blob, filename: &str) -> Result<PathBuf> {
    let url = downloads.create_object_url(blob);
    let saved = downloads.save(&url, filename).await;
    downloads.revoke_object_url(&url);
    saved
}
