//! Multipart upload of documents to the indexing endpoint.

use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{BackendConfig, UploadError, UploadReceipt};

const GENERIC_FAILURE_NOTE: &str = "Upload failed";

/// Post the given files as one multipart request under the repeated `files`
/// field. The whole set is a single atomic request: if any file cannot be
/// read, nothing is sent.
pub async fn upload_files(
    http: &reqwest::Client,
    config: &BackendConfig,
    paths: &[PathBuf],
) -> Result<UploadReceipt, UploadError> {
    let mut form = Form::new();
    for path in paths {
        let bytes = tokio::fs::read(path).await.map_err(|err| UploadError::File {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        form = form.part("files", Part::bytes(bytes).file_name(file_name(path)));
    }

    let response = http
        .post(config.upload_url())
        .multipart(form)
        .send()
        .await
        .map_err(|err| UploadError::Transport(err.to_string()))?;

    let status = response.status();
    let raw = response
        .text()
        .await
        .map_err(|err| UploadError::Transport(err.to_string()))?;
    if !status.is_success() {
        return Err(UploadError::Rejected(extract_failure_note(&raw)));
    }

    serde_json::from_str(&raw)
        .map_err(|_| UploadError::Rejected(GENERIC_FAILURE_NOTE.to_owned()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document")
        .to_owned()
}

/// Pull a short note out of the backend's failure body: `detail` first,
/// then `error`, then a generic fallback.
fn extract_failure_note(raw: &str) -> String {
    #[derive(Deserialize)]
    struct FailureBody {
        detail: Option<String>,
        error: Option<String>,
    }

    serde_json::from_str::<FailureBody>(raw)
        .ok()
        .and_then(|body| body.detail.or(body.error))
        .unwrap_or_else(|| GENERIC_FAILURE_NOTE.to_owned())
}
