//! Best-effort attachment resolution and caching.

use super::{FileFetch, ScoringService};
use crate::error::Result;
use std::path::Path;
use tracing::{debug, warn};

/// Attempt to download the attachment for a task and enrich the question
/// text with its local path.
///
/// Policy:
/// - No attachment (404) or any transport failure: the question text is
///   returned unchanged. Attachment resolution must never block question
///   processing, so transport failures are logged, not propagated.
/// - Attachment found: the raw content is written under `cache_dir` (created
///   if absent), named from the content-disposition header with the task id
///   as fallback, and a block naming the local path is appended.
///
/// Only local filesystem errors propagate.
pub async fn resolve_attachment(
    service: &dyn ScoringService,
    cache_dir: &Path,
    task_id: &str,
    question_text: &str,
) -> Result<String> {
    let fetch = match service.fetch_file(task_id).await {
        Ok(fetch) => fetch,
        Err(e) => {
            warn!("Attachment download failed for task {}: {}", task_id, e);
            return Ok(question_text.to_string());
        }
    };

    let (filename, bytes) = match fetch {
        FileFetch::Found { filename, bytes } => {
            (filename.unwrap_or_else(|| task_id.to_string()), bytes)
        }
        FileFetch::NotFound => {
            debug!("No attachment for task {}", task_id);
            return Ok(question_text.to_string());
        }
    };

    // The filename comes from a response header; keep only its final
    // component so it cannot escape the cache directory.
    let filename = Path::new(&filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| task_id.to_string());

    std::fs::create_dir_all(cache_dir)?;
    let file_path = cache_dir.join(filename);
    std::fs::write(&file_path, bytes)?;

    debug!("Cached attachment for task {} at {}", task_id, file_path.display());

    Ok(format!(
        "{}\n\n---\nA file was downloaded for this task and saved locally at:\n{}\n---\n\n",
        question_text,
        file_path.display()
    ))
}
