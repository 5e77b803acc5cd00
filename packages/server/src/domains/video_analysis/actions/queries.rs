use super::decode_documents;
use crate::domains::video_analysis::models::VideoAnalysis;
use crate::kernel::{ServerDeps, StoreError};

pub async fn list_video_analyses(deps: &ServerDeps) -> Result<Vec<VideoAnalysis>, StoreError> {
    let documents = deps
        .store_call(deps.monitoring.list_video_analyses())
        .await?;
    Ok(decode_documents(documents))
}

/// A single analysis; a malformed document is an error here rather than skipped.
pub async fn get_video_analysis(
    video_id: &str,
    deps: &ServerDeps,
) -> Result<Option<VideoAnalysis>, StoreError> {
    deps.store_call(deps.monitoring.find_video_analysis(video_id))
        .await?
        .map(VideoAnalysis::try_from)
        .transpose()
}
