//! Video analysis actions

mod find_nearby;
mod queries;

pub use find_nearby::find_nearby;
pub use queries::{get_video_analysis, list_video_analyses};

use tracing::warn;

use super::models::{VideoAnalysis, VideoAnalysisDocument};

/// Decode a batch of documents, dropping (and logging) the ones with the wrong shape.
pub(crate) fn decode_documents(documents: Vec<VideoAnalysisDocument>) -> Vec<VideoAnalysis> {
    documents
        .into_iter()
        .filter_map(|doc| match VideoAnalysis::try_from(doc) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!(error = %e, "Skipping malformed video analysis document");
                None
            }
        })
        .collect()
}
