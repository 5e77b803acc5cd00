//! Video analysis domain - precomputed crowd analyses tagged with a capture position
//!
//! Analyses are produced elsewhere; this service only stores and serves them,
//! including the nearby (geofenced) query.

pub mod actions;
pub mod models;

pub use actions::{find_nearby, get_video_analysis, list_video_analyses};
pub use models::{Analysis, GeoPoint, VideoAnalysis, VideoAnalysisDocument};
