mod video_analysis;

pub use video_analysis::*;
