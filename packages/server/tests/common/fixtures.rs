//! Test data builders.

use crowd_monitor_core::domains::auth::models::UserProfile;
use crowd_monitor_core::domains::locations::models::{Camera, Location};
use crowd_monitor_core::domains::video_analysis::models::{Analysis, GeoPoint, VideoAnalysis};

pub fn officer(phone_number: &str) -> UserProfile {
    UserProfile {
        phone_number: phone_number.to_string(),
        name: "Rajesh Kumar".to_string(),
        rank: "ASI".to_string(),
        department: "Madgaon Police Department".to_string(),
        id_card_number: "123".to_string(),
    }
}

pub fn location(id: &str, name: &str, camera_ids: &[&str]) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        is_overcrowded: true,
        camera_ids: camera_ids.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn camera(id: &str, location_id: &str, suggestions: &[&str]) -> Camera {
    Camera {
        id: id.to_string(),
        location_id: location_id.to_string(),
        crowd_count: 240,
        police_intervention_needed: true,
        intervention_suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn analysis_at(video_id: &str, latitude: f64, longitude: f64) -> VideoAnalysis {
    VideoAnalysis {
        video_id: video_id.to_string(),
        video_duration: 42.0,
        timestamp: None,
        created_at: None,
        location: GeoPoint {
            latitude,
            longitude,
            timestamp: None,
        },
        analysis: Analysis {
            crowd_count: "180".to_string(),
            crowd_level: "high".to_string(),
            crowd_present: "yes".to_string(),
            is_peak_hour: "yes".to_string(),
            police_intervention_required: "yes".to_string(),
            police_intervention_suggestions: vec!["Open exit routes".to_string()],
        },
        frame_urls: vec![format!("https://frames.example.org/{}/0.jpg", video_id)],
    }
}
