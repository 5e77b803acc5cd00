//! Auth domain data types

use serde::{Deserialize, Serialize};

use super::models::UserProfile;

/// Successful login: a bearer token plus the officer's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub profile: UserProfile,
}
