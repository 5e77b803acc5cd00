use tracing::info;

use super::errors::UserError;
use crate::domains::auth::models::{phone_fingerprint, UserProfile};
use crate::kernel::{ServerDeps, StoreError};

pub async fn list_users(deps: &ServerDeps) -> Result<Vec<UserProfile>, StoreError> {
    deps.store_call(deps.credentials.list()).await
}

/// Insert or replace an officer's credential record.
pub async fn save_user(user: UserProfile, deps: &ServerDeps) -> Result<UserProfile, UserError> {
    user.validate()
        .map_err(|e| UserError::Invalid(e.to_string()))?;

    deps.store_call(deps.credentials.save(&user)).await?;

    info!(phone = %phone_fingerprint(&user.phone_number), "User saved");
    Ok(user)
}
