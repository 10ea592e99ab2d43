//! Health checks for the service.

use crate::fault::DomainFault;
use crate::state::AppState;

/// Fails when the service cannot answer requests. Keep it fast and side-effect free.
pub fn healthy_check(state: &AppState) -> Result<(), DomainFault> {
    tracing::debug!(profile = %state.settings.app_env, "health check ok");
    Ok(())
}
