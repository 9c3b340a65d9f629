use tracing::info;

use crate::libs::errors::AuthError;
use crate::libs::models::SessionUser;

/// Anonymous identity provider: one operation, an opaque session id with
/// no credentials. Fails when the service is unreachable.
pub trait IdentityProvider: Send + Sync {
    fn sign_in_anonymously(&self) -> Result<String, AuthError>;
}

/// Signs in anonymously and builds the ephemeral session identity carried
/// into the chat screen.
pub fn start_session(
    provider: &dyn IdentityProvider,
    display_name: &str,
    background_color: &str,
) -> Result<SessionUser, AuthError> {
    let id = provider.sign_in_anonymously()?;
    info!(%display_name, "signed in anonymously");
    Ok(SessionUser {
        id,
        display_name: display_name.to_string(),
        background_color: background_color.to_string(),
    })
}
