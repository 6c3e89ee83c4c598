//! Shared route helpers.

use tower_sessions::Session;

use magnate_kernel::models::Account;

use crate::error::AppError;
use crate::session::SESSION_ADMIN_ID;
use crate::state::AppState;

/// Resolve the requesting admin from the session.
///
/// The session carries an opaque account id written by the auth service;
/// admin-ness is the stored flag on the account record, nothing else.
pub async fn require_admin(state: &AppState, session: &Session) -> Result<Account, AppError> {
    let account_id: Option<i64> = session.get(SESSION_ADMIN_ID).await.ok().flatten();

    let Some(id) = account_id else {
        return Err(AppError::Unauthorized);
    };

    match Account::find_by_id(state.db(), id).await? {
        Some(account) if account.is_admin => Ok(account),
        Some(_) => Err(AppError::Forbidden),
        None => Err(AppError::Unauthorized),
    }
}
