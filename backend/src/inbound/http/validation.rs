//! Shared validation helpers for inbound HTTP adapters.

use tracing::debug;

use crate::domain::exercise_log_service::USER_NOT_FOUND;
use crate::domain::{Error, UserId};

/// Parse a user id taken from the request path.
///
/// An id that cannot name a stored user is reported exactly like an unknown
/// one.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| {
        debug!(user_id = raw, error = %err, "malformed user id in path");
        Error::not_found(USER_NOT_FOUND)
    })
}
