//! Users
//!
//! Users are owned by the authentication layer; promotions only keep a
//! reference to whoever created or deleted them.

use crate::uuids::TypedUuid;

/// User Record marker
#[derive(Debug, Clone, Copy)]
pub struct UserRecord;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;
