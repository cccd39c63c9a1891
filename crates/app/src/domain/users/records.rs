//! User Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique user identifier.
    pub uuid: UserUuid,

    pub first_name: String,

    pub last_name: String,

    /// Login email, unique case-insensitively.
    pub email: String,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}
