use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Row id of the single authentication record
pub(crate) const AUTH_RECORD_ID: i32 = 1;

/// The persisted sign-in state
///
/// There is at most one row in `auth_state`: logging in replaces it, logging
/// out deletes it.
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::auth_state)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuthRecord {
    /// Always `AUTH_RECORD_ID`
    id: i32,

    /// Email of the signed-in user
    email: String,

    /// When the user signed in
    signed_in_at: NaiveDateTime,
}

impl AuthRecord {
    /// Creates a fresh sign-in record stamped with the current time
    pub fn new(email: String) -> Self {
        Self {
            id: AUTH_RECORD_ID,
            email,
            signed_in_at: Utc::now().naive_utc(),
        }
    }

    /// Gets the signed-in email
    pub fn get_email(&self) -> String {
        self.email.clone()
    }

    /// Gets the sign-in timestamp as a DateTime<Utc>
    pub fn get_signed_in_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.signed_in_at, Utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_record_new() {
        let record = AuthRecord::new("user@example.com".to_string());
        assert_eq!(record.get_email(), "user@example.com");
        assert_eq!(record.id, AUTH_RECORD_ID);
    }
}
