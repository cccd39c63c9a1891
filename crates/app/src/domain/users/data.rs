//! User Data

use crate::domain::users::{errors::UsersServiceError, records::UserUuid};

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewUser {
    /// Trim every field and reject blanks or an email without `@`.
    ///
    /// # Errors
    ///
    /// Returns [`UsersServiceError::InvalidData`] when a field is unusable.
    pub fn normalized(self) -> Result<Self, UsersServiceError> {
        let first_name = self.first_name.trim().to_string();
        let last_name = self.last_name.trim().to_string();
        let email = self.email.trim().to_string();

        if first_name.is_empty() || last_name.is_empty() || !email.contains('@') {
            return Err(UsersServiceError::InvalidData);
        }

        Ok(Self {
            uuid: self.uuid,
            first_name,
            last_name,
            email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first_name: &str, last_name: &str, email: &str) -> NewUser {
        NewUser {
            uuid: UserUuid::new(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn normalized_trims_fields() -> Result<(), UsersServiceError> {
        let normalized = user("  Ada ", "Lovelace ", " ada@example.com ").normalized()?;

        assert_eq!(normalized.first_name, "Ada");
        assert_eq!(normalized.last_name, "Lovelace");
        assert_eq!(normalized.email, "ada@example.com");

        Ok(())
    }

    #[test]
    fn normalized_rejects_blank_names() {
        let result = user(" ", "Lovelace", "ada@example.com").normalized();

        assert!(matches!(result, Err(UsersServiceError::InvalidData)));
    }

    #[test]
    fn normalized_rejects_email_without_at_sign() {
        let result = user("Ada", "Lovelace", "ada.example.com").normalized();

        assert!(matches!(result, Err(UsersServiceError::InvalidData)));
    }
}
