//! User Entity
//!
//! An account that can obtain bearer tokens, plus the write shapes used to
//! create and change one.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, person_name::PersonName, user_name::UserName, user_password::UserPassword,
};

/// Stored user account
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub id: UserId,
    /// Login handle (unique)
    pub user_name: UserName,
    /// Argon2id credential
    pub password: UserPassword,
    pub email: Email,
    pub first_name: PersonName,
    pub last_name: PersonName,
    /// Inactive accounts cannot obtain or use tokens
    pub is_active: bool,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
    /// Last successful token issuance
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Apply a patch in place (used by stores that hold records in memory)
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(user_name) = patch.user_name {
            self.user_name = user_name;
        }
        if let Some(password) = patch.password {
            self.password = password;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(is_staff) = patch.is_staff {
            self.is_staff = is_staff;
        }
    }
}

/// A user not yet stored
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub password: UserPassword,
    pub email: Email,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub is_active: bool,
    pub is_staff: bool,
}

impl NewUser {
    /// Active, non-staff account with empty profile fields
    pub fn new(user_name: UserName, password: UserPassword) -> Self {
        Self {
            user_name,
            password,
            email: Email::empty(),
            first_name: PersonName::default(),
            last_name: PersonName::default(),
            is_active: true,
            is_staff: false,
        }
    }

    /// Materialize with the id and join time chosen by the store
    pub fn into_user(self, id: UserId, date_joined: DateTime<Utc>) -> User {
        User {
            id,
            user_name: self.user_name,
            password: self.password,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            is_active: self.is_active,
            is_staff: self.is_staff,
            date_joined,
            last_login: None,
        }
    }
}

/// Fields to change on an existing user; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub user_name: Option<UserName>,
    pub password: Option<UserPassword>,
    pub email: Option<Email>,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none()
            && self.password.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.is_active.is_none()
            && self.is_staff.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn password() -> UserPassword {
        let raw = RawPassword::new("correct-horse-battery".to_string()).unwrap();
        UserPassword::from_raw(&raw, None).unwrap()
    }

    #[test]
    fn test_new_user_defaults() {
        let user = NewUser::new(UserName::new("alice").unwrap(), password())
            .into_user(UserId::from_i64(1), Utc::now());

        assert!(user.can_login());
        assert!(!user.is_staff);
        assert!(user.email.is_empty());
        assert!(user.last_login.is_none());
    }

    #[test]
    fn test_apply_patch_touches_only_given_fields() {
        let mut user = NewUser::new(UserName::new("alice").unwrap(), password())
            .into_user(UserId::from_i64(1), Utc::now());

        user.apply(UserPatch {
            first_name: Some(PersonName::new("Alice").unwrap()),
            is_active: Some(false),
            ..Default::default()
        });

        assert_eq!(user.user_name.as_str(), "alice");
        assert_eq!(user.first_name.as_str(), "Alice");
        assert!(!user.can_login());
    }

    #[test]
    fn test_empty_patch() {
        assert!(UserPatch::default().is_empty());
        assert!(
            !UserPatch {
                is_staff: Some(true),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
