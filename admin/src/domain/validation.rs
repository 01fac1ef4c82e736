//! Presence and format checks applied to form input before it reaches the
//! store.
//!
//! The store itself accepts any strings; these checks are what the admin
//! screens and the command-line front end run first.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::permission::Permission;
use crate::domain::role::{NewRole, Role};
use crate::domain::user::{NewUser, User};

/// Message for a blank name.
pub const NAME_REQUIRED: &str = "Name is required";
/// Message for a blank email.
pub const EMAIL_REQUIRED: &str = "Email is required";
/// Message for an email that is not `local@domain.tld` shaped.
pub const EMAIL_INVALID: &str = "Invalid email format";
/// Message for a role without permissions.
pub const PERMISSIONS_REQUIRED: &str = "At least one permission is required";

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    /// Display name of a user or role.
    Name,
    /// User email address.
    Email,
    /// Role permission list.
    Permissions,
}

impl FormField {
    /// Field name as shown to operators.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Permissions => "permissions",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<FormField, &'static str>,
}

impl FormErrors {
    fn insert(&mut self, field: FormField, message: &'static str) {
        self.fields.insert(field, message);
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.fields.get(&field).copied()
    }

    /// Failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.fields.iter().map(|(field, message)| (*field, *message))
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// User form input awaiting validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserDraft<'a> {
    /// Display name as typed.
    pub name: &'a str,
    /// Email address as typed.
    pub email: &'a str,
}

impl UserDraft<'_> {
    /// Check the name and email fields.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbac_admin::domain::{FormField, UserDraft};
    ///
    /// let errors = UserDraft { name: " ", email: "ada@" }
    ///     .validate()
    ///     .expect_err("both fields fail");
    /// assert_eq!(errors.get(FormField::Name), Some("Name is required"));
    /// assert_eq!(errors.get(FormField::Email), Some("Invalid email format"));
    /// ```
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, NAME_REQUIRED);
        }
        if self.email.trim().is_empty() {
            errors.insert(FormField::Email, EMAIL_REQUIRED);
        } else if !is_valid_email(self.email) {
            errors.insert(FormField::Email, EMAIL_INVALID);
        }
        errors.into_result()
    }
}

impl<'a> From<&'a NewUser> for UserDraft<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            name: &user.name,
            email: &user.email,
        }
    }
}

impl<'a> From<&'a User> for UserDraft<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            name: &user.name,
            email: &user.email,
        }
    }
}

/// Role form input awaiting validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDraft<'a> {
    /// Role name as typed.
    pub name: &'a str,
    /// Ticked permissions.
    pub permissions: &'a [Permission],
}

impl RoleDraft<'_> {
    /// Check the name and permission fields.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, NAME_REQUIRED);
        }
        if self.permissions.is_empty() {
            errors.insert(FormField::Permissions, PERMISSIONS_REQUIRED);
        }
        errors.into_result()
    }
}

impl<'a> From<&'a NewRole> for RoleDraft<'a> {
    fn from(role: &'a NewRole) -> Self {
        Self {
            name: &role.name,
            permissions: &role.permissions,
        }
    }
}

impl<'a> From<&'a Role> for RoleDraft<'a> {
    fn from(role: &'a Role) -> Self {
        Self {
            name: &role.name,
            permissions: &role.permissions,
        }
    }
}

/// Returns `true` for `local@domain.tld` shaped addresses.
///
/// Accepts one `@` with a non-empty local part, no whitespace anywhere, and a
/// domain holding a `.` with text on both sides.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}
