//! Core user domain types.

use std::{fmt::Display, str::FromStr};

use axum::{Form, extract::rejection::FormRejection};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A newtype wrapper for integer user IDs.
///
/// IDs are generated by the database when a user is inserted and never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserId(i64);

impl UserId {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse()
            .map(Self)
            .map_err(|_| Error::InvalidUserId(s.to_owned()))
    }
}

/// A validated, non-empty user name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserName(String);

impl UserName {
    /// Create a user name, keeping `name` exactly as given.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::MissingField] if `name` is empty.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.is_empty() {
            Err(Error::MissingField("name"))
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a user name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for UserName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserName::new(s)
    }
}

impl Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated, non-empty email address.
///
/// Only presence is checked. Uniqueness is enforced by the database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Email(String);

impl Email {
    /// Create an email address, keeping `email` exactly as given.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::MissingField] if `email` is empty.
    pub fn new(email: &str) -> Result<Self, Error> {
        if email.is_empty() {
            Err(Error::MissingField("email"))
        } else {
            Ok(Self(email.to_owned()))
        }
    }

    /// Create an email address without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(email: &str) -> Self {
        Self(email.to_owned())
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct User {
    /// The ID generated by the database.
    pub id: UserId,
    /// The user's name.
    pub name: UserName,
    /// The user's email address, unique across all users.
    pub email: Email,
}

/// Form data for creating and editing users.
///
/// Missing fields deserialize to empty strings so that handlers, rather than
/// the form extractor, decide how to respond to them.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserForm {
    /// The user's ID, only sent by the edit form.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl UserForm {
    /// Take the submitted form, or an empty one if the request body could
    /// not be read as a form.
    pub fn from_submission(form: Result<Form<UserForm>, FormRejection>) -> Self {
        match form {
            Ok(Form(form)) => form,
            Err(rejection) => {
                tracing::debug!("treating an unreadable form body as empty: {rejection}");
                Self::default()
            }
        }
    }

    /// Validate the name and email fields.
    ///
    /// # Errors
    ///
    /// Returns [Error::MissingField] naming the first field that is empty.
    pub fn validate(&self) -> Result<(UserName, Email), Error> {
        Ok((UserName::new(&self.name)?, Email::new(&self.email)?))
    }
}

/// The query string for pages and endpoints that act on a single user.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserIdQuery {
    pub id: Option<String>,
}

impl UserIdQuery {
    /// The raw ID if it was given and is not blank.
    pub fn raw_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

#[cfg(test)]
mod user_domain_tests {
    use crate::{
        Error,
        user::{Email, UserId, UserName},
    };

    use super::{UserForm, UserIdQuery};

    #[test]
    fn name_fails_on_empty_string() {
        assert_eq!(UserName::new(""), Err(Error::MissingField("name")));
    }

    #[test]
    fn email_fails_on_empty_string() {
        assert_eq!(Email::new(""), Err(Error::MissingField("email")));
    }

    #[test]
    fn whitespace_is_kept_as_submitted() {
        assert_eq!(UserName::new("  Ana ").unwrap().as_ref(), "  Ana ");
        assert_eq!(UserName::new(" ").unwrap().as_ref(), " ");
        assert_eq!(Email::new(" ana@x.com").unwrap().as_ref(), " ana@x.com");
    }

    #[test]
    fn user_id_parses_integers() {
        assert_eq!("42".parse::<UserId>(), Ok(UserId::new(42)));
        assert_eq!(" 7 ".parse::<UserId>(), Ok(UserId::new(7)));
    }

    #[test]
    fn user_id_rejects_non_integers() {
        assert_eq!(
            "abc".parse::<UserId>(),
            Err(Error::InvalidUserId("abc".to_owned()))
        );
    }

    #[test]
    fn form_validation_reports_first_missing_field() {
        let form = UserForm {
            id: String::new(),
            name: "Ana".to_owned(),
            email: String::new(),
        };

        assert_eq!(form.validate(), Err(Error::MissingField("email")));
    }

    #[test]
    fn blank_query_id_is_missing() {
        let query = UserIdQuery {
            id: Some("  ".to_owned()),
        };

        assert_eq!(query.raw_id(), None);
        assert_eq!(UserIdQuery::default().raw_id(), None);
    }
}
