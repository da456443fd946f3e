//! Stored document shapes for the `users` collection.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use serde::{Deserialize, Serialize};

use crate::domain::{User, UserId, UserProfile, UserValidationError};

/// A user as stored: `{ _id, name, location, title }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: Option<String>,
    pub location: Option<String>,
    pub title: Option<String>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: *user.id().as_object_id(),
            name: Some(profile.name().to_owned()),
            location: Some(profile.location().to_owned()),
            title: Some(profile.title().to_owned()),
        }
    }
}

impl TryFrom<UserDocument> for User {
    type Error = UserValidationError;

    fn try_from(document: UserDocument) -> Result<Self, Self::Error> {
        let UserDocument {
            id,
            name,
            location,
            title,
        } = document;
        let profile = UserProfile::try_new(name, location, title)?;
        Ok(Self::new(UserId::from(id), profile))
    }
}

/// Filter selecting the document stored under `id`.
pub(crate) fn id_filter(id: &UserId) -> Document {
    doc! { "_id": *id.as_object_id() }
}

/// `$set` body replacing every descriptive field.
pub(crate) fn profile_fields(profile: &UserProfile) -> Document {
    doc! {
        "name": profile.name(),
        "location": profile.location(),
        "title": profile.title(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn profile() -> UserProfile {
        UserProfile::try_new(
            Some("Ada".to_owned()),
            Some("London".to_owned()),
            Some("Engineer".to_owned()),
        )
        .expect("valid profile")
    }

    #[rstest]
    fn document_keeps_the_user_id_as_object_id() {
        let user = User::new(UserId::generate(), profile());
        let document = UserDocument::from(&user);
        assert_eq!(&document.id, user.id().as_object_id());
        assert_eq!(User::try_from(document), Ok(user));
    }

    #[rstest]
    fn blank_stored_fields_fail_decoding() {
        let document = UserDocument {
            id: ObjectId::new(),
            name: Some(String::new()),
            location: Some("London".to_owned()),
            title: Some("Engineer".to_owned()),
        };
        assert!(User::try_from(document).is_err());
    }

    #[rstest]
    fn profile_fields_cover_all_descriptive_fields() {
        let fields = profile_fields(&profile());
        assert_eq!(fields.get_str("name").ok(), Some("Ada"));
        assert_eq!(fields.get_str("location").ok(), Some("London"));
        assert_eq!(fields.get_str("title").ok(), Some("Engineer"));
        assert!(!fields.contains_key("_id"));
    }
}
