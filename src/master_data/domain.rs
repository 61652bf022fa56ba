//! Core master data domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::DatabaseId};

/// A validated, non-empty master data title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Title(String);

impl Title {
    /// Create a title.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyTitle] if `title` is empty or only whitespace.
    pub fn new(title: &str) -> Result<Self, Error> {
        let title = title.trim();

        if title.is_empty() {
            Err(Error::EmptyTitle)
        } else {
            Ok(Self(title.to_string()))
        }
    }

    /// Create a title without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(title: &str) -> Self {
        Self(title.to_string())
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Title {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Title::new(s)
    }
}

impl Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a master data item.
pub type MasterDataId = DatabaseId;

/// A user-defined expense type, e.g. 'Food' or 'Rent'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "camelCase")]
pub struct MasterData {
    /// The ID of the item.
    #[serde(rename = "_id")]
    pub id: MasterDataId,
    /// The display name of the expense type.
    pub title: Title,
    /// When the item was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the item was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The JSON body for creating and updating master data.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MasterDataInput {
    /// The requested title, if any.
    pub title: Option<String>,
}

/// Check that `input` has a non-empty title.
///
/// # Errors
///
/// Returns [Error::EmptyTitle] if the title is missing, empty or only whitespace.
pub fn validate_master_data_input(input: &MasterDataInput) -> Result<Title, Error> {
    match &input.title {
        Some(title) => Title::new(title),
        None => Err(Error::EmptyTitle),
    }
}

#[cfg(test)]
mod title_tests {
    use crate::{Error, master_data::Title};

    #[test]
    fn new_fails_on_empty_string() {
        let title = Title::new("");

        assert_eq!(title, Err(Error::EmptyTitle));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        let title = Title::new("\n\t \r");

        assert_eq!(title, Err(Error::EmptyTitle));
    }

    #[test]
    fn new_trims_whitespace() {
        let title = Title::new("  Food ");

        assert_eq!(title, Ok(Title::new_unchecked("Food")));
    }
}

#[cfg(test)]
mod validate_master_data_input_tests {
    use crate::{
        Error,
        master_data::{MasterDataInput, Title, validate_master_data_input},
    };

    #[test]
    fn accepts_title() {
        let input = MasterDataInput {
            title: Some("Transport".to_owned()),
        };

        assert_eq!(
            validate_master_data_input(&input),
            Ok(Title::new_unchecked("Transport"))
        );
    }

    #[test]
    fn rejects_missing_title() {
        assert_eq!(
            validate_master_data_input(&MasterDataInput::default()),
            Err(Error::EmptyTitle)
        );
    }

    #[test]
    fn input_ignores_unknown_fields() {
        let input: MasterDataInput =
            serde_json::from_str(r#"{"title": "Rent", "colour": "red"}"#).unwrap();

        assert_eq!(input.title.as_deref(), Some("Rent"));
    }
}
