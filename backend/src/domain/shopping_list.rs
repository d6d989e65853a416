//! Shopping lists and their line items.
//!
//! A [`ShoppingList`] belongs to exactly one user and a
//! [`ShoppingListItem`] to exactly one list. Titles are unique per owner once
//! case is folded; item names carry no uniqueness rule.

use std::fmt;
use std::num::NonZeroI64;
use std::str::FromStr;

use super::UserId;

/// Maximum length of a list title.
pub const TITLE_MAX: usize = 120;
/// Maximum length of an item name.
pub const ITEM_NAME_MAX: usize = 120;

/// Validation errors for user-supplied list and item fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidationError {
    /// The field was absent or blank.
    MissingField { field: &'static str },
    /// The field exceeds its length limit.
    TooLong { field: &'static str, max: usize },
}

impl FieldValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::TooLong { field, .. } => *field,
        }
    }
}

impl fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "{field} must be provided"),
            Self::TooLong { field, max } => {
                write!(f, "{field} must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for FieldValidationError {}

fn required_text(
    raw: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<String, FieldValidationError> {
    let value = raw.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(FieldValidationError::MissingField { field });
    }
    if value.chars().count() > max {
        return Err(FieldValidationError::TooLong { field, max });
    }
    Ok(value.to_owned())
}

/// Error returned when a path segment is not a valid identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidIdError;

impl fmt::Display for InvalidIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identifier must be a positive integer")
    }
}

impl std::error::Error for InvalidIdError {}

macro_rules! storage_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(NonZeroI64);

        impl $name {
            /// Wrap a storage-assigned identifier; rejects zero and negatives.
            pub fn new(raw: i64) -> Result<Self, InvalidIdError> {
                NonZeroI64::new(raw)
                    .filter(|value| value.get() > 0)
                    .map(Self)
                    .ok_or(InvalidIdError)
            }

            /// Raw integer value.
            pub fn get(self) -> i64 {
                self.0.get()
            }
        }

        impl FromStr for $name {
            type Err = InvalidIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.trim().parse::<i64>().map_err(|_| InvalidIdError)?;
                Self::new(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

storage_id! {
    /// Identifier of a shopping list, assigned by storage in creation order.
    ShoppingListId
}

storage_id! {
    /// Identifier of a shopping list item, assigned by storage in creation order.
    ShoppingListItemId
}

/// Shopping list title as typed by the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListTitle(String);

impl ShoppingListTitle {
    /// Validate a raw title; absent and blank titles are rejected.
    ///
    /// # Examples
    /// ```
    /// use shoplist::domain::ShoppingListTitle;
    ///
    /// let title = ShoppingListTitle::parse(Some("  Trip to Canada ")).unwrap();
    /// assert_eq!(title.as_str(), "Trip to Canada");
    /// assert_eq!(title.normalized(), "trip to canada");
    /// assert!(ShoppingListTitle::parse(Some("   ")).is_err());
    /// ```
    pub fn parse(raw: Option<&str>) -> Result<Self, FieldValidationError> {
        required_text(raw, "title", TITLE_MAX).map(Self)
    }

    /// Case-folded form used by the per-owner uniqueness rule.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    /// Title as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ShoppingListTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ShoppingListTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Item name, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    /// Validate a raw item name; absent and blank names are rejected.
    pub fn parse(raw: Option<&str>) -> Result<Self, FieldValidationError> {
        required_text(raw, "name", ITEM_NAME_MAX).map(|name| Self(name.to_lowercase()))
    }

    /// Name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Shopping list owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingList {
    id: ShoppingListId,
    title: ShoppingListTitle,
    owner: UserId,
}

impl ShoppingList {
    /// Assemble a stored list.
    pub fn new(id: ShoppingListId, title: ShoppingListTitle, owner: UserId) -> Self {
        Self { id, title, owner }
    }

    /// Storage identifier.
    pub fn id(&self) -> ShoppingListId {
        self.id
    }

    /// Current title.
    pub fn title(&self) -> &ShoppingListTitle {
        &self.title
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }
}

/// Line item on a shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListItem {
    id: ShoppingListItemId,
    name: ItemName,
    shoppinglist_id: ShoppingListId,
}

impl ShoppingListItem {
    /// Assemble a stored item.
    pub fn new(id: ShoppingListItemId, name: ItemName, shoppinglist_id: ShoppingListId) -> Self {
        Self {
            id,
            name,
            shoppinglist_id,
        }
    }

    /// Storage identifier.
    pub fn id(&self) -> ShoppingListItemId {
        self.id
    }

    /// Item name.
    pub fn name(&self) -> &ItemName {
        &self.name
    }

    /// Parent list.
    pub fn shoppinglist_id(&self) -> ShoppingListId {
        self.shoppinglist_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn title_is_required(#[case] raw: Option<&str>) {
        let err = ShoppingListTitle::parse(raw).expect_err("blank title");
        assert_eq!(err.to_string(), "title must be provided");
        assert_eq!(err.field(), "title");
    }

    #[rstest]
    fn title_length_is_capped() {
        let raw = "t".repeat(TITLE_MAX + 1);
        let err = ShoppingListTitle::parse(Some(&raw)).expect_err("long title");
        assert_eq!(
            err,
            FieldValidationError::TooLong {
                field: "title",
                max: TITLE_MAX
            }
        );
    }

    #[rstest]
    fn titles_differing_in_case_normalise_equal() {
        let upper = ShoppingListTitle::parse(Some("Trip to Canada")).expect("title");
        let lower = ShoppingListTitle::parse(Some("trip to canada")).expect("title");
        assert_ne!(upper, lower);
        assert_eq!(upper.normalized(), lower.normalized());
    }

    #[rstest]
    fn item_names_are_lower_cased() {
        let name = ItemName::parse(Some(" Swimming floaters ")).expect("name");
        assert_eq!(name.as_str(), "swimming floaters");
        let err = ItemName::parse(None).expect_err("missing name");
        assert_eq!(err.to_string(), "name must be provided");
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case(" 7 ", Some(7))]
    #[case("0", None)]
    #[case("-5", None)]
    #[case("abc", None)]
    #[case("99999999999999999999", None)]
    fn ids_parse_positive_integers(#[case] raw: &str, #[case] expected: Option<i64>) {
        let parsed = raw.parse::<ShoppingListId>().ok().map(ShoppingListId::get);
        assert_eq!(parsed, expected);
    }
}
