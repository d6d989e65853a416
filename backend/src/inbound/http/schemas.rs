//! Response bodies and their OpenAPI schemas.
//!
//! Domain entities stay free of serialisation concerns; these wrappers define
//! the wire shape and live in the inbound adapter where framework concerns
//! belong.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ShoppingList, ShoppingListItem, User};

/// Public view of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "ada")]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Ada")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Lovelace")]
    pub lastname: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
            firstname: user.firstname().map(str::to_owned),
            lastname: user.lastname().map(str::to_owned),
        }
    }
}

/// A shopping list as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingListResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Trip to Canada")]
    pub title: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
}

impl From<&ShoppingList> for ShoppingListResponse {
    fn from(list: &ShoppingList) -> Self {
        Self {
            id: list.id().get(),
            title: list.title().to_string(),
            user_id: list.owner().to_string(),
        }
    }
}

/// An item on a shopping list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingListItemResponse {
    #[schema(example = 7)]
    pub id: i64,
    #[schema(example = "swimming floaters")]
    pub name: String,
    #[schema(example = 1)]
    pub shoppinglist_id: i64,
}

impl From<&ShoppingListItem> for ShoppingListItemResponse {
    fn from(item: &ShoppingListItem) -> Self {
        Self {
            id: item.id().get(),
            name: item.name().to_string(),
            shoppinglist_id: item.shoppinglist_id().get(),
        }
    }
}

/// Confirmation returned by delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "shoppinglist `1` deleted")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap a confirmation message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ItemName, PasswordHash, ShoppingListId, ShoppingListItemId, ShoppingListTitle, UserId,
        Username,
    };
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn user_response_omits_absent_names() {
        let user = User::new(
            UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("id"),
            Username::new("ada").expect("username"),
            PasswordHash::new("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA").expect("hash"),
        );
        let value = serde_json::to_value(UserResponse::from(&user)).expect("serialises");
        assert_eq!(
            value,
            json!({"id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "username": "ada"})
        );
    }

    #[rstest]
    fn list_and_item_responses_use_numeric_ids() {
        let owner = UserId::random();
        let list = ShoppingList::new(
            ShoppingListId::new(3).expect("id"),
            ShoppingListTitle::parse(Some("Groceries")).expect("title"),
            owner,
        );
        let item = ShoppingListItem::new(
            ShoppingListItemId::new(9).expect("id"),
            ItemName::parse(Some("Soap")).expect("name"),
            list.id(),
        );

        let list_json = serde_json::to_value(ShoppingListResponse::from(&list)).expect("list");
        assert_eq!(
            list_json,
            json!({"id": 3, "title": "Groceries", "user_id": owner.to_string()})
        );
        let item_json = serde_json::to_value(ShoppingListItemResponse::from(&item)).expect("item");
        assert_eq!(
            item_json,
            json!({"id": 9, "name": "soap", "shoppinglist_id": 3})
        );
    }
}
