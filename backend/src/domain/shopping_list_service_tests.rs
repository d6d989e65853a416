//! Tests for the shopping list service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockShoppingListItemRepository, MockShoppingListRepository};
use crate::domain::{ErrorCode, Keyword};
use pagination::PageRequest;

type Service = ShoppingListService<MockShoppingListRepository, MockShoppingListItemRepository>;

fn make_service(
    lists: MockShoppingListRepository,
    items: MockShoppingListItemRepository,
) -> Service {
    ShoppingListService::new(Arc::new(lists), Arc::new(items))
}

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

fn list_id(raw: i64) -> ShoppingListId {
    ShoppingListId::new(raw).expect("list id")
}

fn item_id(raw: i64) -> ShoppingListItemId {
    ShoppingListItemId::new(raw).expect("item id")
}

fn stored_list(owner: UserId, id: i64, title: &str) -> ShoppingList {
    ShoppingList::new(
        list_id(id),
        ShoppingListTitle::parse(Some(title)).expect("title"),
        owner,
    )
}

fn stored_item(list: i64, id: i64, name: &str) -> ShoppingListItem {
    ShoppingListItem::new(
        item_id(id),
        ItemName::parse(Some(name)).expect("name"),
        list_id(list),
    )
}

fn owning(owner: UserId, id: i64) -> MockShoppingListRepository {
    let mut lists = MockShoppingListRepository::new();
    lists
        .expect_find()
        .returning(move |_, _| Ok(Some(stored_list(owner, id, "Trip to Canada"))));
    lists
}

fn keyword_query(term: &str) -> CollectionQuery {
    CollectionQuery::new(Keyword::parse(Some(term)), PageRequest::default())
}

#[rstest]
#[tokio::test]
async fn create_list_persists_trimmed_title(owner: UserId) {
    let mut lists = MockShoppingListRepository::new();
    lists
        .expect_insert()
        .withf(|_, title| title.as_str() == "Trip to Canada")
        .times(1)
        .returning(|owner, title| Ok(ShoppingList::new(list_id(1), title.clone(), *owner)));

    let service = make_service(lists, MockShoppingListItemRepository::new());
    let list = service
        .create_list(&owner, Some("  Trip to Canada "))
        .await
        .expect("created");
    assert_eq!(list.owner(), &owner);
    assert_eq!(list.title().as_str(), "Trip to Canada");
}

#[rstest]
#[case(None)]
#[case(Some("   "))]
#[tokio::test]
async fn create_list_requires_title(#[case] title: Option<&str>, owner: UserId) {
    let service = make_service(
        MockShoppingListRepository::new(),
        MockShoppingListItemRepository::new(),
    );
    let err = service.create_list(&owner, title).await.expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "title must be provided");
}

#[rstest]
#[tokio::test]
async fn create_list_reports_duplicate_title(owner: UserId) {
    let mut lists = MockShoppingListRepository::new();
    lists
        .expect_insert()
        .return_once(|_, title| Err(ShoppingListRepositoryError::duplicate(title.as_str())));

    let service = make_service(lists, MockShoppingListItemRepository::new());
    let err = service
        .create_list(&owner, Some("trip to canada"))
        .await
        .expect_err("duplicate");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), "shoppinglist `trip to canada` already exists");
}

#[rstest]
#[tokio::test]
async fn keyword_without_matches_is_not_found(owner: UserId) {
    let mut lists = MockShoppingListRepository::new();
    lists.expect_list().return_once(|_, _| Ok(Vec::new()));

    let service = make_service(lists, MockShoppingListItemRepository::new());
    let err = service
        .list_lists(&owner, &keyword_query("mombasa"))
        .await
        .expect_err("no match");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(
        err.message(),
        "no shoppinglist that matches the keyword `mombasa`"
    );
}

#[rstest]
#[tokio::test]
async fn empty_collection_without_keyword_is_ok(owner: UserId) {
    let mut lists = MockShoppingListRepository::new();
    lists.expect_list().return_once(|_, _| Ok(Vec::new()));

    let service = make_service(lists, MockShoppingListItemRepository::new());
    let found = service
        .list_lists(&owner, &CollectionQuery::all())
        .await
        .expect("empty list");
    assert!(found.is_empty());
}

#[rstest]
#[tokio::test]
async fn missing_list_is_not_found(owner: UserId) {
    let mut lists = MockShoppingListRepository::new();
    lists.expect_find().returning(|_, _| Ok(None));
    lists.expect_delete().returning(|_, _| Ok(false));

    let service = make_service(lists, MockShoppingListItemRepository::new());
    let get = service.get_list(&owner, list_id(9)).await.expect_err("missing");
    assert_eq!(get.message(), "Requested shoppinglist was not found");
    let delete = service
        .delete_list(&owner, list_id(9))
        .await
        .expect_err("missing");
    assert_eq!(delete.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn rename_reports_missing_list_before_blank_title(owner: UserId) {
    let mut lists = MockShoppingListRepository::new();
    lists.expect_find().return_once(|_, _| Ok(None));

    let service = make_service(lists, MockShoppingListItemRepository::new());
    let err = service
        .rename_list(&owner, list_id(3), None)
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn rename_list_updates_title(owner: UserId) {
    let mut lists = owning(owner, 1);
    lists
        .expect_rename()
        .times(1)
        .returning(|owner, id, title| Ok(Some(ShoppingList::new(id, title.clone(), *owner))));

    let service = make_service(lists, MockShoppingListItemRepository::new());
    let list = service
        .rename_list(&owner, list_id(1), Some("Back to school"))
        .await
        .expect("renamed");
    assert_eq!(list.title().as_str(), "Back to school");
}

#[rstest]
#[tokio::test]
async fn item_operations_check_parent_list_first(owner: UserId) {
    let mut lists = MockShoppingListRepository::new();
    lists.expect_find().returning(|_, _| Ok(None));
    let mut items = MockShoppingListItemRepository::new();
    items.expect_find().never();
    items.expect_insert().never();

    let service = make_service(lists, items);
    let get = service
        .get_item(&owner, list_id(4), item_id(1))
        .await
        .expect_err("missing list");
    assert_eq!(get.message(), "Requested shoppinglist was not found");
    let add = service
        .add_item(&owner, list_id(4), None)
        .await
        .expect_err("missing list");
    assert_eq!(add.message(), "Requested shoppinglist was not found");
}

#[rstest]
#[tokio::test]
async fn add_item_requires_name(owner: UserId) {
    let service = make_service(owning(owner, 1), MockShoppingListItemRepository::new());
    let err = service
        .add_item(&owner, list_id(1), Some(""))
        .await
        .expect_err("missing name");
    assert_eq!(err.message(), "name must be provided");
}

#[rstest]
#[tokio::test]
async fn missing_item_is_not_found(owner: UserId) {
    let mut items = MockShoppingListItemRepository::new();
    items.expect_find().returning(|_, _| Ok(None));
    items.expect_delete().returning(|_, _| Ok(false));

    let service = make_service(owning(owner, 1), items);
    let get = service
        .get_item(&owner, list_id(1), item_id(12345))
        .await
        .expect_err("missing item");
    assert_eq!(get.message(), "Requested shoppinglist item was not found");
    let rename = service
        .rename_item(&owner, list_id(1), item_id(12345), Some("soap"))
        .await
        .expect_err("missing item");
    assert_eq!(rename.code(), ErrorCode::NotFound);
    let delete = service
        .delete_item(&owner, list_id(1), item_id(12345))
        .await
        .expect_err("missing item");
    assert_eq!(delete.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn rename_item_lower_cases_name(owner: UserId) {
    let mut items = MockShoppingListItemRepository::new();
    items
        .expect_find()
        .returning(|_, _| Ok(Some(stored_item(1, 2, "floaters"))));
    items
        .expect_rename()
        .withf(|_, _, name| name.as_str() == "swimming floaters")
        .returning(|list, id, name| Ok(Some(ShoppingListItem::new(id, name.clone(), list))));

    let service = make_service(owning(owner, 1), items);
    let item = service
        .rename_item(&owner, list_id(1), item_id(2), Some("Swimming floaters"))
        .await
        .expect("renamed");
    assert_eq!(item.name().as_str(), "swimming floaters");
}

#[rstest]
#[tokio::test]
async fn item_search_miss_is_not_found(owner: UserId) {
    let mut items = MockShoppingListItemRepository::new();
    items.expect_list().return_once(|_, _| Ok(Vec::new()));

    let service = make_service(owning(owner, 1), items);
    let err = service
        .list_items(&owner, list_id(1), &keyword_query("soap"))
        .await
        .expect_err("no match");
    assert_eq!(err.message(), "No item matches the keyword `soap`");
}

#[rstest]
#[tokio::test]
async fn query_failures_are_internal(owner: UserId) {
    let mut lists = MockShoppingListRepository::new();
    lists
        .expect_list()
        .return_once(|_, _| Err(ShoppingListRepositoryError::query("syntax error")));

    let service = make_service(lists, MockShoppingListItemRepository::new());
    let err = service
        .list_lists(&owner, &CollectionQuery::all())
        .await
        .expect_err("failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

fn past_the_end(term: &str) -> CollectionQuery {
    let page = PageRequest::parse(Some("2"), Some("3")).expect("page");
    CollectionQuery::new(Keyword::parse(Some(term)), page)
}

#[rstest]
#[tokio::test]
async fn empty_page_past_matching_lists_is_ok(owner: UserId) {
    let mut lists = MockShoppingListRepository::new();
    lists.expect_list().times(2).returning(move |owner, query| {
        if query.page().offset() > 0 {
            Ok(Vec::new())
        } else {
            Ok(vec![stored_list(*owner, 1, "trip 0")])
        }
    });

    let service = make_service(lists, MockShoppingListItemRepository::new());
    let found = service
        .list_lists(&owner, &past_the_end("trip"))
        .await
        .expect("past-the-end page");
    assert!(found.is_empty());
}

#[rstest]
#[tokio::test]
async fn empty_page_without_any_match_is_not_found(owner: UserId) {
    let mut lists = MockShoppingListRepository::new();
    lists.expect_list().times(2).returning(|_, _| Ok(Vec::new()));

    let service = make_service(lists, MockShoppingListItemRepository::new());
    let err = service
        .list_lists(&owner, &past_the_end("mombasa"))
        .await
        .expect_err("no match");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn empty_page_past_matching_items_is_ok(owner: UserId) {
    let mut items = MockShoppingListItemRepository::new();
    items.expect_list().times(2).returning(|list, query| {
        if query.page().offset() > 0 {
            Ok(Vec::new())
        } else {
            Ok(vec![stored_item(list.get(), 1, "soap")])
        }
    });

    let service = make_service(owning(owner, 1), items);
    let found = service
        .list_items(&owner, list_id(1), &past_the_end("soap"))
        .await
        .expect("past-the-end page");
    assert!(found.is_empty());
}
