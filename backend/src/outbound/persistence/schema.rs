//! Diesel table definitions matching `backend/migrations`.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        password_hash -> Text,
        firstname -> Nullable<Text>,
        lastname -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shopping lists; `(user_id, lower(title))` is unique.
    shopping_lists (id) {
        id -> Int8,
        user_id -> Uuid,
        title -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Items; rows cascade when their list is deleted.
    shopping_list_items (id) {
        id -> Int8,
        shoppinglist_id -> Int8,
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(shopping_lists -> users (user_id));
diesel::joinable!(shopping_list_items -> shopping_lists (shoppinglist_id));

diesel::allow_tables_to_appear_in_same_query!(users, shopping_lists, shopping_list_items);
