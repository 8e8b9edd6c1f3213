diesel::table! {
    organizations (id) {
        id -> Int4,
        name -> Text,
        description -> Text,
        url -> Text,
        year -> Int4,
    }
}
