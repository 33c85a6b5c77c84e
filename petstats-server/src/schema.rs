//! Diesel schema definitions for the clinic tables.

diesel::table! {
    types (id) {
        id -> Int4,
        name -> Text,
    }
}

diesel::table! {
    pets (id) {
        id -> Int4,
        name -> Text,
        birth_date -> Nullable<Date>,
        type_id -> Nullable<Int4>,
    }
}

diesel::table! {
    visits (id) {
        id -> Int4,
        pet_id -> Int4,
        visit_date -> Nullable<Date>,
        description -> Nullable<Text>,
    }
}

diesel::joinable!(pets -> types (type_id));
diesel::joinable!(visits -> pets (pet_id));

diesel::allow_tables_to_appear_in_same_query!(types, pets, visits);
