//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; Diesel uses
//! them for compile-time query validation.

diesel::table! {
    /// Registered accounts. `username` is unique.
    users (id) {
        id -> Int8,
        username -> Text,
        password_hash -> Text,
        /// `user` or `provider`.
        role -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    addresses (id) {
        id -> Int8,
        user_id -> Int8,
        label -> Nullable<Text>,
        line1 -> Text,
        city -> Text,
        state -> Nullable<Text>,
        pincode -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    nurse_bookings (id) {
        id -> Int8,
        user_id -> Int8,
        area -> Text,
        hours -> Int8,
        rate_per_hour -> Int8,
        total -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    subscriptions (id) {
        id -> Int8,
        user_id -> Int8,
        /// `day` or `night`.
        #[sql_name = "type"]
        kind -> Text,
        days -> Float8,
        rate_per_day -> Int8,
        total -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    guidance_requests (id) {
        id -> Int8,
        user_id -> Int8,
        note -> Nullable<Text>,
        /// `pending` or `resolved`.
        status -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    ambulance_bookings (id) {
        id -> Int8,
        user_id -> Int8,
        distance_km -> Float8,
        pickup_address -> Text,
        rate_per_km -> Int8,
        total -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(addresses -> users (user_id));
diesel::joinable!(nurse_bookings -> users (user_id));
diesel::joinable!(subscriptions -> users (user_id));
diesel::joinable!(guidance_requests -> users (user_id));
diesel::joinable!(ambulance_bookings -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    addresses,
    nurse_bookings,
    subscriptions,
    guidance_requests,
    ambulance_bookings,
);
