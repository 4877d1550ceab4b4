//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! them with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Staff accounts. `username` is unique ignoring case.
    users (id) {
        id -> Uuid,
        name -> Text,
        username -> Text,
        email -> Nullable<Text>,
        password_hash -> Text,
        /// One of `admin`, `doctor`, `receptionist`.
        role -> Text,
        is_active -> Bool,
        last_login -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    doctors (id) {
        id -> Uuid,
        name -> Text,
        specialty -> Nullable<Text>,
        bio -> Nullable<Text>,
        photo -> Nullable<Text>,
        is_active -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    appointments (id) {
        id -> Uuid,
        patient_name -> Text,
        email -> Nullable<Text>,
        phone -> Text,
        doctor_id -> Nullable<Uuid>,
        doctor_name -> Nullable<Text>,
        appointment_date -> Timestamptz,
        /// Free-form time of day as entered, e.g. `10:30`.
        appointment_time -> Text,
        reason -> Nullable<Text>,
        status -> Text,
        is_walk_in -> Bool,
        notes -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    patients (id) {
        id -> Uuid,
        name -> Text,
        email -> Nullable<Text>,
        phone -> Nullable<Text>,
        date_of_birth -> Nullable<Date>,
        address -> Nullable<Text>,
        gender -> Nullable<Text>,
        blood_group -> Nullable<Text>,
        notes -> Text,
        /// `New` until the second visit, then `Regular`.
        status -> Text,
        total_visits -> Int4,
        last_visit -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    reviews (id) {
        id -> Uuid,
        patient_name -> Text,
        message -> Text,
        rating -> Int2,
        is_approved -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    blog_posts (id) {
        id -> Uuid,
        title -> Text,
        content -> Text,
        image -> Nullable<Text>,
        is_published -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    contact_messages (id) {
        id -> Uuid,
        full_name -> Text,
        email -> Text,
        phone -> Nullable<Text>,
        message -> Text,
        is_read -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(appointments -> doctors (doctor_id));

diesel::allow_tables_to_appear_in_same_query!(
    appointments,
    blog_posts,
    contact_messages,
    doctors,
    patients,
    reviews,
    users,
);
