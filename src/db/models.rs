//! Database models.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// A stored blob row.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::blobs)]
pub struct Blob {
    name: String,
    payload: String,
    updated_at: NaiveDateTime,
}

/// Insertable blob, used for whole-row replacement.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::blobs)]
pub struct NewBlob {
    name: String,
    payload: String,
    updated_at: NaiveDateTime,
}
