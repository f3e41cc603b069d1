use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::schema::users;

/// Local mirror of an identity-provider subject.
#[derive(Queryable, Selectable, Serialize, Clone, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub subject: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Insertable, AsChangeset, Debug)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub subject: String,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
}
