use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cinebook_auth::{Admin, AdminRole, User, UserRepository};
use cinebook_core::StoreError;
use uuid::Uuid;

use crate::database::PgStore;
use crate::db_error;

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    fullname: String,
    username: String,
    email: String,
    phone: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            user_id: row.user_id,
            fullname: row.fullname,
            username: row.username,
            email: row.email,
            phone: row.phone,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AdminRow {
    admin_id: Uuid,
    username: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = StoreError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        Ok(Admin {
            admin_id: row.admin_id,
            username: row.username,
            password_hash: row.password_hash,
            role: row.role.parse::<AdminRole>().map_err(StoreError::Backend)?,
            created_at: row.created_at,
        })
    }
}

const USER_COLUMNS: &str = "user_id, fullname, username, email, phone, password_hash, created_at";

#[async_trait]
impl UserRepository for PgStore {
    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
        ))
        .bind(user.user_id)
        .bind(&user.fullname)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                let field = if db.constraint() == Some("users_email_key") {
                    "email"
                } else {
                    "username"
                };
                Err(StoreError::Duplicate { field })
            }
            Err(other) => Err(db_error(other)),
        }
    }

    async fn user_by_id(&self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(User::from))
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(User::from))
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(User::from))
    }

    async fn admin_by_username(&self, username: &str) -> Result<Option<Admin>, StoreError> {
        let row = sqlx::query_as::<_, AdminRow>(
            "SELECT admin_id, username, password_hash, role, created_at FROM admins WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        row.map(Admin::try_from).transpose()
    }
}
