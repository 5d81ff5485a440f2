use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered customer account.
///
/// `username` and `email` are unique across the collection; the uniqueness
/// checks run before creation and the store enforces them again on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub fullname: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    /// Opaque credential blob, see `credentials`.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        fullname: String,
        username: String,
        email: String,
        phone: String,
        password_hash: String,
    ) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            fullname,
            username,
            email,
            phone,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::Admin => "admin",
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(AdminRole::SuperAdmin),
            "admin" => Ok(AdminRole::Admin),
            other => Err(format!("unknown admin role: {other}")),
        }
    }
}

/// A back-office account. Only the credential check lives here; the admin
/// surface itself is outside this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub admin_id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(username: String, password_hash: String, role: AdminRole) -> Self {
        Self {
            admin_id: Uuid::new_v4(),
            username,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }
}
