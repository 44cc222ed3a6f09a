use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account as shown to its owner. The password hash never leaves storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
