use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

/// Opaque identity collaborator. Login is asynchronous and may fail; the
/// session itself lives in the store (`current-user`), not here.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self) -> anyhow::Result<User>;
}

/// Stand-in for a real OAuth flow: resolves a demo identity after a fixed
/// delay, like the mocked login it replaces.
pub struct MockIdentityProvider {
    delay: Duration,
}

impl MockIdentityProvider {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn demo_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "user@example.com".into(),
            name: "مستخدم تجريبي".into(),
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=demo".into(),
            bio: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn login(&self) -> anyhow::Result<User> {
        tokio::time::sleep(self.delay).await;
        Ok(Self::demo_user())
    }
}

/// Deterministic test double: always resolves the same user, immediately.
pub struct FixedIdentityProvider(pub User);

#[async_trait]
impl IdentityProvider for FixedIdentityProvider {
    async fn login(&self) -> anyhow::Result<User> {
        Ok(self.0.clone())
    }
}
