use std::sync::Arc;
use std::time::Duration;

use crate::auth::provider::{FixedIdentityProvider, IdentityProvider, MockIdentityProvider, User};
use crate::config::AppConfig;
use crate::storage::{JsonFileStore, MemoryStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<AppConfig>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Store::new(Arc::new(JsonFileStore::open(&config.data_dir)?));
        let identity = Arc::new(MockIdentityProvider::new(Duration::from_millis(
            config.login_delay_ms,
        ))) as Arc<dyn IdentityProvider>;

        Ok(Self {
            store,
            config,
            identity,
        })
    }

    /// In-memory state with a deterministic identity, for tests.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            data_dir: "./data".into(),
            host: "127.0.0.1".into(),
            port: 0,
            login_delay_ms: 0,
        });

        let demo = User {
            id: uuid::Uuid::from_u128(0xdecade),
            email: "user@example.com".into(),
            name: "مستخدم تجريبي".into(),
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=demo".into(),
            bio: None,
            created_at: time::OffsetDateTime::UNIX_EPOCH,
        };

        Self {
            store: Store::new(Arc::new(MemoryStore::default())),
            config,
            identity: Arc::new(FixedIdentityProvider(demo)) as Arc<dyn IdentityProvider>,
        }
    }
}
