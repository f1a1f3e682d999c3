//! Per-visitor state that a browser storefront would keep in local storage.

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{sync::RwLock, task::JoinHandle, time::Instant};
use uuid::Uuid;

use crate::{cart::Cart, models::AdminUser, orders::OrderBoard};

pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Default)]
pub struct Session {
    pub cart: Cart,
    pub token: Option<String>,
    pub user: Option<AdminUser>,
    pub last_order_id: Option<String>,
    pub orders: OrderBoard,
}

impl Session {
    pub fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
        self.orders = OrderBoard::default();
    }
}

#[derive(Debug)]
struct Entry {
    session: Session,
    last_seen: Instant,
}

impl Entry {
    fn new() -> Self {
        Self {
            session: Session::default(),
            last_seen: Instant::now(),
        }
    }

    fn touch(&mut self) -> &mut Session {
        self.last_seen = Instant::now();
        &mut self.session
    }
}

/// Sessions keyed by id. Access goes through closures so a lock is never held
/// across an await point. Any access refreshes a session; sessions left alone for
/// longer than the idle TTL are dropped by [`SessionStore::evict_idle`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::default(),
            idle_ttl,
        }
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(id, Entry::new());
        tracing::debug!(session_id = %id, "session created");
        id
    }

    /// Reads a session; an unknown id reads as a fresh, empty session and is not
    /// stored.
    pub async fn read<R>(&self, id: Uuid, f: impl FnOnce(&Session) -> R) -> R {
        let mut sessions = self.inner.write().await;
        match sessions.get_mut(&id) {
            Some(entry) => f(entry.touch()),
            None => f(&Session::default()),
        }
    }

    /// Mutates a session, creating it on first use.
    pub async fn write<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.inner.write().await;
        f(sessions.entry(id).or_insert_with(Entry::new).touch())
    }

    /// Mutates an existing session only. `None` when the id is unknown.
    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let mut sessions = self.inner.write().await;
        sessions.get_mut(&id).map(|entry| f(entry.touch()))
    }

    /// Drops sessions idle for at least the TTL and returns how many went.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < self.idle_ttl);
        before - sessions.len()
    }

    /// Runs [`SessionStore::evict_idle`] every `every` until the handle is aborted.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle().await;
                if evicted > 0 {
                    let remaining = store.len().await;
                    tracing::info!(evicted, remaining, "idle sessions evicted");
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_session_reads_empty_and_write_creates() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();

        assert!(store.read(id, |s| s.cart.is_empty()).await);
        assert!(store.is_empty().await);

        store
            .write(id, |s| s.last_order_id = Some("42".into()))
            .await;
        assert_eq!(store.read(id, |s| s.last_order_id.clone()).await.as_deref(), Some("42"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn update_skips_unknown_sessions() {
        let store = SessionStore::new();
        let known = store.create().await;

        assert_eq!(store.update(Uuid::new_v4(), |s| s.cart.clear()).await, None);
        assert_eq!(store.update(known, |s| s.cart.len()).await, Some(0));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.create().await;
        let b = store.create().await;

        store.write(a, |s| s.token = Some("secret".into())).await;

        assert!(store.read(b, |s| s.token.is_none()).await);
        assert!(store.read(a, |s| s.token.is_some()).await);
    }

    #[tokio::test]
    async fn sign_out_keeps_shopper_state() {
        let store = SessionStore::new();
        let id = store.create().await;
        store
            .write(id, |s| {
                s.token = Some("t".into());
                s.last_order_id = Some("9".into());
                s.sign_out();
            })
            .await;

        assert!(store.read(id, |s| s.token.is_none()).await);
        assert!(store.read(id, |s| s.last_order_id.is_some()).await);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_are_evicted_and_access_refreshes() {
        let store = SessionStore::with_idle_ttl(Duration::from_secs(60));
        let idle = store.create().await;
        let active = store.create().await;

        tokio::time::advance(Duration::from_secs(45)).await;
        store.read(active, |_| ()).await;
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_eq!(store.evict_idle().await, 1);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.update(idle, |_| ()).await, None);
        assert_eq!(store.update(active, |_| ()).await, Some(()));
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_evicts_in_the_background() {
        let store = SessionStore::with_idle_ttl(Duration::from_secs(10));
        store.create().await;

        let sweeper = store.spawn_sweeper(Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(16)).await;

        assert!(store.is_empty().await);
        sweeper.abort();
    }
}
