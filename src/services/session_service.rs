use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use serenity::async_trait;
use sqlx::mysql::MySqlPool;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use crate::db;
use crate::models::{Catalog, CurrencyCode};
use crate::services::selection_service::SelectionCoordinator;

/// Sessions untouched for this long are dropped when they can be reloaded
const SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

/// Where active lists are kept between restarts
#[async_trait]
pub trait ActiveListStore: Send + Sync {
    /// Stored (code, is_focused) rows in display order
    async fn load(&self, user_id: u64) -> Result<Vec<(String, bool)>, String>;

    async fn save(&self, user_id: u64, codes: &[String], focused: Option<&str>) -> Result<(), String>;
}

#[async_trait]
impl ActiveListStore for MySqlPool {
    async fn load(&self, user_id: u64) -> Result<Vec<(String, bool)>, String> {
        db::active_currency::get_active_currencies(self, user_id)
            .await
            .map_err(|e| e.to_string())
    }

    async fn save(&self, user_id: u64, codes: &[String], focused: Option<&str>) -> Result<(), String> {
        db::active_currency::replace_active_currencies(self, user_id, codes, focused)
            .await
            .map_err(|e| e.to_string())
    }
}

struct Session {
    coordinator: SelectionCoordinator,
    last_used: Instant,
}

/// Per-user selection state.
///
/// Each user gets their own coordinator. When a store is configured the
/// active list is restored from it on first use and written back after every
/// successful change; otherwise it lasts as long as the process.
pub struct SessionStore {
    catalog: Arc<Catalog>,
    default_currencies: Vec<CurrencyCode>,
    store: Option<Arc<dyn ActiveListStore>>,
    sessions: Mutex<HashMap<u64, Session>>,
}

impl SessionStore {
    pub fn new(
        catalog: Arc<Catalog>,
        default_currencies: Vec<CurrencyCode>,
        store: Option<Arc<dyn ActiveListStore>>,
    ) -> Self {
        Self {
            catalog,
            default_currencies,
            store,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Run a read-only closure against a user's coordinator
    pub async fn view<T>(&self, user_id: u64, f: impl FnOnce(&SelectionCoordinator) -> T) -> T {
        let mut sessions = self.lock_loaded(user_id).await;
        match sessions.get_mut(&user_id) {
            Some(session) => {
                session.last_used = Instant::now();
                f(&session.coordinator)
            }
            None => f(&self.fresh_session()),
        }
    }

    /// Run a mutating closure against a user's coordinator; persist on success.
    ///
    /// The sessions lock is held until the save finishes, so saves land in
    /// the same order as the changes they record.
    pub async fn update<T, E>(
        &self,
        user_id: u64,
        f: impl FnOnce(&mut SelectionCoordinator) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut sessions = self.lock_loaded(user_id).await;
        let session = sessions.entry(user_id).or_insert_with(|| Session {
            coordinator: self.fresh_session(),
            last_used: Instant::now(),
        });
        session.last_used = Instant::now();

        let result = f(&mut session.coordinator);
        if result.is_ok() {
            let (codes, focused) = snapshot_of(&session.coordinator);
            self.persist(user_id, &codes, focused.as_deref()).await;
        }

        result
    }

    /// Lock the sessions map with `user_id` loaded into it
    async fn lock_loaded(&self, user_id: u64) -> tokio::sync::MutexGuard<'_, HashMap<u64, Session>> {
        let mut sessions = self.sessions.lock().await;
        if !sessions.contains_key(&user_id) {
            self.prune_idle(&mut sessions, Instant::now());
            let coordinator = self.load(user_id).await;
            sessions.insert(
                user_id,
                Session {
                    coordinator,
                    last_used: Instant::now(),
                },
            );
        }
        sessions
    }

    /// Drop idle sessions. Only done with a store: without one the session
    /// is the only copy of the list.
    fn prune_idle(&self, sessions: &mut HashMap<u64, Session>, now: Instant) {
        if self.store.is_none() {
            return;
        }

        let before = sessions.len();
        sessions.retain(|_, session| now.saturating_duration_since(session.last_used) < SESSION_IDLE);
        if sessions.len() < before {
            debug!("Dropped {} idle sessions", before - sessions.len());
        }
    }

    async fn load(&self, user_id: u64) -> SelectionCoordinator {
        let Some(store) = &self.store else {
            return self.fresh_session();
        };

        let stored = match store.load(user_id).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Failed to load active currencies for user {}: {}", user_id, e);
                return self.fresh_session();
            }
        };

        if stored.is_empty() {
            debug!("No stored active currencies for user {}, using defaults", user_id);
            return self.fresh_session();
        }

        let codes: Vec<CurrencyCode> = stored
            .iter()
            .filter_map(|(code, _)| CurrencyCode::parse(code).ok())
            .collect();
        let (mut coordinator, dropped) = SelectionCoordinator::restore(self.catalog.clone(), &codes);

        if !dropped.is_empty() {
            info!("Dropped {} stored currencies for user {}: {:?}", dropped.len(), user_id, dropped);
        }

        if let Some(focused) = stored
            .iter()
            .find(|(_, is_focused)| *is_focused)
            .and_then(|(code, _)| CurrencyCode::parse(code).ok())
        {
            // The focused code may have been dropped; the default focus stays then
            let _ = coordinator.focus(&focused);
        }

        coordinator
    }

    fn fresh_session(&self) -> SelectionCoordinator {
        let (coordinator, dropped) =
            SelectionCoordinator::restore(self.catalog.clone(), &self.default_currencies);
        if !dropped.is_empty() {
            warn!("Default currencies missing from catalog: {:?}", dropped);
        }
        coordinator
    }

    async fn persist(&self, user_id: u64, codes: &[String], focused: Option<&str>) {
        let Some(store) = &self.store else {
            return;
        };

        if let Err(e) = store.save(user_id, codes, focused).await {
            warn!("Failed to save active currencies for user {}: {}", user_id, e);
        }
    }
}

fn snapshot_of(coordinator: &SelectionCoordinator) -> (Vec<String>, Option<String>) {
    let codes = coordinator
        .active()
        .iter()
        .map(|c| c.code.to_string())
        .collect();
    let focused = coordinator.focused().map(|c| c.code.to_string());
    (codes, focused)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Currency;
    use crate::utils::errors::SelectionError;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn store() -> SessionStore {
        let catalog = Arc::new(Catalog::new(vec![
            Currency::new(code("USD"), "United States Dollar"),
            Currency::new(code("EUR"), "Euro"),
            Currency::new(code("JPY"), "Japanese Yen"),
        ]));
        SessionStore::new(catalog, vec![code("USD"), code("EUR"), code("XXX")], None)
    }

    /// In-memory store whose first save is the slowest
    #[derive(Default)]
    struct RecordingStore {
        saved: std::sync::Mutex<Vec<Vec<String>>>,
        calls: std::sync::atomic::AtomicU64,
    }

    #[async_trait]
    impl ActiveListStore for RecordingStore {
        async fn load(&self, _user_id: u64) -> Result<Vec<(String, bool)>, String> {
            Ok(Vec::new())
        }

        async fn save(&self, _user_id: u64, codes: &[String], _focused: Option<&str>) -> Result<(), String> {
            let call = self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            let delay = if call == 0 { 50 } else { 0 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.saved.lock().unwrap().push(codes.to_vec());
            Ok(())
        }
    }

    fn store_with(recorder: Arc<RecordingStore>) -> SessionStore {
        let catalog = Arc::new(Catalog::new(vec![
            Currency::new(code("USD"), "United States Dollar"),
            Currency::new(code("EUR"), "Euro"),
            Currency::new(code("JPY"), "Japanese Yen"),
        ]));
        SessionStore::new(catalog, vec![code("USD"), code("EUR")], Some(recorder as Arc<dyn ActiveListStore>))
    }

    fn active_codes(coordinator: &SelectionCoordinator) -> Vec<String> {
        coordinator.active().iter().map(|c| c.code.to_string()).collect()
    }

    #[tokio::test]
    async fn test_new_user_gets_known_defaults() {
        let store = store();
        let codes = store.view(1, active_codes).await;
        assert_eq!(codes, vec!["USD", "EUR"]);
    }

    #[tokio::test]
    async fn test_sessions_are_per_user() {
        let store = store();

        store
            .update(1, |s| s.activate(&code("JPY")).map(|c| c.clone()))
            .await
            .unwrap();

        assert_eq!(store.view(1, active_codes).await, vec!["USD", "EUR", "JPY"]);
        assert_eq!(store.view(2, active_codes).await, vec!["USD", "EUR"]);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_state() {
        let store = store();

        let err = store
            .update(1, |s| s.activate(&code("USD")).map(|c| c.clone()))
            .await
            .unwrap_err();

        assert_eq!(err, SelectionError::AlreadyActive(code("USD")));
        assert_eq!(store.view(1, active_codes).await, vec!["USD", "EUR"]);
    }

    #[tokio::test]
    async fn test_concurrent_updates_save_in_order() {
        let recorder = Arc::new(RecordingStore::default());
        let store = store_with(recorder.clone());

        let (added, removed) = tokio::join!(
            store.update(1, |s| s.activate(&code("JPY")).map(|_| ())),
            store.update(1, |s| s.deactivate(&code("EUR")).map(|_| ())),
        );
        added.unwrap();
        removed.unwrap();

        let current = store.view(1, active_codes).await;
        assert_eq!(current, vec!["USD", "JPY"]);

        let saved = recorder.saved.lock().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved.last(), Some(&current));
    }

    #[tokio::test]
    async fn test_idle_sessions_dropped_only_with_store() {
        let later = Instant::now() + SESSION_IDLE + Duration::from_secs(1);

        let recorded = store_with(Arc::new(RecordingStore::default()));
        recorded.view(1, active_codes).await;
        let mut sessions = recorded.sessions.lock().await;
        recorded.prune_idle(&mut sessions, later);
        assert!(sessions.is_empty());
        drop(sessions);

        let memory_only = store();
        memory_only.view(1, active_codes).await;
        let mut sessions = memory_only.sessions.lock().await;
        memory_only.prune_idle(&mut sessions, later);
        assert_eq!(sessions.len(), 1);
    }
}
