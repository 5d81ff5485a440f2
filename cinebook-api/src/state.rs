use std::sync::Arc;

use cinebook_auth::{Authenticator, SessionManager, SessionRepository, UserRepository};
use cinebook_booking::{BookingEngine, BookingRules, BookingStore};
use cinebook_catalog::{CatalogRepository, SnackRepository};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<BookingEngine>,
    pub sessions: Arc<SessionManager>,
    pub auth: Arc<Authenticator>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub snacks: Arc<dyn SnackRepository>,
    pub bookings: Arc<dyn BookingStore>,
}

impl AppState {
    /// Wire every component against one backing store. Both `PgStore` and
    /// `MemoryStore` implement the full set of repository traits.
    pub fn from_store<S>(store: Arc<S>, rules: BookingRules) -> Self
    where
        S: CatalogRepository
            + SnackRepository
            + BookingStore
            + UserRepository
            + SessionRepository
            + 'static,
    {
        let catalog: Arc<dyn CatalogRepository> = store.clone();
        let snacks: Arc<dyn SnackRepository> = store.clone();
        let bookings: Arc<dyn BookingStore> = store.clone();
        let users: Arc<dyn UserRepository> = store.clone();
        let session_store: Arc<dyn SessionRepository> = store;

        Self {
            engine: Arc::new(BookingEngine::new(
                catalog.clone(),
                snacks.clone(),
                bookings.clone(),
                rules,
            )),
            sessions: Arc::new(SessionManager::new(session_store)),
            auth: Arc::new(Authenticator::new(users)),
            catalog,
            snacks,
            bookings,
        }
    }
}
