//! In-memory store for tests and local development.
//!
//! Every collection lives behind one mutex, so `commit_booking` holds the
//! lock across the availability check, the decrement, and the inserts —
//! the serialization the booking path requires when there is no
//! transactional backend underneath.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use cinebook_auth::{Admin, Session, SessionRepository, User, UserRepository};
use cinebook_booking::{Booking, BookingSnack, BookingStore};
use cinebook_catalog::{CatalogRepository, Movie, Screening, Snack, SnackRepository};
use cinebook_core::{Amount, StoreError};
use uuid::Uuid;

#[derive(Default)]
struct Collections {
    movies: HashMap<Uuid, Movie>,
    screenings: HashMap<Uuid, Screening>,
    snacks: HashMap<Uuid, Snack>,
    bookings: HashMap<Uuid, Booking>,
    booking_snacks: Vec<BookingSnack>,
    users: HashMap<Uuid, User>,
    admins: HashMap<Uuid, Admin>,
    sessions: HashMap<String, Session>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert_movie(&self, movie: Movie) {
        self.lock().movies.insert(movie.movie_id, movie);
    }

    pub fn insert_screening(&self, screening: Screening) {
        self.lock()
            .screenings
            .insert(screening.screening_id, screening);
    }

    pub fn insert_snack(&self, snack: Snack) {
        self.lock().snacks.insert(snack.snack_id, snack);
    }

    pub fn insert_admin(&self, admin: Admin) {
        self.lock().admins.insert(admin.admin_id, admin);
    }

    /// Catalog price edit, used to show line-item snapshots stay intact.
    pub fn set_snack_price(&self, snack_id: Uuid, price: Amount) {
        if let Some(snack) = self.lock().snacks.get_mut(&snack_id) {
            snack.price = price;
        }
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        let mut movies: Vec<Movie> = self.lock().movies.values().cloned().collect();
        movies.sort_by(|a, b| a.movie_name.cmp(&b.movie_name));
        Ok(movies)
    }

    async fn get_movie(&self, movie_id: Uuid) -> Result<Option<Movie>, StoreError> {
        Ok(self.lock().movies.get(&movie_id).cloned())
    }

    async fn screenings_for_movie(&self, movie_id: Uuid) -> Result<Vec<Screening>, StoreError> {
        let mut screenings: Vec<Screening> = self
            .lock()
            .screenings
            .values()
            .filter(|s| s.movie_id == movie_id)
            .cloned()
            .collect();
        screenings.sort_by_key(|s| (s.date, s.time));
        Ok(screenings)
    }

    async fn get_screening(&self, screening_id: Uuid) -> Result<Option<Screening>, StoreError> {
        Ok(self.lock().screenings.get(&screening_id).cloned())
    }
}

#[async_trait]
impl SnackRepository for MemoryStore {
    async fn list_snacks(&self, available_only: bool) -> Result<Vec<Snack>, StoreError> {
        let mut snacks: Vec<Snack> = self
            .lock()
            .snacks
            .values()
            .filter(|s| !available_only || s.available)
            .cloned()
            .collect();
        snacks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(snacks)
    }

    async fn get_snack(&self, snack_id: Uuid) -> Result<Option<Snack>, StoreError> {
        Ok(self.lock().snacks.get(&snack_id).cloned())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn commit_booking(
        &self,
        booking: &Booking,
        snacks: &[BookingSnack],
    ) -> Result<(), StoreError> {
        let mut inner = self.lock();

        let screening = inner
            .screenings
            .get_mut(&booking.screening_id)
            .ok_or_else(|| StoreError::NotFound(format!("screening {}", booking.screening_id)))?;

        if screening.available_seats < booking.seats_booked {
            return Err(StoreError::SeatConflict {
                requested: booking.seats_booked,
                available: screening.available_seats,
            });
        }
        screening.available_seats -= booking.seats_booked;

        inner.bookings.insert(booking.booking_id, booking.clone());
        inner.booking_snacks.extend_from_slice(snacks);
        Ok(())
    }

    async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>, StoreError> {
        Ok(self.lock().bookings.get(&booking_id).cloned())
    }

    async fn bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        let mut bookings: Vec<Booking> = self
            .lock()
            .bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    async fn snacks_for_booking(
        &self,
        booking_id: Uuid,
    ) -> Result<Vec<BookingSnack>, StoreError> {
        Ok(self
            .lock()
            .booking_snacks
            .iter()
            .filter(|item| item.booking_id == booking_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create_user(&self, user: &User) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate { field: "username" });
        }
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate { field: "email" });
        }
        inner.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn user_by_id(&self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.lock().users.get(&user_id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn admin_by_username(&self, username: &str) -> Result<Option<Admin>, StoreError> {
        Ok(self
            .lock()
            .admins
            .values()
            .find(|a| a.username == username)
            .cloned())
    }
}

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn insert_session(&self, session: &Session) -> Result<(), StoreError> {
        self.lock()
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn get_session(&self, token: &str) -> Result<Option<Session>, StoreError> {
        Ok(self.lock().sessions.get(token).cloned())
    }

    async fn delete_session(&self, token: &str) -> Result<(), StoreError> {
        self.lock().sessions.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveTime, Utc};
    use cinebook_catalog::SnackCategory;

    fn sample_screening(available: i32) -> Screening {
        let mut screening = Screening::new(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            100,
            1.0,
        );
        screening.available_seats = available;
        screening
    }

    fn sample_booking(screening_id: Uuid, seats: i32) -> Booking {
        Booking::new(Uuid::new_v4(), screening_id, seats, 270, 0)
    }

    #[tokio::test]
    async fn test_commit_decrements_and_persists_together() {
        let store = MemoryStore::new();
        let screening = sample_screening(5);
        let screening_id = screening.screening_id;
        store.insert_screening(screening);

        let booking = sample_booking(screening_id, 3);
        store.commit_booking(&booking, &[]).await.unwrap();

        let stored = store.get_screening(screening_id).await.unwrap().unwrap();
        assert_eq!(stored.available_seats, 2);
        assert!(store
            .get_booking(booking.booking_id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_commit_conflict_leaves_no_trace() {
        let store = MemoryStore::new();
        let screening = sample_screening(2);
        let screening_id = screening.screening_id;
        store.insert_screening(screening);

        let booking = sample_booking(screening_id, 3);
        let err = store.commit_booking(&booking, &[]).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::SeatConflict {
                requested: 3,
                available: 2
            }
        ));

        // Neither side of the atomic unit happened.
        let stored = store.get_screening(screening_id).await.unwrap().unwrap();
        assert_eq!(stored.available_seats, 2);
        assert!(store
            .get_booking(booking.booking_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_commit_unknown_screening() {
        let store = MemoryStore::new();
        let booking = sample_booking(Uuid::new_v4(), 1);
        let err = store.commit_booking(&booking, &[]).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_username_and_email_rejected() {
        let store = MemoryStore::new();
        let user = User::new(
            "First User".to_string(),
            "first".to_string(),
            "first@example.com".to_string(),
            "9876543210".to_string(),
            "blob".to_string(),
        );
        store.create_user(&user).await.unwrap();

        let same_username = User::new(
            "Second User".to_string(),
            "first".to_string(),
            "second@example.com".to_string(),
            "9876543210".to_string(),
            "blob".to_string(),
        );
        assert!(matches!(
            store.create_user(&same_username).await.unwrap_err(),
            StoreError::Duplicate { field: "username" }
        ));

        let same_email = User::new(
            "Third User".to_string(),
            "third".to_string(),
            "first@example.com".to_string(),
            "9876543210".to_string(),
            "blob".to_string(),
        );
        assert!(matches!(
            store.create_user(&same_email).await.unwrap_err(),
            StoreError::Duplicate { field: "email" }
        ));
    }

    #[tokio::test]
    async fn test_session_delete_is_idempotent() {
        let store = MemoryStore::new();
        let session = Session {
            token: "tok".to_string(),
            user_id: Uuid::new_v4(),
            expires_at: Utc::now() + Duration::hours(1),
        };
        store.insert_session(&session).await.unwrap();

        store.delete_session("tok").await.unwrap();
        assert!(store.get_session("tok").await.unwrap().is_none());
        // Second delete is a no-op, not an error.
        store.delete_session("tok").await.unwrap();
    }

    #[tokio::test]
    async fn test_unavailable_snacks_filtered() {
        let store = MemoryStore::new();
        let mut snack = Snack::new("Cola".to_string(), 80, SnackCategory::Drinks);
        snack.available = false;
        store.insert_snack(snack);
        store.insert_snack(Snack::new(
            "Candy Mix".to_string(),
            60,
            SnackCategory::Candy,
        ));

        assert_eq!(store.list_snacks(true).await.unwrap().len(), 1);
        assert_eq!(store.list_snacks(false).await.unwrap().len(), 2);
    }
}
