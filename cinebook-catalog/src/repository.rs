use async_trait::async_trait;
use cinebook_core::StoreError;
use uuid::Uuid;

use crate::movie::Movie;
use crate::screening::Screening;
use crate::snack::Snack;

/// Read-only access to movies and their screenings.
///
/// Pure reads with no caching guarantees; callers must tolerate repeated
/// calls returning fresh data.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError>;

    async fn get_movie(&self, movie_id: Uuid) -> Result<Option<Movie>, StoreError>;

    async fn screenings_for_movie(&self, movie_id: Uuid) -> Result<Vec<Screening>, StoreError>;

    async fn get_screening(&self, screening_id: Uuid) -> Result<Option<Screening>, StoreError>;
}

/// Read access to the snack catalog, used by the booking engine for price
/// lookups.
#[async_trait]
pub trait SnackRepository: Send + Sync {
    async fn list_snacks(&self, available_only: bool) -> Result<Vec<Snack>, StoreError>;

    async fn get_snack(&self, snack_id: Uuid) -> Result<Option<Snack>, StoreError>;
}
