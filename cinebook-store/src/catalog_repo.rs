use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use cinebook_catalog::{CatalogRepository, Movie, Screening, Snack, SnackRepository};
use cinebook_core::StoreError;
use uuid::Uuid;

use crate::database::PgStore;
use crate::db_error;

#[derive(sqlx::FromRow)]
struct MovieRow {
    movie_id: Uuid,
    movie_name: String,
    movie_lang: String,
    movie_genre: String,
    ratings: f64,
    movie_description: String,
    price: i64,
    tax_rate: f64,
    net_amount: i64,
    poster_url: Option<String>,
    banner_url: Option<String>,
    duration_minutes: i32,
    age_rating: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            movie_id: row.movie_id,
            movie_name: row.movie_name,
            movie_lang: row.movie_lang,
            movie_genre: row.movie_genre,
            ratings: row.ratings,
            movie_description: row.movie_description,
            price: row.price,
            tax_rate: row.tax_rate,
            net_amount: row.net_amount,
            poster_url: row.poster_url,
            banner_url: row.banner_url,
            duration_minutes: row.duration_minutes,
            age_rating: row.age_rating,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ScreeningRow {
    screening_id: Uuid,
    movie_id: Uuid,
    date: NaiveDate,
    time: NaiveTime,
    available_seats: i32,
    total_seats: i32,
    price_modifier: f64,
    created_at: DateTime<Utc>,
}

impl From<ScreeningRow> for Screening {
    fn from(row: ScreeningRow) -> Self {
        Screening {
            screening_id: row.screening_id,
            movie_id: row.movie_id,
            date: row.date,
            time: row.time,
            available_seats: row.available_seats,
            total_seats: row.total_seats,
            price_modifier: row.price_modifier,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SnackRow {
    snack_id: Uuid,
    name: String,
    price: i64,
    category: String,
    available: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<SnackRow> for Snack {
    type Error = StoreError;

    fn try_from(row: SnackRow) -> Result<Self, Self::Error> {
        Ok(Snack {
            snack_id: row.snack_id,
            name: row.name,
            price: row.price,
            category: row.category.parse().map_err(StoreError::Backend)?,
            available: row.available,
            created_at: row.created_at,
        })
    }
}

const MOVIE_COLUMNS: &str = "movie_id, movie_name, movie_lang, movie_genre, ratings, movie_description, price, tax_rate, net_amount, poster_url, banner_url, duration_minutes, age_rating, created_at, updated_at";
const SCREENING_COLUMNS: &str = "screening_id, movie_id, date, time, available_seats, total_seats, price_modifier, created_at";

#[async_trait]
impl CatalogRepository for PgStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        let rows = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY movie_name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn get_movie(&self, movie_id: Uuid) -> Result<Option<Movie>, StoreError> {
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE movie_id = $1"
        ))
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(Movie::from))
    }

    async fn screenings_for_movie(&self, movie_id: Uuid) -> Result<Vec<Screening>, StoreError> {
        let rows = sqlx::query_as::<_, ScreeningRow>(&format!(
            "SELECT {SCREENING_COLUMNS} FROM screenings WHERE movie_id = $1 ORDER BY date, time"
        ))
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(rows.into_iter().map(Screening::from).collect())
    }

    async fn get_screening(&self, screening_id: Uuid) -> Result<Option<Screening>, StoreError> {
        let row = sqlx::query_as::<_, ScreeningRow>(&format!(
            "SELECT {SCREENING_COLUMNS} FROM screenings WHERE screening_id = $1"
        ))
        .bind(screening_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(row.map(Screening::from))
    }
}

#[async_trait]
impl SnackRepository for PgStore {
    async fn list_snacks(&self, available_only: bool) -> Result<Vec<Snack>, StoreError> {
        let query = if available_only {
            "SELECT snack_id, name, price, category, available, created_at FROM snacks WHERE available ORDER BY name"
        } else {
            "SELECT snack_id, name, price, category, available, created_at FROM snacks ORDER BY name"
        };
        let rows = sqlx::query_as::<_, SnackRow>(query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        rows.into_iter().map(Snack::try_from).collect()
    }

    async fn get_snack(&self, snack_id: Uuid) -> Result<Option<Snack>, StoreError> {
        let row = sqlx::query_as::<_, SnackRow>(
            "SELECT snack_id, name, price, category, available, created_at FROM snacks WHERE snack_id = $1",
        )
        .bind(snack_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;
        row.map(Snack::try_from).transpose()
    }
}
