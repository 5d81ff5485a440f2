use std::time::Duration;

use cinebook_auth::Admin;
use cinebook_catalog::{Movie, Screening, Snack};
use cinebook_core::StoreError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Pool, Postgres};
use tracing::info;

use crate::db_error;

/// PostgreSQL-backed store. One pool, shared by every repository trait
/// this type implements.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: Pool<Postgres>,
}

impl PgStore {
    /// Connect with a bounded acquire timeout. Called once at startup;
    /// a connect failure is a startup failure, not something to retry
    /// lazily on first use.
    pub async fn connect(connection_string: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // Write access below is for startup seeding and the (external) admin
    // back-office; the booking flow only ever reads these collections.

    pub async fn insert_movie(&self, movie: &Movie) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO movies (movie_id, movie_name, movie_lang, movie_genre, ratings, movie_description, price, tax_rate, net_amount, poster_url, banner_url, duration_minutes, age_rating, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(movie.movie_id)
        .bind(&movie.movie_name)
        .bind(&movie.movie_lang)
        .bind(&movie.movie_genre)
        .bind(movie.ratings)
        .bind(&movie.movie_description)
        .bind(movie.price)
        .bind(movie.tax_rate)
        .bind(movie.net_amount)
        .bind(&movie.poster_url)
        .bind(&movie.banner_url)
        .bind(movie.duration_minutes)
        .bind(&movie.age_rating)
        .bind(movie.created_at)
        .bind(movie.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    pub async fn insert_screening(&self, screening: &Screening) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO screenings (screening_id, movie_id, date, time, available_seats, total_seats, price_modifier, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(screening.screening_id)
        .bind(screening.movie_id)
        .bind(screening.date)
        .bind(screening.time)
        .bind(screening.available_seats)
        .bind(screening.total_seats)
        .bind(screening.price_modifier)
        .bind(screening.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    pub async fn insert_snack(&self, snack: &Snack) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO snacks (snack_id, name, price, category, available, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(snack.snack_id)
        .bind(&snack.name)
        .bind(snack.price)
        .bind(snack.category.as_str())
        .bind(snack.available)
        .bind(snack.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    pub async fn insert_admin(&self, admin: &Admin) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO admins (admin_id, username, password_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(admin.admin_id)
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(admin.role.as_str())
        .bind(admin.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;
        Ok(())
    }

    pub async fn movie_count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }

    pub async fn snack_count(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM snacks")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }
}
