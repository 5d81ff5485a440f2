use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use cinebook_catalog::{Movie, Screening, Snack};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct MovieWithScreenings {
    #[serde(flatten)]
    movie: Movie,
    screenings: Vec<Screening>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/movies", get(list_movies))
        .route("/api/movies/{id}", get(get_movie))
        .route("/api/movies/{id}/screenings", get(list_screenings))
        .route("/api/snacks", get(list_snacks))
}

async fn list_movies(
    State(state): State<AppState>,
) -> Result<Json<Vec<MovieWithScreenings>>, AppError> {
    let movies = state.catalog.list_movies().await?;

    let mut result = Vec::with_capacity(movies.len());
    for movie in movies {
        let screenings = state.catalog.screenings_for_movie(movie.movie_id).await?;
        result.push(MovieWithScreenings { movie, screenings });
    }

    Ok(Json(result))
}

async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<Uuid>,
) -> Result<Json<Movie>, AppError> {
    state
        .catalog
        .get_movie(movie_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))
}

async fn list_screenings(
    State(state): State<AppState>,
    Path(movie_id): Path<Uuid>,
) -> Result<Json<Vec<Screening>>, AppError> {
    if state.catalog.get_movie(movie_id).await?.is_none() {
        return Err(AppError::NotFound("Movie not found".to_string()));
    }
    let screenings = state.catalog.screenings_for_movie(movie_id).await?;
    Ok(Json(screenings))
}

async fn list_snacks(State(state): State<AppState>) -> Result<Json<Vec<Snack>>, AppError> {
    let snacks = state.snacks.list_snacks(true).await?;
    Ok(Json(snacks))
}
