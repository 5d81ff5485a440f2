//! First-run sample data, applied idempotently after migrations.

use chrono::{Duration, NaiveTime, Utc};
use cinebook_auth::credentials::hash_password;
use cinebook_auth::{Admin, AdminRole, UserRepository};
use cinebook_catalog::{Movie, Screening, Snack, SnackCategory};
use cinebook_core::StoreError;
use tracing::info;

use crate::database::PgStore;

/// Showtimes per day; the evening slots carry the premium modifier.
const SHOWTIMES: [(u32, f64); 5] = [
    (10, 1.0),
    (13, 1.0),
    (16, 1.0),
    (19, 1.2),
    (22, 1.2),
];

const SEED_DAYS: i64 = 7;
const SEATS_PER_SCREENING: i32 = 100;

/// Populate the default admin, sample movies with a week of screenings,
/// and the snack catalog — only into collections that are still empty.
pub async fn ensure_seed_data(store: &PgStore) -> Result<(), StoreError> {
    if store.admin_by_username("admin").await?.is_none() {
        let admin = Admin::new(
            "admin".to_string(),
            hash_password("admin123"),
            AdminRole::SuperAdmin,
        );
        store.insert_admin(&admin).await?;
        info!("seeded default admin account");
    }

    if store.movie_count().await? == 0 {
        let movies = sample_movies();
        let today = Utc::now().date_naive();

        for movie in &movies {
            store.insert_movie(movie).await?;

            for day in 0..SEED_DAYS {
                let date = today + Duration::days(day);
                for (hour, price_modifier) in SHOWTIMES {
                    let time = NaiveTime::from_hms_opt(hour, 0, 0).expect("static showtime");
                    let screening = Screening::new(
                        movie.movie_id,
                        date,
                        time,
                        SEATS_PER_SCREENING,
                        price_modifier,
                    );
                    store.insert_screening(&screening).await?;
                }
            }
        }
        info!(movies = movies.len(), "seeded movie catalog and screenings");
    }

    if store.snack_count().await? == 0 {
        for snack in sample_snacks() {
            store.insert_snack(&snack).await?;
        }
        info!("seeded snack catalog");
    }

    Ok(())
}

fn sample_movies() -> Vec<Movie> {
    let mut black_panther = Movie::new(
        "Black Panther".to_string(),
        "English".to_string(),
        "Action, Superhero".to_string(),
        9.5,
        "T'Challa, heir to the hidden but advanced kingdom of Wakanda, must step forward to lead his people into a new future.".to_string(),
        250,
        8.0,
        134,
        "13+".to_string(),
    );
    black_panther.poster_url = Some("/static/images/movies/black-panther.png".to_string());
    black_panther.banner_url = Some("/static/images/black-banner.png".to_string());

    let mut supergirl = Movie::new(
        "Supergirl".to_string(),
        "English".to_string(),
        "Action, Superhero".to_string(),
        8.5,
        "Kara Zor-El, Superman's cousin, discovers her powers and becomes Earth's newest protector.".to_string(),
        220,
        8.0,
        120,
        "13+".to_string(),
    );
    supergirl.poster_url = Some("/static/images/series/supergirl.jpg".to_string());
    supergirl.banner_url = Some("/static/images/supergirl-banner.jpg".to_string());

    let mut wanda_vision = Movie::new(
        "Wanda Vision".to_string(),
        "English".to_string(),
        "Fantasy, Drama".to_string(),
        9.0,
        "Wanda Maximoff and Vision live idealized suburban lives, hiding their true powers.".to_string(),
        280,
        8.0,
        150,
        "13+".to_string(),
    );
    wanda_vision.poster_url = Some("/static/images/series/wanda.png".to_string());
    wanda_vision.banner_url = Some("/static/images/wanda-banner.jpg".to_string());

    vec![black_panther, supergirl, wanda_vision]
}

fn sample_snacks() -> Vec<Snack> {
    vec![
        Snack::new("Large Popcorn".to_string(), 150, SnackCategory::Popcorn),
        Snack::new("Medium Popcorn".to_string(), 100, SnackCategory::Popcorn),
        Snack::new("Cola".to_string(), 80, SnackCategory::Drinks),
        Snack::new("Candy Mix".to_string(), 60, SnackCategory::Candy),
        Snack::new("Popcorn & Drink Combo".to_string(), 200, SnackCategory::Combo),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_movies_net_amounts() {
        let movies = sample_movies();
        let nets: Vec<i64> = movies.iter().map(|m| m.net_amount).collect();
        assert_eq!(nets, vec![270, 238, 302]);
    }

    #[test]
    fn test_premium_showtimes() {
        let premium: Vec<u32> = SHOWTIMES
            .iter()
            .filter(|(_, modifier)| *modifier > 1.0)
            .map(|(hour, _)| *hour)
            .collect();
        assert_eq!(premium, vec![19, 22]);
    }
}
