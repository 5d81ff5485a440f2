use chrono::{DateTime, Utc};
use cinebook_core::Amount;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A movie in the catalog. Read-only from the booking flow's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub movie_id: Uuid,
    pub movie_name: String,
    pub movie_lang: String,
    /// Comma-joined genre tags, e.g. "Action, Superhero".
    pub movie_genre: String,
    pub ratings: f64,
    pub movie_description: String,
    /// Base ticket price before tax.
    pub price: Amount,
    /// Tax rate in percent.
    pub tax_rate: f64,
    /// price + tax, the figure screenings apply their modifier to.
    pub net_amount: Amount,
    pub poster_url: Option<String>,
    pub banner_url: Option<String>,
    pub duration_minutes: i32,
    pub age_rating: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Movie {
    pub fn new(
        movie_name: String,
        movie_lang: String,
        movie_genre: String,
        ratings: f64,
        movie_description: String,
        price: Amount,
        tax_rate: f64,
        duration_minutes: i32,
        age_rating: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            movie_id: Uuid::new_v4(),
            movie_name,
            movie_lang,
            movie_genre,
            ratings,
            movie_description,
            price,
            tax_rate,
            net_amount: cinebook_core::money::net_amount(price, tax_rate),
            poster_url: None,
            banner_url: None,
            duration_minutes,
            age_rating,
            created_at: now,
            updated_at: now,
        }
    }
}
