use chrono::{DateTime, Utc};
use cinebook_core::Amount;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnackCategory {
    Popcorn,
    Drinks,
    Candy,
    Combo,
}

impl SnackCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnackCategory::Popcorn => "popcorn",
            SnackCategory::Drinks => "drinks",
            SnackCategory::Candy => "candy",
            SnackCategory::Combo => "combo",
        }
    }
}

impl std::str::FromStr for SnackCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popcorn" => Ok(SnackCategory::Popcorn),
            "drinks" => Ok(SnackCategory::Drinks),
            "candy" => Ok(SnackCategory::Candy),
            "combo" => Ok(SnackCategory::Combo),
            other => Err(format!("unknown snack category: {other}")),
        }
    }
}

/// A concession catalog entry. Bookings snapshot the price at booking time,
/// so edits here never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snack {
    pub snack_id: Uuid,
    pub name: String,
    pub price: Amount,
    pub category: SnackCategory,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl Snack {
    pub fn new(name: String, price: Amount, category: SnackCategory) -> Self {
        Self {
            snack_id: Uuid::new_v4(),
            name,
            price,
            category,
            available: true,
            created_at: Utc::now(),
        }
    }
}
