use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Electronics,
    Clothing,
    Sports,
    Home,
    Beauty,
    Books,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 6] = [
        Self::Electronics,
        Self::Clothing,
        Self::Sports,
        Self::Home,
        Self::Beauty,
        Self::Books,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothing => "clothing",
            Self::Sports => "sports",
            Self::Home => "home",
            Self::Beauty => "beauty",
            Self::Books => "books",
        }
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or(())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Sale,
    New,
}

impl Badge {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::New => "new",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: ProductCategory,
    pub price: f64,
    pub original_price: Option<f64>,
    /// Average rating in `[0, 5]`.
    pub rating: f64,
    pub review_count: u32,
    pub in_stock: bool,
    pub badge: Option<Badge>,
    pub description: String,
    pub image_url: String,
}

impl Product {
    /// Case-insensitive substring match over name, category and description.
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.category.as_str().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
