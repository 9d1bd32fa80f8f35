use serde::{Deserialize, Serialize};

use crate::models::{Product, ProductCategory, Task};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ProductCategory),
}

impl CategoryFilter {
    /// Unknown categories fall back to `All`.
    pub fn coerce(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_str(),
        }
    }

    pub fn matches(self, category: ProductCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == category,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            return Ok(Self::All);
        }
        value.parse::<ProductCategory>().map(Self::Only)
    }
}

/// Fixed price buckets. Bounds are inclusive on both ends and the top
/// bucket is open-ended.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PriceRange {
    #[default]
    All,
    UpTo50,
    From50To100,
    From100To200,
    From200To500,
    Over500,
}

impl PriceRange {
    pub const BUCKETS: [PriceRange; 5] = [
        Self::UpTo50,
        Self::From50To100,
        Self::From100To200,
        Self::From200To500,
        Self::Over500,
    ];

    pub fn coerce(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::UpTo50 => "0-50",
            Self::From50To100 => "50-100",
            Self::From100To200 => "100-200",
            Self::From200To500 => "200-500",
            Self::Over500 => "500+",
        }
    }

    pub fn bounds(self) -> (f64, Option<f64>) {
        match self {
            Self::All => (0.0, None),
            Self::UpTo50 => (0.0, Some(50.0)),
            Self::From50To100 => (50.0, Some(100.0)),
            Self::From100To200 => (100.0, Some(200.0)),
            Self::From200To500 => (200.0, Some(500.0)),
            Self::Over500 => (500.0, None),
        }
    }

    pub fn contains(self, price: f64) -> bool {
        let (min, max) = self.bounds();
        match max {
            Some(max) => price >= min && price <= max,
            None => price >= min,
        }
    }
}

impl std::str::FromStr for PriceRange {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            return Ok(Self::All);
        }
        Self::BUCKETS
            .into_iter()
            .find(|bucket| bucket.as_str() == value)
            .ok_or(())
    }
}

/// Minimum average rating; `0` disables the filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingThreshold(f64);

impl RatingThreshold {
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && (0.0..=Self::MAX).contains(&value)).then_some(Self(value))
    }

    pub fn coerce(raw: &str) -> Self {
        raw.trim()
            .parse::<f64>()
            .ok()
            .and_then(Self::new)
            .unwrap_or_default()
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_active(self) -> bool {
        self.0 > 0.0
    }

    pub fn admits(self, rating: f64) -> bool {
        !self.is_active() || rating >= self.0
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CatalogFilterDimension {
    Category,
    PriceRange,
    MinRating,
    Search,
}

impl CatalogFilterDimension {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::PriceRange => "price_range",
            Self::MinRating => "min_rating",
            Self::Search => "search",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub category: CategoryFilter,
    pub price_range: PriceRange,
    pub min_rating: RatingThreshold,
    pub search: String,
}

impl CatalogFilter {
    /// Sets one dimension from raw control input, coercing out-of-domain
    /// values to that dimension's default.
    pub fn set(&mut self, dimension: CatalogFilterDimension, raw: &str) {
        match dimension {
            CatalogFilterDimension::Category => self.category = CategoryFilter::coerce(raw),
            CatalogFilterDimension::PriceRange => self.price_range = PriceRange::coerce(raw),
            CatalogFilterDimension::MinRating => self.min_rating = RatingThreshold::coerce(raw),
            CatalogFilterDimension::Search => self.search = raw.to_string(),
        }
    }

    pub fn reset(&mut self, dimension: CatalogFilterDimension) {
        match dimension {
            CatalogFilterDimension::Category => self.category = CategoryFilter::All,
            CatalogFilterDimension::PriceRange => self.price_range = PriceRange::All,
            CatalogFilterDimension::MinRating => self.min_rating = RatingThreshold::default(),
            CatalogFilterDimension::Search => self.search.clear(),
        }
    }

    pub fn is_active(&self, dimension: CatalogFilterDimension) -> bool {
        match dimension {
            CatalogFilterDimension::Category => self.category != CategoryFilter::All,
            CatalogFilterDimension::PriceRange => self.price_range != PriceRange::All,
            CatalogFilterDimension::MinRating => self.min_rating.is_active(),
            CatalogFilterDimension::Search => !self.search.is_empty(),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        product.matches_search(&self.search.to_lowercase())
            && self.category.matches(product.category)
            && self.price_range.contains(product.price)
            && self.min_rating.admits(product.rating)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn coerce(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn admits(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TaskFilterDimension {
    Status,
    Search,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub search: String,
}

impl TaskFilter {
    pub fn set(&mut self, dimension: TaskFilterDimension, raw: &str) {
        match dimension {
            TaskFilterDimension::Status => self.status = StatusFilter::coerce(raw),
            TaskFilterDimension::Search => self.search = raw.to_string(),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        task.matches_search(&self.search.to_lowercase()) && self.status.admits(task.completed)
    }
}
