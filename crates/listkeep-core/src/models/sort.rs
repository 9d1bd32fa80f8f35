use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Product, Task};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogSortKey {
    /// Seed order.
    #[default]
    Default,
    PriceLow,
    PriceHigh,
    Rating,
    Name,
    Newest,
}

impl CatalogSortKey {
    pub const ALL: [CatalogSortKey; 6] = [
        Self::Default,
        Self::PriceLow,
        Self::PriceHigh,
        Self::Rating,
        Self::Name,
        Self::Newest,
    ];

    pub fn coerce(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Name => "name",
            Self::Newest => "newest",
        }
    }

    /// Primary-key ordering only; callers break ties by collection position.
    pub fn compare(self, left: &Product, right: &Product) -> Ordering {
        match self {
            Self::Default => Ordering::Equal,
            Self::PriceLow => left.price.total_cmp(&right.price),
            Self::PriceHigh => right.price.total_cmp(&left.price),
            Self::Rating => right.rating.total_cmp(&left.rating),
            Self::Name => compare_text(&left.name, &right.name),
            Self::Newest => right.id.cmp(&left.id),
        }
    }
}

impl std::str::FromStr for CatalogSortKey {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or(())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskSortKey {
    /// Collection order, newest additions first.
    #[default]
    Default,
    DueDate,
    Title,
    Newest,
}

impl TaskSortKey {
    pub const ALL: [TaskSortKey; 4] = [Self::Default, Self::DueDate, Self::Title, Self::Newest];

    pub fn coerce(raw: &str) -> Self {
        raw.trim().parse().unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::DueDate => "due-date",
            Self::Title => "title",
            Self::Newest => "newest",
        }
    }

    pub fn compare(self, left: &Task, right: &Task) -> Ordering {
        match self {
            Self::Default => Ordering::Equal,
            Self::DueDate => match (left.due_at, right.due_at) {
                (Some(left), Some(right)) => left.cmp(&right),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::Title => compare_text(&left.title, &right.title),
            Self::Newest => right.created_at.cmp(&left.created_at),
        }
    }
}

impl std::str::FromStr for TaskSortKey {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or(())
    }
}

/// Case-insensitive; names differing only in case compare equal.
fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase().cmp(&right.to_lowercase())
}
