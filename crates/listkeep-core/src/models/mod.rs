pub mod error;
pub mod filter;
pub mod notification;
pub mod product;
pub mod sort;
pub mod task;
pub mod theme;

pub use error::{CoreError, CoreErrorKind, CoreResult};
pub use filter::{
    CatalogFilter, CatalogFilterDimension, CategoryFilter, PriceRange, RatingThreshold,
    StatusFilter, TaskFilter, TaskFilterDimension,
};
pub use notification::{Notification, Severity};
pub use product::{Badge, Product, ProductCategory, ProductId};
pub use sort::{CatalogSortKey, TaskSortKey};
pub use task::{
    DEFAULT_TASK_CATEGORY, Task, TaskDraft, TaskId, TaskPatch, TaskStats, normalize_category,
};
pub use theme::Theme;
