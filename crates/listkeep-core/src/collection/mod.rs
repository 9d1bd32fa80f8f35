//! Filter / sort / paginate machinery shared by the catalog and task list.

use std::cmp::Ordering;
use std::fmt::Debug;

pub mod signal;
pub mod view;

pub use signal::{RenderFrame, SignalQueue, ViewSignal};
pub use view::{DerivedView, DisplayState, Pagination};

/// An item kept in an authoritative collection and shown through a
/// [`DerivedView`].
pub trait Listing: Clone {
    type Filter: Clone + Debug + Default;
    type SortKey: Copy + Debug + Default + Eq;

    /// All active predicates of `filter`, AND-combined.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Primary-key ordering for `key`. Equal items keep their collection
    /// order.
    fn compare(&self, other: &Self, key: Self::SortKey) -> Ordering;
}
