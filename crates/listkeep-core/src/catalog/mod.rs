use std::cmp::Ordering;
use std::sync::Arc;

use crate::collection::{
    DerivedView, DisplayState, Listing, Pagination, RenderFrame, SignalQueue, ViewSignal,
};
use crate::config::CatalogConfig;
use crate::models::{
    CatalogFilter, CatalogFilterDimension, CatalogSortKey, CoreError, CoreResult, Product,
    ProductId, Severity,
};
use crate::persistence::{KeyValueStore, StorageKeys, load_snapshot, save_snapshot};

pub mod seed;

pub use seed::seed_products;

impl Listing for Product {
    type Filter = CatalogFilter;
    type SortKey = CatalogSortKey;

    fn matches(&self, filter: &Self::Filter) -> bool {
        filter.matches(self)
    }

    fn compare(&self, other: &Self, key: Self::SortKey) -> Ordering {
        key.compare(self, other)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    pub product: Product,
    pub wishlisted: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CatalogSummary {
    pub wishlist_count: usize,
}

pub type CatalogFrame = RenderFrame<CatalogEntry, CatalogSummary>;
pub type CatalogSignal = ViewSignal<CatalogEntry, CatalogSummary>;

/// One removable chip describing an active filter dimension.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActiveFilter {
    pub dimension: CatalogFilterDimension,
    pub label: String,
}

/// Product catalog state: the seed products, the derived view over them and
/// the persisted wishlist.
pub struct CatalogManager {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    products: Vec<Product>,
    wishlist: Vec<ProductId>,
    view: DerivedView<Product>,
    signals: SignalQueue<CatalogEntry, CatalogSummary>,
}

impl CatalogManager {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        config: &CatalogConfig,
        products: Vec<Product>,
    ) -> Self {
        Self {
            store,
            keys: config.storage_keys(),
            products,
            wishlist: Vec::new(),
            view: DerivedView::new(config.page_size),
            signals: SignalQueue::new(config.notification_ttl()),
        }
    }

    pub fn with_seed_catalog(store: Arc<dyn KeyValueStore>, config: &CatalogConfig) -> Self {
        Self::new(store, config, seed_products())
    }

    /// Loads the persisted wishlist (anything unreadable counts as empty),
    /// derives the first view and emits the initial render. Duplicate ids
    /// and ids missing from the catalog are dropped, and the cleaned list
    /// is written back.
    pub fn initialize(&mut self) {
        let key = self.keys.wishlist();
        let stored: Vec<ProductId> = load_snapshot(self.store.as_ref(), &key).unwrap_or_default();
        let stored_len = stored.len();

        self.wishlist.clear();
        for id in stored {
            if self.product(id).is_some() && !self.wishlist.contains(&id) {
                self.wishlist.push(id);
            }
        }
        if self.wishlist.len() != stored_len {
            tracing::warn!(
                namespace = self.keys.namespace(),
                dropped = stored_len - self.wishlist.len(),
                "dropping stale wishlist entries"
            );
            self.persist_wishlist();
        }

        self.view.rederive(&self.products);
        tracing::info!(
            namespace = self.keys.namespace(),
            products = self.products.len(),
            wishlisted = self.wishlist.len(),
            "catalog initialized"
        );
        self.emit_render();
    }

    /// Sets one filter dimension from raw control input. Out-of-domain
    /// values fall back to the dimension's default.
    pub fn set_filter(&mut self, dimension: CatalogFilterDimension, raw: &str) {
        let mut filter = self.view.filter().clone();
        filter.set(dimension, raw);
        self.apply_filter(filter);
    }

    pub fn search(&mut self, text: &str) {
        self.set_filter(CatalogFilterDimension::Search, text);
    }

    pub fn remove_filter(&mut self, dimension: CatalogFilterDimension) {
        let mut filter = self.view.filter().clone();
        filter.reset(dimension);
        tracing::debug!(
            namespace = self.keys.namespace(),
            dimension = dimension.as_str(),
            "catalog filter removed"
        );
        self.apply_filter(filter);
    }

    /// Resets every filter dimension and the sort key.
    pub fn clear_all_filters(&mut self) {
        self.view.reset(&self.products);
        tracing::debug!(namespace = self.keys.namespace(), "catalog filters cleared");
        self.emit_render();
    }

    pub fn set_sort(&mut self, key: CatalogSortKey) {
        self.view.apply_sort(key);
        tracing::debug!(
            namespace = self.keys.namespace(),
            sort = key.as_str(),
            "catalog re-sorted"
        );
        self.emit_render();
    }

    /// Sets the sort from raw control input; unknown keys mean `default`.
    pub fn set_sort_raw(&mut self, raw: &str) {
        self.set_sort(CatalogSortKey::coerce(raw));
    }

    /// Advances to the next page; `false` when everything is already shown.
    pub fn load_more(&mut self) -> bool {
        if !self.view.load_more() {
            return false;
        }
        self.emit_render();
        true
    }

    /// Adds `id` to the wishlist when absent, removes it otherwise. Returns
    /// whether the product is wishlisted afterwards.
    pub fn toggle_wishlist(&mut self, id: ProductId) -> CoreResult<bool> {
        if self.product(id).is_none() {
            return Err(unknown_product(id));
        }

        let now_wishlisted = match self.wishlist.iter().position(|entry| *entry == id) {
            Some(index) => {
                self.wishlist.remove(index);
                false
            }
            None => {
                self.wishlist.push(id);
                true
            }
        };

        tracing::info!(
            namespace = self.keys.namespace(),
            product_id = id.0,
            wishlisted = now_wishlisted,
            "wishlist toggled"
        );
        let persisted = self.persist_wishlist();
        self.emit_render();
        if persisted {
            let message = if now_wishlisted {
                "Added to wishlist"
            } else {
                "Removed from wishlist"
            };
            self.signals.notify(message, Severity::Success);
        }

        Ok(now_wishlisted)
    }

    /// Simulated cart; only confirms through a notification.
    pub fn add_to_cart(&mut self, id: ProductId) -> CoreResult<()> {
        let product = self.product(id).ok_or_else(|| unknown_product(id))?;
        let message = format!("{} added to cart!", product.name);
        self.signals.notify(message, Severity::Success);
        Ok(())
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_wishlisted(&self, id: ProductId) -> bool {
        self.wishlist.contains(&id)
    }

    pub fn wishlist(&self) -> &[ProductId] {
        &self.wishlist
    }

    /// Wishlisted products in wishlist order; ids no longer in the catalog
    /// are skipped.
    pub fn wishlist_products(&self) -> Vec<&Product> {
        self.wishlist
            .iter()
            .filter_map(|id| self.product(*id))
            .collect()
    }

    pub fn visible_page(&self) -> impl ExactSizeIterator<Item = &Product> + '_ {
        self.view.visible_page()
    }

    pub fn visible_through_page(&self) -> impl ExactSizeIterator<Item = &Product> + '_ {
        self.view.visible_through_page()
    }

    pub fn filtered_products(&self) -> impl ExactSizeIterator<Item = &Product> + '_ {
        self.view.matching()
    }

    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let filter = self.view.filter();
        let mut active = Vec::new();
        if filter.is_active(CatalogFilterDimension::Category) {
            active.push(ActiveFilter {
                dimension: CatalogFilterDimension::Category,
                label: format!("Category: {}", filter.category.as_str()),
            });
        }
        if filter.is_active(CatalogFilterDimension::PriceRange) {
            active.push(ActiveFilter {
                dimension: CatalogFilterDimension::PriceRange,
                label: format!("Price: {}", filter.price_range.as_str()),
            });
        }
        if filter.is_active(CatalogFilterDimension::MinRating) {
            active.push(ActiveFilter {
                dimension: CatalogFilterDimension::MinRating,
                label: format!("Rating: {}+ stars", filter.min_rating.value()),
            });
        }
        if filter.is_active(CatalogFilterDimension::Search) {
            active.push(ActiveFilter {
                dimension: CatalogFilterDimension::Search,
                label: format!("Search: \"{}\"", filter.search),
            });
        }
        active
    }

    pub fn filter(&self) -> &CatalogFilter {
        self.view.filter()
    }

    pub fn sort_key(&self) -> CatalogSortKey {
        self.view.sort_key()
    }

    pub fn pagination(&self) -> Pagination {
        self.view.pagination()
    }

    pub fn display(&self) -> DisplayState {
        self.view.display()
    }

    pub fn total_matching(&self) -> usize {
        self.view.total_matching()
    }

    pub fn has_more(&self) -> bool {
        self.view.has_more()
    }

    pub fn frame(&self) -> CatalogFrame {
        let wishlist = &self.wishlist;
        self.view.frame(
            |product| CatalogEntry {
                product: product.clone(),
                wishlisted: wishlist.contains(&product.id),
            },
            CatalogSummary {
                wishlist_count: wishlist.len(),
            },
        )
    }

    pub fn drain_signals(&mut self) -> Vec<CatalogSignal> {
        self.signals.drain()
    }

    fn apply_filter(&mut self, filter: CatalogFilter) {
        self.view.apply_filter(filter, &self.products);
        tracing::debug!(
            namespace = self.keys.namespace(),
            filter = ?self.view.filter(),
            matching = self.view.total_matching(),
            "catalog filter applied"
        );
        self.emit_render();
    }

    fn persist_wishlist(&mut self) -> bool {
        let key = self.keys.wishlist();
        match save_snapshot(self.store.as_ref(), &key, &self.wishlist) {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(
                    key = %key,
                    kind = ?error.kind,
                    message = %error.message,
                    "failed to persist wishlist"
                );
                self.signals.notify("Could not save your wishlist", Severity::Error);
                false
            }
        }
    }

    fn emit_render(&mut self) {
        let frame = self.frame();
        self.signals.render(frame);
    }
}

fn unknown_product(id: ProductId) -> CoreError {
    CoreError::invalid_input(format!("unknown product id '{}'", id.0))
}
