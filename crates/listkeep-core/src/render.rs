//! Pure conversion of render frames into a renderer-agnostic node tree.

use time::OffsetDateTime;
use time::macros::format_description;

use crate::catalog::{CatalogEntry, CatalogFrame};
use crate::collection::DisplayState;
use crate::models::{Task, Theme};
use crate::tasks::TaskFrame;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ViewNode {
    pub kind: &'static str,
    pub text: Option<String>,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Depth-first search for the first node of `kind`.
    pub fn find(&self, kind: &str) -> Option<&ViewNode> {
        if self.kind == kind {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(kind))
    }

    pub fn find_all<'a>(&'a self, kind: &str, found: &mut Vec<&'a ViewNode>) {
        if self.kind == kind {
            found.push(self);
        }
        for child in &self.children {
            child.find_all(kind, found);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum CatalogLayout {
    #[default]
    Grid,
    List,
}

impl CatalogLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

/// Presentation settings owned by the host rather than the manager.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CatalogUi {
    pub theme: Theme,
    pub layout: CatalogLayout,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Star {
    Full,
    Half,
    Empty,
}

/// Five glyphs: whole stars, one half star for any fraction, then empty.
pub fn star_glyphs(rating: f64) -> [Star; 5] {
    let rating = rating.clamp(0.0, 5.0);
    let full = rating.floor() as usize;
    let has_half = rating.fract() != 0.0;
    std::array::from_fn(|index| {
        if index < full {
            Star::Full
        } else if index == full && has_half {
            Star::Half
        } else {
            Star::Empty
        }
    })
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// Relative due-date label, counted in whole days rounded up.
pub fn due_label(due: OffsetDateTime, now: OffsetDateTime) -> String {
    let days = ((due - now).as_seconds_f64() / 86_400.0).ceil() as i64;
    match days {
        days if days < 0 => format!("Overdue ({} days ago)", days.abs()),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        2..=7 => format!("In {days} days"),
        _ => due
            .format(format_description!("[month repr:short] [day padding:none], [year]"))
            .unwrap_or_else(|_| due.date().to_string()),
    }
}

pub fn render_catalog_view(frame: &CatalogFrame, ui: &CatalogUi) -> ViewNode {
    let mut root = ViewNode::new("catalog")
        .attr("display", frame.display.as_str())
        .attr("theme", ui.theme.as_str())
        .attr("layout", ui.layout.as_str())
        .child(ViewNode::new("results-count").text(frame.total_matching.to_string()))
        .child(ViewNode::new("wishlist-count").text(frame.summary.wishlist_count.to_string()));

    root = match frame.display {
        DisplayState::Loading => root.child(ViewNode::new("loading")),
        DisplayState::Empty => root.child(ViewNode::new("empty-state").text("No products found")),
        DisplayState::Populated => root.child(
            ViewNode::new("products")
                .attr("page", frame.pagination.page.to_string())
                .children(frame.entries.iter().map(product_card)),
        ),
    };

    if frame.has_more {
        root = root.child(ViewNode::new("load-more").text("Load More"));
    }
    root
}

fn product_card(entry: &CatalogEntry) -> ViewNode {
    let product = &entry.product;
    let mut price = ViewNode::new("price")
        .child(ViewNode::new("current-price").text(format_price(product.price)));
    if let Some(original) = product.original_price {
        price = price.child(ViewNode::new("original-price").text(format_price(original)));
    }

    let mut card = ViewNode::new("product-card")
        .attr("data-id", product.id.0.to_string())
        .child(
            ViewNode::new("image")
                .attr("src", product.image_url.as_str())
                .attr("alt", product.name.as_str()),
        );
    if let Some(badge) = product.badge {
        card = card.child(
            ViewNode::new("badge")
                .attr("class", badge.as_str())
                .text(badge.as_str()),
        );
    }

    card.child(ViewNode::new("category").text(product.category.as_str()))
        .child(ViewNode::new("title").text(product.name.as_str()))
        .child(rating_node(product.rating, product.review_count))
        .child(price)
        .child(ViewNode::new("wishlist-toggle").attr("active", entry.wishlisted.to_string()))
}

fn rating_node(rating: f64, review_count: u32) -> ViewNode {
    let stars = star_glyphs(rating).into_iter().map(|star| {
        ViewNode::new("star").attr(
            "fill",
            match star {
                Star::Full => "full",
                Star::Half => "half",
                Star::Empty => "empty",
            },
        )
    });
    ViewNode::new("rating")
        .children(stars)
        .child(ViewNode::new("rating-count").text(format!("({review_count})")))
}

pub fn render_task_view(frame: &TaskFrame, now: OffsetDateTime) -> ViewNode {
    let stats = frame.summary;
    let root = ViewNode::new("task-list")
        .attr("display", frame.display.as_str())
        .child(
            ViewNode::new("stats")
                .attr("total", stats.total.to_string())
                .attr("pending", stats.pending.to_string())
                .attr("completed", stats.completed.to_string())
                .attr("completion-rate", format!("{}%", stats.completion_rate)),
        );

    let root = match frame.display {
        DisplayState::Loading => root.child(ViewNode::new("loading")),
        DisplayState::Empty => root.child(ViewNode::new("empty-state").text("No tasks found")),
        DisplayState::Populated => root.child(
            ViewNode::new("tasks").children(frame.entries.iter().map(|task| task_row(task, now))),
        ),
    };

    if frame.has_more {
        root.child(ViewNode::new("load-more").text("Load More"))
    } else {
        root
    }
}

fn task_row(task: &Task, now: OffsetDateTime) -> ViewNode {
    let due = match task.due_at {
        Some(due_at) => ViewNode::new("due")
            .attr("overdue", task.is_overdue(now).to_string())
            .text(due_label(due_at, now)),
        None => ViewNode::new("due").text("No due date"),
    };

    ViewNode::new("task-item")
        .attr("data-id", task.id.as_str())
        .attr("completed", task.completed.to_string())
        .child(ViewNode::new("title").text(task.title.as_str()))
        .child(ViewNode::new("category").text(task.category.as_str()))
        .child(due)
}

#[cfg(test)]
mod tests {
    use time::Duration;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn stars_use_one_half_glyph_for_fractions() {
        assert_eq!(
            star_glyphs(4.5),
            [Star::Full, Star::Full, Star::Full, Star::Full, Star::Half]
        );
        assert_eq!(
            star_glyphs(4.2),
            [Star::Full, Star::Full, Star::Full, Star::Full, Star::Half]
        );
        assert_eq!(star_glyphs(5.0), [Star::Full; 5]);
        assert_eq!(star_glyphs(0.0), [Star::Empty; 5]);
    }

    #[test]
    fn prices_have_two_decimals() {
        assert_eq!(format_price(89.99), "$89.99");
        assert_eq!(format_price(5.0), "$5.00");
    }

    #[test]
    fn due_labels_count_whole_days() {
        let now = datetime!(2024-03-01 09:00 UTC);
        assert_eq!(due_label(now + Duration::hours(3), now), "Tomorrow");
        assert_eq!(due_label(now, now), "Today");
        assert_eq!(due_label(now - Duration::hours(3), now), "Today");
        assert_eq!(due_label(now + Duration::days(3), now), "In 3 days");
        assert_eq!(
            due_label(now - Duration::days(2), now),
            "Overdue (2 days ago)"
        );
        assert_eq!(
            due_label(datetime!(2024-04-15 09:00 UTC), now),
            "Apr 15, 2024"
        );
    }
}
