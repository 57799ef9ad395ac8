use leptos::logging::error;

use crate::aggregate::{sort_by_approval, summary};
use crate::models::pavilion::Pavilion;
use crate::models::review::Review;
use crate::store::PavilionStore;

/// How the catalog lays out its cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    #[default]
    List,
    Block,
}

impl Layout {
    pub fn css_class(self) -> &'static str {
        match self {
            Layout::List => "catalog catalog--list",
            Layout::Block => "catalog catalog--block",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Store order, by id.
    #[default]
    Default,
    /// Best approval ratio first.
    Rating,
}

/// Everything the catalog fetches on mount.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogData {
    pub pavilions: Vec<Pavilion>,
    pub reviews: Vec<Review>,
}

/// Reads pavilions and reviews concurrently. A failed read is logged and
/// yields an empty collection; the other read is unaffected.
pub async fn fetch_catalog(store: &dyn PavilionStore) -> CatalogData {
    let (pavilions, reviews) = futures::join!(store.list_pavilions(), store.list_reviews(None));
    let pavilions = pavilions.unwrap_or_else(|err| {
        error!("[CATALOG] Failed to load pavilions: {}", err);
        Vec::new()
    });
    let reviews = reviews.unwrap_or_else(|err| {
        error!("[CATALOG] Failed to load reviews: {}", err);
        Vec::new()
    });
    CatalogData { pavilions, reviews }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PavilionCard {
    pub pavilion: Pavilion,
    pub summary: String,
}

/// What the detail modal shows for the selected pavilion.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub pavilion: Pavilion,
    pub summary: String,
    pub reviews: Vec<Review>,
}

/// Catalog view state. Toggles and selection only re-derive from fetched data.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    data: CatalogData,
    loaded: bool,
    layout: Layout,
    order: SortOrder,
    selected: Option<i64>,
}

impl Catalog {
    pub fn populate(&mut self, data: CatalogData) {
        self.data = data;
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    /// Pavilions in the current order.
    pub fn ordered(&self) -> Vec<Pavilion> {
        match self.order {
            SortOrder::Default => self.data.pavilions.clone(),
            SortOrder::Rating => sort_by_approval(&self.data.pavilions, &self.data.reviews),
        }
    }

    pub fn cards(&self) -> Vec<PavilionCard> {
        self.ordered()
            .into_iter()
            .map(|pavilion| PavilionCard {
                summary: summary(pavilion.id, &self.data.reviews),
                pavilion,
            })
            .collect()
    }

    pub fn reviews_for(&self, pavilion_id: i64) -> Vec<Review> {
        self.data
            .reviews
            .iter()
            .filter(|review| review.pavilion_id == pavilion_id)
            .cloned()
            .collect()
    }

    pub fn select(&mut self, pavilion_id: i64) {
        self.selected = Some(pavilion_id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// `None` when nothing is selected or the selected pavilion is unknown.
    pub fn selection(&self) -> Option<Selection> {
        let id = self.selected?;
        let pavilion = self.data.pavilions.iter().find(|p| p.id == id)?.clone();
        Some(Selection {
            summary: summary(id, &self.data.reviews),
            reviews: self.reviews_for(id),
            pavilion,
        })
    }

    /// Adds a review submitted from the catalog so summaries and rating order
    /// pick it up without a re-fetch.
    pub fn record_review(&mut self, review: Review) {
        if self.data.reviews.iter().any(|r| r.id == review.id) {
            return;
        }
        self.data.reviews.insert(0, review);
    }
}
