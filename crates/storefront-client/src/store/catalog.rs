use storefront_core::Product;
use tokio::sync::watch;

use super::{Listing, Slot};
use crate::client::{CatalogClient, Endpoint};
use crate::payload::Page;
use crate::query::QueryParams;

pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// The three home-page product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Discounted,
    NewProducts,
    TopOrdered,
}

impl ListingKind {
    pub const ALL: [ListingKind; 3] = [
        ListingKind::Discounted,
        ListingKind::NewProducts,
        ListingKind::TopOrdered,
    ];

    #[must_use]
    pub fn endpoint(self) -> Endpoint {
        match self {
            ListingKind::Discounted => Endpoint::Discounted,
            ListingKind::NewProducts => Endpoint::NewProducts,
            ListingKind::TopOrdered => Endpoint::TopOrdered,
        }
    }

    /// Message shown to the user when a fetch for this listing fails.
    #[must_use]
    pub fn error_message(self) -> &'static str {
        match self {
            ListingKind::Discounted => "Failed to load discounted products.",
            ListingKind::NewProducts => "Failed to load new products.",
            ListingKind::TopOrdered => "Failed to load top ordered products.",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ListingKind::Discounted => "discounted",
            ListingKind::NewProducts => "new-products",
            ListingKind::TopOrdered => "top-ordered",
        }
    }

    fn normalize(self, product: Product) -> Product {
        let product = product.with_display_image();
        match self {
            ListingKind::NewProducts => product.mark_new(),
            ListingKind::Discounted | ListingKind::TopOrdered => product,
        }
    }
}

/// Discounted, new and top-ordered listings, each with independent
/// loading, error and pagination state.
pub struct CatalogStore {
    client: CatalogClient,
    page_size: u32,
    discounted: Slot<Listing>,
    new_products: Slot<Listing>,
    top_ordered: Slot<Listing>,
}

impl CatalogStore {
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self::with_page_size(client, DEFAULT_PAGE_SIZE)
    }

    /// Like [`CatalogStore::new`], with a different default `page_size`.
    #[must_use]
    pub fn with_page_size(client: CatalogClient, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            discounted: Slot::new(Listing::default()),
            new_products: Slot::new(Listing::default()),
            top_ordered: Slot::new(Listing::default()),
        }
    }

    fn slot(&self, kind: ListingKind) -> &Slot<Listing> {
        match kind {
            ListingKind::Discounted => &self.discounted,
            ListingKind::NewProducts => &self.new_products,
            ListingKind::TopOrdered => &self.top_ordered,
        }
    }

    /// Current state of one listing.
    #[must_use]
    pub fn listing(&self, kind: ListingKind) -> Listing {
        self.slot(kind).snapshot()
    }

    #[must_use]
    pub fn subscribe(&self, kind: ListingKind) -> watch::Receiver<Listing> {
        self.slot(kind).subscribe()
    }

    pub async fn fetch_discounted(&self, params: QueryParams) {
        self.fetch(ListingKind::Discounted, params).await;
    }

    pub async fn fetch_new_products(&self, params: QueryParams) {
        self.fetch(ListingKind::NewProducts, params).await;
    }

    pub async fn fetch_top_ordered(&self, params: QueryParams) {
        self.fetch(ListingKind::TopOrdered, params).await;
    }

    /// Fetches one listing and writes the outcome into its state.
    ///
    /// `page` and `page_size` default to `1` and the store's page size when
    /// `params` does not carry them; any other keys pass through unchanged.
    /// Failures are logged and replaced by the listing's fixed message, and
    /// the previously loaded items stay in place.
    pub async fn fetch(&self, kind: ListingKind, mut params: QueryParams) {
        params.insert_default("page", 1_u32);
        params.insert_default("page_size", self.page_size);

        let slot = self.slot(kind);
        let pending = slot.begin();
        let ticket = pending.ticket();

        let outcome = match self.client.fetch_products(kind.endpoint(), &params).await {
            Ok(page) => Ok(page.map(|p| kind.normalize(p))),
            Err(error) => {
                tracing::warn!(listing = kind.label(), %error, "listing fetch failed");
                Err(kind.error_message().to_owned())
            }
        };

        let outcome = outcome.map(|page| move |listing: &mut Listing| apply_page(listing, page));
        if !pending.finish(outcome) {
            tracing::debug!(
                listing = kind.label(),
                ticket,
                "discarding superseded listing response"
            );
        }
    }
}

pub(super) fn apply_page(listing: &mut Listing, page: Page<Product>) {
    listing.items = page.items;
    listing.count = page.count;
    listing.next = page.next;
    listing.previous = page.previous;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn product(value: serde_json::Value) -> Product {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn only_new_products_are_tagged() {
        for kind in ListingKind::ALL {
            let p = kind.normalize(product(json!({"id": 1, "main_image_url": "a.jpg"})));
            assert_eq!(p.image(), Some("a.jpg"));
            assert_eq!(p.is_new(), kind == ListingKind::NewProducts, "{kind:?}");
        }
    }

    #[test]
    fn error_messages_are_listing_specific() {
        assert_eq!(
            ListingKind::Discounted.error_message(),
            "Failed to load discounted products."
        );
        assert_eq!(
            ListingKind::NewProducts.error_message(),
            "Failed to load new products."
        );
        assert_eq!(
            ListingKind::TopOrdered.error_message(),
            "Failed to load top ordered products."
        );
    }

    #[test]
    fn apply_page_overwrites_items_and_pagination() {
        let mut listing = Listing {
            items: vec![product(json!({"id": 1}))],
            count: 10,
            next: Some("https://shop.test/api/products/discounted/?page=2".to_string()),
            ..Listing::default()
        };
        apply_page(
            &mut listing,
            Page {
                items: vec![],
                count: 0,
                next: None,
                previous: None,
            },
        );
        assert!(listing.items.is_empty());
        assert_eq!(listing.count, 0);
        assert!(listing.next.is_none());
    }
}
