use serde::Serialize;
use storefront_core::Product;
use tokio::sync::watch;

use super::catalog::apply_page;
use super::{CategoryDirectory, Listing, Slot};
use crate::client::{CatalogClient, Endpoint};
use crate::query::{QueryParams, QueryValue};

const CATEGORIES_ERROR: &str = "Failed to fetch categories.";
const SEARCH_ERROR: &str = "Failed to fetch products.";

/// The persisted search selection, used as defaults by
/// [`SearchStore::search_products`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub selected_category: Option<QueryValue>,
    pub search_term: String,
    pub page: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            selected_category: None,
            search_term: String::new(),
            page: 1,
        }
    }
}

impl SearchQuery {
    /// Fills `category`, `search` and `page` from this selection wherever
    /// `params` leaves them unset or falsy. Keys that end up falsy on both
    /// sides are dropped from the query; other keys pass through.
    #[must_use]
    pub fn resolve(&self, mut params: QueryParams) -> QueryParams {
        let fallbacks = [
            ("category", self.selected_category.clone()),
            ("search", Some(QueryValue::from(self.search_term.as_str()))),
            ("page", Some(QueryValue::from(self.page))),
        ];

        for (key, fallback) in fallbacks {
            if params.is_set(key) {
                continue;
            }
            params.remove(key);
            if let Some(value) = fallback.filter(QueryValue::is_truthy) {
                params.insert(key, value);
            }
        }

        params
    }
}

/// Category directory, search selection and one paginated result set.
pub struct SearchStore {
    client: CatalogClient,
    query: watch::Sender<SearchQuery>,
    categories: Slot<CategoryDirectory>,
    results: Slot<Listing>,
}

impl SearchStore {
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            query: watch::Sender::new(SearchQuery::default()),
            categories: Slot::new(CategoryDirectory::default()),
            results: Slot::new(Listing::default()),
        }
    }

    #[must_use]
    pub fn query(&self) -> SearchQuery {
        self.query.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_query(&self) -> watch::Receiver<SearchQuery> {
        self.query.subscribe()
    }

    #[must_use]
    pub fn categories(&self) -> CategoryDirectory {
        self.categories.snapshot()
    }

    #[must_use]
    pub fn subscribe_categories(&self) -> watch::Receiver<CategoryDirectory> {
        self.categories.subscribe()
    }

    #[must_use]
    pub fn results(&self) -> Listing {
        self.results.snapshot()
    }

    #[must_use]
    pub fn subscribe_results(&self) -> watch::Receiver<Listing> {
        self.results.subscribe()
    }

    pub fn set_category(&self, category: Option<QueryValue>) {
        self.query.send_if_modified(|q| replace(&mut q.selected_category, category));
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.query.send_if_modified(|q| replace(&mut q.search_term, term));
    }

    pub fn set_page(&self, page: u32) {
        self.query.send_if_modified(|q| replace(&mut q.page, page));
    }

    /// The query [`SearchStore::search_products`] would send for `params`.
    #[must_use]
    pub fn resolve_query(&self, params: QueryParams) -> QueryParams {
        self.query.borrow().resolve(params)
    }

    /// Replaces the category directory with the server's list.
    pub async fn fetch_categories(&self) {
        let pending = self.categories.begin();
        let ticket = pending.ticket();

        let outcome = match self.client.fetch_categories().await {
            Ok(items) => Ok(move |dir: &mut CategoryDirectory| dir.items = items),
            Err(error) => {
                tracing::warn!(%error, "category fetch failed");
                Err(CATEGORIES_ERROR.to_owned())
            }
        };

        if !pending.finish(outcome) {
            tracing::debug!(ticket, "discarding superseded category response");
        }
    }

    /// Runs a product search with `params` merged over the stored selection.
    ///
    /// Results get a display `image`. A bare-list response is treated as the
    /// complete result set (no further pages). On failure the previous
    /// results are kept and `error` is set.
    pub async fn search_products(&self, params: QueryParams) {
        let query = self.resolve_query(params);
        let pending = self.results.begin();
        let ticket = pending.ticket();

        let outcome = match self.client.fetch_products(Endpoint::Search, &query).await {
            Ok(page) => Ok(page.map(Product::with_display_image)),
            Err(error) => {
                tracing::warn!(?query, %error, "product search failed");
                Err(SEARCH_ERROR.to_owned())
            }
        };

        let outcome = outcome.map(|page| move |listing: &mut Listing| apply_page(listing, page));
        if !pending.finish(outcome) {
            tracing::debug!(ticket, "discarding superseded search response");
        }
    }
}

/// Assigns `value` and reports whether anything changed, so identical
/// writes do not wake subscribers.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(category: Option<&str>, term: &str, page: u32) -> SearchQuery {
        SearchQuery {
            selected_category: category.map(QueryValue::from),
            search_term: term.to_owned(),
            page,
        }
    }

    #[test]
    fn explicit_search_wins_and_rest_falls_back() {
        let resolved = query(Some("c1"), "", 2).resolve(QueryParams::new().with("search", "shoe"));
        let expected = QueryParams::new()
            .with("category", "c1")
            .with("search", "shoe")
            .with("page", 2_u32);
        assert_eq!(resolved, expected);
    }

    #[test]
    fn falsy_category_is_omitted() {
        let resolved = query(None, "red", 1).resolve(QueryParams::new());
        let expected = QueryParams::new().with("search", "red").with("page", 1_u32);
        assert_eq!(resolved, expected);
        assert!(!resolved.contains_key("category"));
    }

    #[test]
    fn empty_explicit_value_falls_back_to_state() {
        let resolved =
            query(Some("c2"), "", 1).resolve(QueryParams::new().with("category", ""));
        assert_eq!(resolved.get("category"), Some(&QueryValue::from("c2")));
    }

    #[test]
    fn falsy_on_both_sides_is_dropped() {
        let resolved = query(Some(""), "", 1).resolve(
            QueryParams::new()
                .with("category", "")
                .with("search", ""),
        );
        assert!(!resolved.contains_key("category"));
        assert!(!resolved.contains_key("search"));
    }

    #[test]
    fn passthrough_keys_survive() {
        let resolved =
            query(None, "", 1).resolve(QueryParams::new().with("ordering", "-price"));
        assert_eq!(resolved.get("ordering"), Some(&QueryValue::from("-price")));
        assert_eq!(resolved.get("page"), Some(&QueryValue::Int(1)));
    }

    #[test]
    fn explicit_page_overrides_state() {
        let resolved = query(None, "", 4).resolve(QueryParams::new().with("page", 7_u32));
        assert_eq!(resolved.get("page"), Some(&QueryValue::Int(7)));
    }

    #[test]
    fn replace_reports_change() {
        let mut term = String::from("x");
        assert!(!replace(&mut term, "x".to_string()));
        assert!(replace(&mut term, "y".to_string()));
        assert_eq!(term, "y");
    }
}
