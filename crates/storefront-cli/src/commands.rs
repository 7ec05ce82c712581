//! Subcommand handlers. Each builds the stores it needs from one shared
//! client, runs the fetch, and prints the resulting state as JSON.

use anyhow::Context;
use serde::Serialize;
use storefront_client::{
    CatalogClient, CatalogStore, Listing, ListingKind, QueryParams, QueryValue, SearchQuery,
    SearchStore,
};
use storefront_core::{AppConfig, BrandConfig, BrandTemplate};

use crate::{Commands, PageArgs};

pub(crate) async fn run(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    let client = || CatalogClient::from_config(config).context("failed to build catalog client");

    match command {
        Commands::Discounted(args) => {
            run_listing(client()?, config, ListingKind::Discounted, args).await
        }
        Commands::New(args) => run_listing(client()?, config, ListingKind::NewProducts, args).await,
        Commands::Top(args) => run_listing(client()?, config, ListingKind::TopOrdered, args).await,
        Commands::Home => run_home(client()?, config).await,
        Commands::Categories => run_categories(client()?).await,
        Commands::Search {
            category,
            term,
            page,
        } => run_search(client()?, category, term, page).await,
        Commands::Brand { template } => print_brand(config, template.as_deref()),
    }
}

async fn run_listing(
    client: CatalogClient,
    config: &AppConfig,
    kind: ListingKind,
    args: PageArgs,
) -> anyhow::Result<()> {
    let store = CatalogStore::with_page_size(client, config.page_size);
    store.fetch(kind, page_params(args)).await;

    let listing = store.listing(kind);
    print_json(&listing)?;
    fail_on_error(listing.error.as_deref())
}

#[derive(Serialize)]
struct HomeView {
    discounted: Listing,
    new_products: Listing,
    top_ordered: Listing,
}

async fn run_home(client: CatalogClient, config: &AppConfig) -> anyhow::Result<()> {
    let store = CatalogStore::with_page_size(client, config.page_size);
    futures::join!(
        store.fetch_discounted(QueryParams::new()),
        store.fetch_new_products(QueryParams::new()),
        store.fetch_top_ordered(QueryParams::new()),
    );

    let view = HomeView {
        discounted: store.listing(ListingKind::Discounted),
        new_products: store.listing(ListingKind::NewProducts),
        top_ordered: store.listing(ListingKind::TopOrdered),
    };
    print_json(&view)?;

    let failed: Vec<&str> = ListingKind::ALL
        .into_iter()
        .filter(|kind| store.listing(*kind).error.is_some())
        .map(ListingKind::label)
        .collect();
    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("failed listings: {}", failed.join(", "))
    }
}

async fn run_categories(client: CatalogClient) -> anyhow::Result<()> {
    let store = SearchStore::new(client);
    store.fetch_categories().await;

    let dir = store.categories();
    print_json(&dir)?;
    fail_on_error(dir.error.as_deref())
}

#[derive(Serialize)]
struct SearchView {
    query: SearchQuery,
    results: Listing,
}

async fn run_search(
    client: CatalogClient,
    category: Option<String>,
    term: Option<String>,
    page: Option<u32>,
) -> anyhow::Result<()> {
    let store = SearchStore::new(client);
    store.set_category(category.map(|c| category_value(&c)));
    if let Some(term) = term {
        store.set_search_term(term);
    }
    if let Some(page) = page {
        store.set_page(page);
    }
    store.search_products(QueryParams::new()).await;

    let view = SearchView {
        query: store.query(),
        results: store.results(),
    };
    print_json(&view)?;
    fail_on_error(view.results.error.as_deref())
}

fn print_brand(config: &AppConfig, template: Option<&str>) -> anyhow::Result<()> {
    let brand = if let Some(name) = template {
        BrandConfig::from_template(name.parse::<BrandTemplate>()?)
    } else if config.brand_path.exists() {
        storefront_core::load_brand(&config.brand_path)?
    } else {
        tracing::warn!(
            path = %config.brand_path.display(),
            "brand file not found; using built-in defaults"
        );
        BrandConfig::default()
    };
    print_json(&brand)
}

/// Only forwards what the user actually passed; the store fills the rest.
fn page_params(args: PageArgs) -> QueryParams {
    let mut params = QueryParams::new();
    if let Some(page) = args.page {
        params.insert("page", page);
    }
    if let Some(page_size) = args.page_size {
        params.insert("page_size", page_size);
    }
    params
}

/// Numeric ids go out as integers, anything else verbatim.
fn category_value(raw: &str) -> QueryValue {
    raw.parse::<i64>()
        .map_or_else(|_| QueryValue::from(raw), QueryValue::from)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fail_on_error(error: Option<&str>) -> anyhow::Result<()> {
    match error {
        Some(message) => anyhow::bail!("{message}"),
        None => Ok(()),
    }
}
