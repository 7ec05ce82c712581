pub mod client;
pub mod error;
pub mod payload;
pub mod query;
pub mod store;

pub use client::{CatalogClient, Endpoint};
pub use error::ClientError;
pub use payload::{ListPayload, Page};
pub use query::{QueryParams, QueryValue};
pub use store::{
    CatalogStore, CategoryDirectory, Listing, ListingKind, SearchQuery, SearchStore,
};
