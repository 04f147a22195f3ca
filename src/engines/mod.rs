use crate::{error::SearchError, models::SearchResultItem};
use async_trait::async_trait;

#[async_trait]
pub trait ProductSearch: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, query: &str, limit: usize)
    -> Result<Vec<SearchResultItem>, SearchError>;
}

pub mod products;

pub use products::{ApiSettings, ProductsApi};
