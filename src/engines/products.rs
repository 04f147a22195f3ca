use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Request, Url};

use crate::{
    engines::ProductSearch,
    error::SearchError,
    models::{SearchResponse, SearchResultItem},
};

const PRODUCTS_PATH: &str = "api/products";

#[derive(Clone, Debug)]
pub struct ApiSettings {
    pub base_url: String,
    /// Passed through verbatim as a bearer token
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

#[derive(Clone, Debug)]
pub struct ProductsApi {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl ProductsApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, SearchError> {
        let endpoint = Self::endpoint(&settings.base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
            token: settings.token.clone(),
        })
    }

    fn endpoint(base_url: &str) -> Result<Url, SearchError> {
        let raw = format!("{}/{}", base_url.trim_end_matches('/'), PRODUCTS_PATH);
        Url::parse(&raw).map_err(|e| SearchError::BaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })
    }

    pub(crate) fn request(&self, query: &str, limit: usize) -> Result<Request, SearchError> {
        let mut request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("search", query.to_string()), ("limit", limit.to_string())]);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let mut request = request.build()?;

        // Form encoding writes spaces as '+' and literal '+' as %2B
        let query = request.url().query().map(|q| q.replace('+', "%20"));
        request.url_mut().set_query(query.as_deref());

        Ok(request)
    }
}

#[async_trait]
impl ProductSearch for ProductsApi {
    fn name(&self) -> &'static str {
        "products"
    }

    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchResultItem>, SearchError> {
        let request = self.request(query, limit)?;
        log::debug!("GET {}", request.url());

        let response = self.client.execute(request).await?.error_for_status()?;
        let body = response.text().await?;
        let items = serde_json::from_str::<SearchResponse>(&body)?.into_items();

        log::debug!("{} results for {:?}", items.len(), query);
        Ok(items)
    }
}
