//! Platform HTTP implementations of the collaborator traits.

use rig_commerce::Currency;

/// Connection settings for the hosted database.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the hosted database (no trailing path).
    pub base_url: String,
    /// Public API key sent with every request.
    pub api_key: String,
    /// Currency product prices are denominated in.
    pub currency: Currency,
}

impl RemoteConfig {
    /// Create a configuration with the default currency.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            currency: Currency::default(),
        }
    }

    /// Set the price currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

/// Shared fetch machinery for the wasm32 implementations.
#[cfg(target_arch = "wasm32")]
mod platform {
    use crate::DataError;
    use spin_sdk::http::{Method, Request, Response};

    /// Send a request, mapping transport failures and HTTP error statuses
    /// into [`DataError`].
    pub async fn send_checked(
        method: Method,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, DataError> {
        let mut builder = Request::builder();
        builder.method(method).uri(url);
        for (name, value) in headers {
            builder.header(*name, *value);
        }
        if let Some(body) = body {
            builder.body(body);
        }

        let response: Response = spin_sdk::http::send(builder.build())
            .await
            .map_err(|e| DataError::Connection(e.to_string()))?;

        let status = *response.status();
        if status >= 400 {
            return Err(DataError::Http {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.body().to_vec())
    }
}

/// Catalog access over the hosted database's REST surface.
#[cfg(target_arch = "wasm32")]
pub struct HttpCatalogApi {
    config: RemoteConfig,
    retry: crate::RetryPolicy,
}

#[cfg(target_arch = "wasm32")]
impl HttpCatalogApi {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            config,
            retry: crate::RetryPolicy::default(),
        }
    }

    /// Override the retry policy.
    pub fn with_retry(mut self, retry: crate::RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn get_rows<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<Vec<T>, crate::DataError> {
        use spin_sdk::http::Method;

        let auth = format!("Bearer {}", self.config.api_key);
        let mut attempt = 0u32;
        loop {
            let result = platform::send_checked(
                Method::Get,
                url,
                &[
                    ("apikey", self.config.api_key.as_str()),
                    ("authorization", auth.as_str()),
                ],
                None,
            )
            .await;

            let retriable = match &result {
                Ok(_) => false,
                Err(crate::DataError::Http { status, .. }) => {
                    self.retry.should_retry_status(*status, attempt)
                }
                Err(_) => self.retry.should_retry_connection(attempt),
            };
            if retriable {
                attempt += 1;
                tracing::debug!(url, attempt, "retrying catalog fetch");
                continue;
            }

            let bytes = result?;
            return Ok(serde_json::from_slice(&bytes)?);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait::async_trait(?Send)]
impl crate::CatalogApi for HttpCatalogApi {
    async fn fetch_categories(
        &self,
    ) -> Result<Vec<rig_commerce::catalog::Category>, crate::DataError> {
        let url = crate::SelectQuery::new("categories")
            .order("name")
            .build(&self.config.base_url);
        let rows: Vec<crate::CategoryRow> = self.get_rows(&url).await?;
        Ok(crate::map_categories(rows))
    }

    async fn fetch_products(
        &self,
        category: Option<&rig_commerce::CategoryId>,
    ) -> Result<Vec<rig_commerce::catalog::Product>, crate::DataError> {
        let mut query = crate::SelectQuery::new("products").eq("active", "true");
        if let Some(category) = category {
            query = query.eq("category_id", category.as_str());
        }
        let url = query.order("name").build(&self.config.base_url);
        let rows: Vec<crate::ProductRow> = self.get_rows(&url).await?;
        Ok(crate::map_products(rows, self.config.currency))
    }
}

/// Payment-session creation over the provider's HTTP endpoint.
///
/// Session creation is not idempotent, so requests are never retried.
#[cfg(target_arch = "wasm32")]
pub struct HttpPaymentApi {
    endpoint: String,
}

#[cfg(target_arch = "wasm32")]
impl HttpPaymentApi {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[async_trait::async_trait(?Send)]
impl crate::PaymentApi for HttpPaymentApi {
    async fn create_session(
        &self,
        request: &rig_commerce::checkout::SessionRequest,
    ) -> Result<rig_commerce::checkout::SessionResponse, crate::DataError> {
        use spin_sdk::http::Method;

        let body = serde_json::to_vec(request)?;
        let bytes = platform::send_checked(
            Method::Post,
            &self.endpoint,
            &[("content-type", "application/json")],
            Some(body),
        )
        .await?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_config_builder() {
        let config = RemoteConfig::new("https://db.example", "anon-key")
            .with_currency(Currency::Ars);
        assert_eq!(config.base_url, "https://db.example");
        assert_eq!(config.currency, Currency::Ars);
    }
}
