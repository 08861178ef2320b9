//! Storefront configuration.

use rig_commerce::Currency;

/// Configuration for a storefront instance.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Currency the store sells in.
    pub currency: Currency,
    /// URL the payment provider redirects to on success.
    pub success_url: String,
    /// URL the payment provider redirects to on cancellation/failure.
    pub cancel_url: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            success_url: "/checkout/success".to_string(),
            cancel_url: "/checkout/failure".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Create a configuration with default redirect URLs.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            ..Default::default()
        }
    }

    /// Set the success redirect URL.
    pub fn with_success_url(mut self, url: impl Into<String>) -> Self {
        self.success_url = url.into();
        self
    }

    /// Set the cancel redirect URL.
    pub fn with_cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_chain() {
        let config = StorefrontConfig::new(Currency::Ars)
            .with_success_url("https://shop.example/ok")
            .with_cancel_url("https://shop.example/ko");

        assert_eq!(config.currency, Currency::Ars);
        assert_eq!(config.success_url, "https://shop.example/ok");
        assert_eq!(config.cancel_url, "https://shop.example/ko");
    }
}
