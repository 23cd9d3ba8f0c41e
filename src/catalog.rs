use crate::listing::AuctionListing;
use crate::utils::{get_env_var, Connectable};
use async_trait::async_trait;

/// Catalog reads. This is where the authoritative `current_bid` and
/// `close_at` come from; the view re-fetches through here after every
/// accepted bid.
#[async_trait]
pub trait CatalogSource: Connectable {
    async fn fetch_listing(&mut self, listing_id: &str) -> Result<AuctionListing, String>;
}

pub struct HttpCatalogProvider {
    pub client: Option<reqwest::Client>,
    pub base_url: Option<String>,
}

impl HttpCatalogProvider {
    pub fn new() -> HttpCatalogProvider {
        HttpCatalogProvider {
            client: None,
            base_url: None,
        }
    }
}

impl Default for HttpCatalogProvider {
    fn default() -> HttpCatalogProvider {
        HttpCatalogProvider::new()
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogProvider {
    async fn fetch_listing(&mut self, listing_id: &str) -> Result<AuctionListing, String> {
        let client = match self.client.as_ref() {
            Some(client) => client,
            None => return Err("Not connected to the marketplace API".to_string()),
        };
        let base_url = match self.base_url.as_ref() {
            Some(base_url) => base_url,
            None => return Err("Not connected to the marketplace API".to_string()),
        };
        let response = match client
            .get(format!("{}/api/listings/{}", base_url, listing_id))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Err(e.to_string()),
        };
        if !response.status().is_success() {
            return Err(format!("Listing lookup returned {}", response.status()));
        }
        match response.json::<AuctionListing>().await {
            Ok(listing) => Ok(listing),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[async_trait]
impl Connectable for HttpCatalogProvider {
    async fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    async fn ping(&mut self) -> Result<(), String> {
        let client = match self.client.as_ref() {
            Some(client) => client,
            None => return Err("Not connected to the marketplace API".to_string()),
        };
        let base_url = match self.base_url.as_ref() {
            Some(base_url) => base_url,
            None => return Err("Not connected to the marketplace API".to_string()),
        };
        match client.get(format!("{}/api/health", base_url)).send().await {
            Ok(response) => {
                if response.status().is_success() {
                    Ok(())
                } else {
                    Err(format!("Health check returned {}", response.status()))
                }
            }
            Err(e) => Err(e.to_string()),
        }
    }

    async fn connect(&mut self) -> Result<(), String> {
        let base_url = get_env_var("IRONLOT_API_URL")?;
        let client = match reqwest::Client::builder().build() {
            Ok(client) => client,
            Err(e) => return Err(e.to_string()),
        };
        self.base_url = Some(base_url);
        self.client = Some(client);
        self.ping().await
    }
}

mockall::mock! {
    pub CatalogProvider {}

    #[async_trait]
    impl CatalogSource for CatalogProvider {
        async fn fetch_listing(&mut self, listing_id: &str) -> Result<AuctionListing, String>;
    }

    #[async_trait]
    impl Connectable for CatalogProvider {
        async fn is_connected(&self) -> bool;
        async fn connect(&mut self) -> Result<(), String>;
        async fn ping(&mut self) -> Result<(), String>;
    }
}
