use crate::proposal::BidProposal;
use crate::utils::{get_env_var, Connectable};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
struct SubmitResponse {
    success: bool,
    message: Option<String>,
}

/// Bid intake service. The server is the authority on whether the amount
/// still leads; a losing race comes back as an error message, never as a
/// client-side retry.
#[async_trait]
pub trait BidGateway: Connectable {
    async fn submit_bid(&mut self, proposal: &BidProposal) -> Result<(), String>;
}

pub struct HttpBidGateway {
    pub client: Option<reqwest::Client>,
    pub base_url: Option<String>,
}

impl HttpBidGateway {
    pub fn new() -> HttpBidGateway {
        HttpBidGateway {
            client: None,
            base_url: None,
        }
    }
}

impl Default for HttpBidGateway {
    fn default() -> HttpBidGateway {
        HttpBidGateway::new()
    }
}

#[async_trait]
impl BidGateway for HttpBidGateway {
    async fn submit_bid(&mut self, proposal: &BidProposal) -> Result<(), String> {
        let client = match self.client.as_ref() {
            Some(client) => client,
            None => return Err("Not connected to the marketplace API".to_string()),
        };
        let base_url = match self.base_url.as_ref() {
            Some(base_url) => base_url,
            None => return Err("Not connected to the marketplace API".to_string()),
        };
        let response = match client
            .post(format!("{}/api/bids", base_url))
            .json(proposal)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Err(e.to_string()),
        };
        let body = match response.json::<SubmitResponse>().await {
            Ok(body) => body,
            Err(e) => return Err(e.to_string()),
        };
        if body.success {
            Ok(())
        } else {
            Err(body.message.unwrap_or_default())
        }
    }
}

#[async_trait]
impl Connectable for HttpBidGateway {
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
        let token = get_env_var("IRONLOT_SESSION_TOKEN")?;
        let mut headers = reqwest::header::HeaderMap::new();
        let auth = match reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(auth) => auth,
            Err(e) => return Err(e.to_string()),
        };
        headers.insert(reqwest::header::AUTHORIZATION, auth);
        let client = match reqwest::Client::builder().default_headers(headers).build() {
            Ok(client) => client,
            Err(e) => return Err(e.to_string()),
        };
        self.base_url = Some(base_url);
        self.client = Some(client);
        self.ping().await
    }
}

mockall::mock! {
    pub BidGatewayProvider {}

    #[async_trait]
    impl BidGateway for BidGatewayProvider {
        async fn submit_bid(&mut self, proposal: &BidProposal) -> Result<(), String>;
    }

    #[async_trait]
    impl Connectable for BidGatewayProvider {
        async fn is_connected(&self) -> bool;
        async fn connect(&mut self) -> Result<(), String>;
        async fn ping(&mut self) -> Result<(), String>;
    }
}
