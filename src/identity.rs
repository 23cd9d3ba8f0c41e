use crate::utils::{get_env_var, Connectable};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Terminal view of the license-verification workflow. The upload and review
/// pipeline itself lives in another service; the gate only reads these flags.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct IdentityStatus {
    /// A document has been submitted at some point.
    pub is_upload: bool,
    /// The most recent submission was rejected by review.
    pub is_reject: bool,
    /// Review finished and the identity is verified.
    pub is_verify: bool,
}

#[async_trait]
pub trait IdentitySource: Connectable {
    async fn check_identity_status(&mut self) -> Result<IdentityStatus, String>;
}

pub struct HttpIdentityProvider {
    pub client: Option<reqwest::Client>,
    pub base_url: Option<String>,
}

impl HttpIdentityProvider {
    pub fn new() -> HttpIdentityProvider {
        HttpIdentityProvider {
            client: None,
            base_url: None,
        }
    }
}

impl Default for HttpIdentityProvider {
    fn default() -> HttpIdentityProvider {
        HttpIdentityProvider::new()
    }
}

#[async_trait]
impl IdentitySource for HttpIdentityProvider {
    async fn check_identity_status(&mut self) -> Result<IdentityStatus, String> {
        let client = match self.client.as_ref() {
            Some(client) => client,
            None => return Err("Not connected to the marketplace API".to_string()),
        };
        let base_url = match self.base_url.as_ref() {
            Some(base_url) => base_url,
            None => return Err("Not connected to the marketplace API".to_string()),
        };
        let response = match client
            .get(format!("{}/api/verification/status", base_url))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Err(e.to_string()),
        };
        match response.json::<IdentityStatus>().await {
            Ok(status) => Ok(status),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[async_trait]
impl Connectable for HttpIdentityProvider {
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
            Err(e) => return Err(e.to_string()),
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
    pub IdentityProvider {}

    #[async_trait]
    impl IdentitySource for IdentityProvider {
        async fn check_identity_status(&mut self) -> Result<IdentityStatus, String>;
    }

    #[async_trait]
    impl Connectable for IdentityProvider {
        async fn is_connected(&self) -> bool;
        async fn connect(&mut self) -> Result<(), String>;
        async fn ping(&mut self) -> Result<(), String>;
    }
}
