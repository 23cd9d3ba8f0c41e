use crate::utils::{get_env_var, Connectable};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Shape of the session service's answer. `success` false means the service
/// could not resolve the session at all; the gate treats both that and any
/// transport error as not logged in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SessionStatus {
    pub success: bool,
    pub is_logged_in: bool,
}

#[async_trait]
pub trait SessionSource: Connectable {
    async fn check_session(&mut self) -> Result<SessionStatus, String>;
}

pub struct HttpSessionProvider {
    pub client: Option<reqwest::Client>,
    pub base_url: Option<String>,
}

impl HttpSessionProvider {
    pub fn new() -> HttpSessionProvider {
        HttpSessionProvider {
            client: None,
            base_url: None,
        }
    }
}

impl Default for HttpSessionProvider {
    fn default() -> HttpSessionProvider {
        HttpSessionProvider::new()
    }
}

#[async_trait]
impl SessionSource for HttpSessionProvider {
    async fn check_session(&mut self) -> Result<SessionStatus, String> {
        let client = match self.client.as_ref() {
            Some(client) => client,
            None => return Err("Not connected to the marketplace API".to_string()),
        };
        let base_url = match self.base_url.as_ref() {
            Some(base_url) => base_url,
            None => return Err("Not connected to the marketplace API".to_string()),
        };
        let response = match client.get(format!("{}/api/session", base_url)).send().await {
            Ok(response) => response,
            Err(e) => return Err(e.to_string()),
        };
        match response.json::<SessionStatus>().await {
            Ok(status) => Ok(status),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[async_trait]
impl Connectable for HttpSessionProvider {
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
    pub SessionProvider {}

    #[async_trait]
    impl SessionSource for SessionProvider {
        async fn check_session(&mut self) -> Result<SessionStatus, String>;
    }

    #[async_trait]
    impl Connectable for SessionProvider {
        async fn is_connected(&self) -> bool;
        async fn connect(&mut self) -> Result<(), String>;
        async fn ping(&mut self) -> Result<(), String>;
    }
}
