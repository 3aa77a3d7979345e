use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{Identity, PROFILE_ROUTE, Profile, ProfileInput, USER_ROUTE, WriteOutcome};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedBody(String),
}

/// Transport seam between the form and the profile store.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn fetch_profile(&self) -> Result<Profile, ClientError>;

    async fn save_profile(&self, input: &ProfileInput) -> Result<WriteOutcome, ClientError>;

    async fn fetch_user(&self) -> Result<Identity, ClientError>;
}

pub struct HttpProfileApi {
    client: Client,
    base_url: String,
}

impl HttpProfileApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }
}

async fn check(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = res.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl ProfileApi for HttpProfileApi {
    async fn fetch_profile(&self) -> Result<Profile, ClientError> {
        let res = self.client.get(self.url(PROFILE_ROUTE)).send().await?;

        Ok(check(res).await?.json().await?)
    }

    async fn save_profile(&self, input: &ProfileInput) -> Result<WriteOutcome, ClientError> {
        let res = self
            .client
            .post(self.url(PROFILE_ROUTE))
            .json(input)
            .send()
            .await?;

        let text = check(res).await?.text().await?;

        text.parse()
            .map_err(|_| ClientError::UnexpectedBody(text.clone()))
    }

    async fn fetch_user(&self) -> Result<Identity, ClientError> {
        let res = self.client.get(self.url(USER_ROUTE)).send().await?;

        Ok(check(res).await?.json().await?)
    }
}
