//! Registration against the external HTTP collaborator.
//!
//! The endpoint is fully external; the client depends only on the
//! request/response contract of `POST /new-user`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Nickname, User};

use super::dto::http::{NewUserRequest, NewUserResponse};

/// Errors raised while registering a nickname.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The server refused the nickname (e.g. already taken)
    #[error("{0}")]
    Rejected(String),

    /// The endpoint could not be reached or the response body could not
    /// be decoded
    #[error("registration request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response that carried no usable user
    #[error("registration response did not contain a valid user")]
    MalformedResponse,
}

/// Abstraction over the registration endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Register `name` with the server and return the assigned user.
    async fn register(&self, name: &Nickname) -> Result<User, RegistrationError>;
}

/// `RegistrationApi` implementation backed by the chat server's HTTP API.
pub struct HttpRegistrationApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRegistrationApi {
    /// Create a client for the registration endpoint at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RegistrationApi for HttpRegistrationApi {
    async fn register(&self, name: &Nickname) -> Result<User, RegistrationError> {
        let url = format!("{}/new-user", self.base_url);
        let request = NewUserRequest {
            name: name.as_str().to_string(),
        };

        tracing::debug!("Registering nickname '{}' at {}", name, url);
        let response = self.client.post(&url).json(&request).send().await?;
        let body: NewUserResponse = response.json().await?;

        if body.status == "ok" {
            let dto = body.user.ok_or(RegistrationError::MalformedResponse)?;
            return User::try_from(dto).map_err(|_| RegistrationError::MalformedResponse);
        }

        Err(RegistrationError::Rejected(body.message.unwrap_or_else(
            || "nickname was rejected by the server".to_string(),
        )))
    }
}
