//! HTTP implementation of [`Homeserver`]

use super::error::{ClientError, ClientResult};
use super::types::*;
use super::Homeserver;
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

const CLIENT_API_PREFIX: [&str; 3] = ["_matrix", "client", "v3"];

/// HTTP client for a Matrix homeserver
pub struct MatrixClient {
    client: Client,
    base_url: Url,
    access_token: Option<String>,
}

impl MatrixClient {
    /// Create a client for the homeserver at `base_url`
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client: Client::builder().build()?,
            base_url,
            access_token: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/_matrix/client/v3/<segments...>`, percent-encoding
    /// each segment so room ids and state keys stay intact
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(CLIENT_API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    fn token(&self) -> ClientResult<&str> {
        self.access_token.as_deref().ok_or(ClientError::NotLoggedIn)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, url: Url, body: &B, auth: bool) -> ClientResult<T> {
        debug!("POST {}", url.path());
        let mut request = self.client.post(url).json(body);
        if auth {
            request = request.bearer_auth(self.token()?);
        }
        handle_response(request.send().await?).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, url: Url, body: &B) -> ClientResult<T> {
        debug!("PUT {}", url.path());
        let response = self
            .client
            .put(url)
            .bearer_auth(self.token()?)
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    // Bodies without a Matrix errcode (e.g. from a proxy) keep their raw text
    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<MatrixErrorBody>(&text)
        .ok()
        .filter(|b| !b.errcode.is_empty())
        .unwrap_or(MatrixErrorBody {
            errcode: String::new(),
            error: text,
        });

    Err(ClientError::Api {
        status: status.as_u16(),
        errcode: body.errcode,
        message: body.error,
    })
}

#[async_trait]
impl Homeserver for MatrixClient {
    async fn login(&mut self, user_id: &str, password: &SecretString) -> ClientResult<Session> {
        let url = self.endpoint(&["login"])?;
        let body = LoginRequest::password(user_id, password.expose_secret());
        let resp: LoginResponse = self.post(url, &body, false).await?;

        let access_token = resp
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(ClientError::MissingField("access_token"))?;

        self.access_token = Some(access_token.clone());

        Ok(Session {
            user_id: resp.user_id.unwrap_or_else(|| user_id.to_string()),
            access_token,
        })
    }

    async fn create_room(&self, request: &CreateRoomRequest) -> ClientResult<String> {
        let url = self.endpoint(&["createRoom"])?;
        let resp: CreateRoomResponse = self.post(url, request, true).await?;
        resp.room_id.ok_or(ClientError::MissingField("room_id"))
    }

    async fn put_state(&self, room_id: &str, event: &StateEvent) -> ClientResult<String> {
        let url = self.endpoint(&["rooms", room_id, "state", &event.event_type, &event.state_key])?;
        let resp: PutStateResponse = self.put(url, &event.content).await?;
        resp.event_id.ok_or(ClientError::MissingField("event_id"))
    }
}
