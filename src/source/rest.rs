use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::{header, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use api::request::QuerySession;
use api::response::{ConnectionRecord, SessionList, SessionRecord};

use super::SnapshotSource;
use crate::config::Server;
use crate::error::Error;
use crate::result::Result;

const BASIC_USERNAME: &str = "OPENVIDUAPP";

#[derive(Clone)]
pub struct HttpSource {
    url: String,
    authorization: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: String, secret: &str) -> Result<Self> {
        Self::with_timeout(
            url,
            secret,
            Duration::from_millis(500),
            Duration::from_millis(1000),
        )
    }

    pub fn with_timeout(
        url: String,
        secret: &str,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            url: url.trim_end_matches('/').to_string(),
            authorization: basic_authorization(secret),
            client,
        })
    }

    pub fn from_config(server: &Server) -> Result<Self> {
        Self::with_timeout(
            server.url.clone(),
            &server.secret,
            Duration::from_millis(server.connect_timeout),
            Duration::from_millis(server.timeout),
        )
    }

    async fn get<T: DeserializeOwned>(&self, path: String) -> Result<T> {
        let url = format!("{}{}", self.url, path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, &self.authorization)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                trace!("{}: {}", url, body);
                serde_json::from_str::<T>(&body).map_err(Error::Decode)
            }
            StatusCode::NOT_FOUND => Err(Error::NotFound),
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            status => Err(Error::Status(status)),
        }
    }
}

fn basic_authorization(secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", BASIC_USERNAME, secret));
    format!("Basic {}", encoded)
}

#[async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch_session(&self, session_id: &str) -> Result<SessionRecord> {
        self.get(api::path::session(session_id, &QuerySession::with_pending()))
            .await
    }

    async fn fetch_sessions(&self) -> Result<Vec<SessionRecord>> {
        let list: SessionList = self
            .get(api::path::sessions(&QuerySession::with_pending()))
            .await?;
        Ok(list.content)
    }

    async fn fetch_connection(
        &self,
        session_id: &str,
        connection_id: &str,
    ) -> Result<ConnectionRecord> {
        self.get(api::path::connection(session_id, connection_id))
            .await
    }
}
