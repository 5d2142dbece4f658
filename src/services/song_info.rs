use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AppError, Result};

/// Details the song info service knows about a (group, song) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongDetail {
    #[serde(rename = "releaseDate")]
    pub release_date: String,
    pub text: Vec<String>,
    pub link: String,
}

/// Client for the external lookup used to enrich newly added songs.
#[derive(Clone)]
pub struct SongInfoService {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl SongInfoService {
    pub fn new(base_url: String, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// `GET {base}/info?group=&song=`; anything but 200 is a failure.
    pub async fn get_song_detail(&self, group: &str, song: &str) -> Result<SongDetail> {
        let url = format!("{}/info", self.base_url.trim_end_matches('/'));

        let mut request = self
            .client
            .get(&url)
            .query(&[("group", group), ("song", song)]);
        if let Some(token) = &self.token {
            request = request.header("Authorization", token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(url = %url, "Request to song info service failed: {}", e);
            AppError::HttpRequest(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "Song info service returned an error status");
            return Err(AppError::ExternalApi(format!(
                "Received non-200 response status code: {}",
                status
            )));
        }

        let detail: SongDetail = response.json().await.map_err(|e| {
            tracing::warn!("Can't decode song info response: {}", e);
            AppError::HttpRequest(e)
        })?;

        Ok(detail)
    }
}
