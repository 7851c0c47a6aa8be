// API client module: a small async HTTP client that talks to the relief
// API. One method per remote endpoint; none of them keep any state beyond
// the base URL, so the bearer token is passed in by the caller.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{
    AidRequest, AidRequestInput, AuthResponse, Credentials, Donor, DonorInput, TaskInput,
    Volunteer, VolunteerInput, VolunteerTask,
};

/// Longest server error body kept in an `ApiError::Status`.
const MAX_ERROR_BODY: usize = 200;

/// Async API client holding a reqwest client and the parsed base URL.
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client for `base_url`, e.g. `http://localhost:8080` or
    /// `https://relief.example.org/api`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Url(format!("{base_url} cannot be used as a base")));
        }
        let client = Client::builder().build()?;
        Ok(ApiClient { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Join path segments onto the base URL. Each segment is percent-encoded,
    /// so a task id typed by the operator cannot escape its path position.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(format!("{} cannot be used as a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Authorization header for bearer-protected calls.
    fn auth_headers(token: &str) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        let val = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::Url("token contains characters not allowed in a header".into()))?;
        headers.insert(AUTHORIZATION, val);
        Ok(headers)
    }

    /// Send the request and turn non-2xx answers into `ApiError::Status`.
    async fn send(req: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            let mut body = res.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(ApiError::Status { status, body });
        }
        Ok(res)
    }

    async fn get_list<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Vec<T>, ApiError> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        let res = Self::send(self.client.get(url)).await?;
        Ok(res.json().await?)
    }

    async fn post_json<B: serde::Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.endpoint(segments)?;
        debug!(%url, "POST");
        Self::send(self.client.post(url).json(body)).await
    }

    /// POST `/auth/register` and return the issued token.
    pub async fn register(&self, creds: &Credentials) -> Result<String, ApiError> {
        let res = self.post_json(&["auth", "register"], creds).await?;
        let resp: AuthResponse = res.json().await?;
        Ok(resp.token)
    }

    /// POST `/auth/login` and return the issued token.
    pub async fn login(&self, creds: &Credentials) -> Result<String, ApiError> {
        let res = self.post_json(&["auth", "login"], creds).await?;
        let resp: AuthResponse = res.json().await?;
        Ok(resp.token)
    }

    pub async fn list_aid_requests(&self) -> Result<Vec<AidRequest>, ApiError> {
        self.get_list(&["aid", "requests"]).await
    }

    /// POST `/aid/requests` with the bearer token. The token is not checked
    /// here; an empty one is sent as-is and the server decides.
    pub async fn create_aid_request(
        &self,
        input: &AidRequestInput,
        token: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["aid", "requests"])?;
        debug!(%url, "POST (authenticated)");
        let req = self
            .client
            .post(url)
            .headers(Self::auth_headers(token)?)
            .json(input);
        Self::send(req).await?;
        Ok(())
    }

    pub async fn list_donors(&self) -> Result<Vec<Donor>, ApiError> {
        self.get_list(&["donors"]).await
    }

    pub async fn create_donor(&self, input: &DonorInput) -> Result<(), ApiError> {
        self.post_json(&["donors"], input).await?;
        Ok(())
    }

    pub async fn list_volunteers(&self) -> Result<Vec<Volunteer>, ApiError> {
        self.get_list(&["volunteers"]).await
    }

    pub async fn create_volunteer(&self, input: &VolunteerInput) -> Result<(), ApiError> {
        self.post_json(&["volunteers"], input).await?;
        Ok(())
    }

    pub async fn list_tasks(&self) -> Result<Vec<VolunteerTask>, ApiError> {
        self.get_list(&["volunteers", "tasks"]).await
    }

    pub async fn create_task(&self, input: &TaskInput) -> Result<(), ApiError> {
        self.post_json(&["volunteers", "tasks"], input).await?;
        Ok(())
    }

    /// POST `/volunteers/tasks/assign/{id}` without a body. A 2xx only
    /// means the server accepted the call, not that it assigned anyone.
    pub async fn assign_task(&self, task_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["volunteers", "tasks", "assign", task_id])?;
        debug!(%url, "POST");
        Self::send(self.client.post(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
