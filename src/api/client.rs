use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{
    AuthenticationRequest, AuthenticationResponse, Movie, MovieId, MovieListRequest,
    MovieRequest, PageResponse, PageResult, RegistrationRequest, RegistrationResponse,
    UserId, UserIdentity, VoteKind, VoteRecord, VoteRequest,
};
use crate::config::{build_auth_header, ApiConfig, SecureString};

/// Path prefix of every service endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Correlation header attached to every outgoing request.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Typed client for the MovieRama service.
///
/// Cheap to clone: clones share the connection pool and the default
/// bearer credential, so `set_bearer`/`clear_bearer` affect every holder.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    bearer: Arc<RwLock<Option<SecureString>>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach a credential as the default `Authorization` header.
    pub fn set_bearer(&self, token: SecureString) {
        *self.bearer.write() = Some(token);
    }

    pub fn clear_bearer(&self) {
        *self.bearer.write() = None;
    }

    pub fn has_bearer(&self) -> bool {
        self.bearer.read().is_some()
    }

    /// `POST /auth/authenticate`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<SecureString, ApiError> {
        let body = AuthenticationRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let builder = self.request_with(Method::POST, "/auth/authenticate", None).json(&body);
        let response: AuthenticationResponse = self.fetch(builder).await?;
        Ok(SecureString::new(response.token))
    }

    /// `POST /auth/register`.
    pub async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResponse, ApiError> {
        let builder = self.request_with(Method::POST, "/auth/register", None).json(request);
        self.fetch(builder).await
    }

    /// `GET /auth/activate-account?activation-code=<code>`.
    pub async fn activate_account(&self, code: &str) -> Result<(), ApiError> {
        let builder = self
            .request_with(Method::GET, "/auth/activate-account", None)
            .query(&[("activation-code", code)]);
        self.execute(builder).await.map(|_| ())
    }

    /// `GET /user/info` with the default credential.
    pub async fn user_info(&self) -> Result<UserIdentity, ApiError> {
        let builder = self.request(Method::GET, "/user/info");
        self.fetch(builder).await
    }

    /// `GET /user/info` with an explicit credential that is not (yet) the default.
    pub async fn user_info_with(&self, token: &SecureString) -> Result<UserIdentity, ApiError> {
        let builder = self.request_with(Method::GET, "/user/info", Some(token));
        self.fetch(builder).await
    }

    /// `GET /user/votes`.
    pub async fn user_votes(&self) -> Result<Vec<VoteRecord>, ApiError> {
        let builder = self.request(Method::GET, "/user/votes");
        self.fetch(builder).await
    }

    /// `GET /public/movies`.
    pub async fn list_movies(&self, request: &MovieListRequest) -> Result<PageResult, ApiError> {
        let mut query: Vec<(&str, String)> = listing_query(request);
        if let Some(title) = request.title.as_ref().filter(|t| !t.is_empty()) {
            query.push(("title", title.clone()));
        }
        let builder = self.request(Method::GET, "/public/movies").query(&query);
        let page: PageResponse = self.fetch(builder).await?;
        Ok(page.into_result(request))
    }

    /// `GET /public/movies/owner/{userId}`. The owner route has no title filter.
    pub async fn list_owner_movies(
        &self,
        owner: UserId,
        request: &MovieListRequest,
    ) -> Result<PageResult, ApiError> {
        let path = format!("/public/movies/owner/{}", owner);
        let builder = self.request(Method::GET, &path).query(&listing_query(request));
        let page: PageResponse = self.fetch(builder).await?;
        Ok(page.into_result(request))
    }

    /// `GET /movies/{id}`.
    pub async fn movie(&self, id: MovieId) -> Result<Movie, ApiError> {
        let builder = self.request(Method::GET, &format!("/movies/{}", id));
        self.fetch(builder).await
    }

    /// `PUT /votes/movie/{id}`.
    ///
    /// Returns `None` when the service retracted the vote (empty body or a
    /// vote object without a type).
    pub async fn cast_vote(
        &self,
        id: MovieId,
        kind: VoteKind,
    ) -> Result<Option<VoteRecord>, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/votes/movie/{}", id))
            .json(&VoteRequest { vote_type: kind });
        let body = self.execute(builder).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        let record: Option<VoteRecord> = decode(&body)?;
        Ok(record.filter(|r| r.vote_type.is_some()))
    }

    /// `POST /movies`.
    pub async fn create_movie(&self, request: &MovieRequest) -> Result<Movie, ApiError> {
        let builder = self.request(Method::POST, "/movies").json(request);
        self.fetch(builder).await
    }

    /// `PUT /movies/{id}`.
    pub async fn update_movie(&self, id: MovieId, request: &MovieRequest) -> Result<Movie, ApiError> {
        let builder = self
            .request(Method::PUT, &format!("/movies/{}", id))
            .json(request);
        self.fetch(builder).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let token = self.bearer.read().clone();
        self.request_with(method, path, token.as_ref())
    }

    fn request_with(
        &self,
        method: Method,
        path: &str,
        token: Option<&SecureString>,
    ) -> RequestBuilder {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        let mut builder = self.client.request(method, url);
        if let Some((name, value)) = token.and_then(build_auth_header) {
            builder = builder.header(name, value);
        }
        builder
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let body = self.execute(builder).await?;
        decode(&body)
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let request_id = Uuid::new_v4().to_string();
        let response = builder
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        tracing::debug!(
            request_id = %request_id,
            url = %response.url(),
            status = status.as_u16(),
            "API response"
        );

        let body = response.bytes().await.map_err(ApiError::from_transport)?;
        if status.is_success() {
            Ok(body.to_vec())
        } else {
            let err = ApiError::from_response(status.as_u16(), &body);
            tracing::debug!(request_id = %request_id, error = %err, "API call rejected");
            Err(err)
        }
    }
}

fn listing_query(request: &MovieListRequest) -> Vec<(&'static str, String)> {
    vec![
        ("sortField", request.sort_field.as_str().to_string()),
        ("page", request.page_index.to_string()),
        ("size", request.size.to_string()),
        ("sortType", request.sort_direction.as_str().to_string()),
    ]
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}
