use reqwest::{Method, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use utoipa::ToSchema;

use super::error::SupabaseError;
use crate::config::Settings;
use crate::init::StartupError;

/// A row of the backend `todos` table. `id` and `user_id` are
/// backend-assigned; the gateway never writes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    pub id: i64,
    pub user_id: String,
    pub title: String,
    pub done: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
}

/// Process-wide, immutable. Everything per-caller lives in the
/// [`SupabaseClient`] it hands out.
#[derive(Debug, Clone)]
pub struct ClientFactory {
    anon_key: String,
    auth_user_url: Url,
    todos_url: Url,
}

impl ClientFactory {
    pub fn new(settings: &Settings) -> Result<Self, StartupError> {
        let mut base_url = Url::parse(&settings.supabase.url)
            .map_err(|_| StartupError::InvalidBackendUrl(settings.supabase.url.clone()))?;

        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let join = |path: &str| {
            base_url
                .join(path)
                .map_err(|_| StartupError::InvalidBackendUrl(settings.supabase.url.clone()))
        };

        Ok(Self {
            anon_key: settings.supabase.anon_key.clone(),
            auth_user_url: join("auth/v1/user")?,
            todos_url: join("rest/v1/todos")?,
        })
    }

    /// Builds a fresh client scoped to one request. Falls back to the anon
    /// key when the caller presented no token, matching what the official
    /// client library sends by default.
    pub fn for_token(&self, token: Option<&str>) -> SupabaseClient {
        let bearer = token.unwrap_or(&self.anon_key).to_string();

        SupabaseClient {
            http: reqwest::Client::new(),
            anon_key: self.anon_key.clone(),
            bearer,
            auth_user_url: self.auth_user_url.clone(),
            todos_url: self.todos_url.clone(),
        }
    }
}

/// Caller-scoped handle to the backend, created and discarded within a
/// single request.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    anon_key: String,
    bearer: String,
    auth_user_url: Url,
    todos_url: Url,
}

impl SupabaseClient {
    /// Resolves the caller through the token this client carries. Any
    /// rejection from the auth endpoint means the token resolves to no user.
    #[instrument(name = "supabase::current_user", skip_all)]
    pub async fn current_user(&self) -> Result<AuthUser, SupabaseError> {
        let res = self
            .request(Method::GET, self.auth_user_url.clone())
            .send()
            .await?;

        if !res.status().is_success() {
            info!(status = %res.status(), "backend rejected token");
            return Err(SupabaseError::Unauthorized);
        }

        res.json::<AuthUser>().await.map_err(SupabaseError::Decode)
    }

    /// All rows owned by `user_id`, ordered by id. Row-level security
    /// already scopes the query; the filter is defense in depth.
    #[instrument(name = "supabase::list_todos", skip(self))]
    pub async fn list_todos(&self, user_id: &str) -> Result<Vec<Todo>, SupabaseError> {
        let mut url = self.todos_url.clone();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("user_id", &format!("eq.{user_id}"))
            .append_pair("order", "id.asc");

        let res = self.send(self.request(Method::GET, url)).await?;

        res.json().await.map_err(SupabaseError::Decode)
    }

    /// Inserts whatever the caller sent. The body is relayed untouched;
    /// absent or wrong-typed fields are the backend's to reject.
    #[instrument(name = "supabase::insert_todo", skip_all)]
    pub async fn insert_todo(&self, todo: &serde_json::Value) -> Result<Vec<Todo>, SupabaseError> {
        let res = self
            .send(
                self.request(Method::POST, self.todos_url.clone())
                    .header("Prefer", "return=representation")
                    .json(todo),
            )
            .await?;

        res.json().await.map_err(SupabaseError::Decode)
    }

    /// Updates the row matching `id`, relaying the body untouched. Rows the
    /// caller does not own are invisible to the backend query, so the
    /// representation comes back empty instead of erroring.
    #[instrument(name = "supabase::update_todo", skip(self, todo))]
    pub async fn update_todo(
        &self,
        id: &str,
        todo: &serde_json::Value,
    ) -> Result<Vec<Todo>, SupabaseError> {
        let mut url = self.todos_url.clone();
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let res = self
            .send(
                self.request(Method::PATCH, url)
                    .header("Prefer", "return=representation")
                    .json(todo),
            )
            .await?;

        res.json().await.map_err(SupabaseError::Decode)
    }

    #[instrument(name = "supabase::delete_todo", skip(self))]
    pub async fn delete_todo(&self, id: &str) -> Result<(), SupabaseError> {
        let mut url = self.todos_url.clone();
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        self.send(self.request(Method::DELETE, url)).await?;

        Ok(())
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.bearer)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, SupabaseError> {
        let res = req.send().await?;

        if res.status().is_success() {
            return Ok(res);
        }

        let status = res.status().as_u16();
        let detail = res.text().await.map_err(SupabaseError::Decode)?;
        error!(status = %status, detail = %detail, "backend reported an error");

        Err(SupabaseError::Backend { status, detail })
    }
}
