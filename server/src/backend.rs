use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, Url, header::HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use types::{Branch, Group, ListQuery, NewUser, Paginated, TenantSettings, User, UserField};

use crate::config::Config;

const TENANT_HEADER: &str = "x-tenant";

/// A paginated collection of the backend and the query parameter that
/// scopes it to a branch.
#[derive(Debug, Clone, Copy)]
struct Collection {
    path: &'static str,
    scope_key: &'static str,
}

const BRANCHES: Collection = Collection {
    path: "branches",
    scope_key: "parent_id",
};

const USERS: Collection = Collection {
    path: "users",
    scope_key: "branch_id",
};

const GROUPS: Collection = Collection {
    path: "groups",
    scope_key: "branch_id",
};

trait ReqwestExt {
    async fn try_send<T: DeserializeOwned>(self) -> Result<T>;
}

impl ReqwestExt for RequestBuilder {
    async fn try_send<T: DeserializeOwned>(self) -> Result<T> {
        let response = self
            .send()
            .await
            .context("admin backend unreachable")?
            .error_for_status()?;
        let path = response.url().path().to_owned();
        let body = response.bytes().await?;

        match serde_json::from_slice(&body) {
            Ok(r) => Ok(r),
            Err(error) => {
                tracing::debug!(%error, path, "failed to parse backend response");
                Err(error).with_context(|| format!("unexpected response from {path}"))
            }
        }
    }
}

/// Client for the tenant's admin backend.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
    token: SecretString,
    tenant: HeaderValue,
    max_page_size: usize,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self> {
        let tenant =
            HeaderValue::from_str(&config.tenant).context("tenant is not a valid header value")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
            token: config.backend_token.clone(),
            tenant,
            max_page_size: config.max_page_size,
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;

        Ok(self
            .client
            .request(method, url)
            .bearer_auth(self.token.expose_secret())
            .header(TENANT_HEADER, self.tenant.clone()))
    }

    fn get(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::GET, path)
    }

    fn post(&self, path: &str) -> Result<RequestBuilder> {
        self.request(Method::POST, path)
    }

    fn list(&self, collection: Collection, query: &ListQuery) -> Result<RequestBuilder> {
        let params = query
            .clone()
            .with_page_size_limit(self.max_page_size)
            .to_params(collection.scope_key);
        Ok(self.get(collection.path)?.query(&params))
    }

    pub async fn list_branches(&self, query: &ListQuery) -> Result<Paginated<Branch>> {
        self.list(BRANCHES, query)?.try_send().await
    }

    pub async fn list_users(&self, query: &ListQuery) -> Result<Paginated<User>> {
        self.list(USERS, query)?.try_send().await
    }

    pub async fn list_groups(&self, query: &ListQuery) -> Result<Paginated<Group>> {
        self.list(GROUPS, query)?.try_send().await
    }

    pub async fn list_user_fields(&self) -> Result<Vec<UserField>> {
        self.get("user-fields")?.try_send().await
    }

    pub async fn create_user(&self, new_user: &NewUser) -> Result<User> {
        self.post("users")?.json(new_user).try_send().await
    }

    pub async fn tenant_settings(&self) -> Result<TenantSettings> {
        self.get("settings")?.try_send().await
    }
}
