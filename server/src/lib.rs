mod backend;
mod config;

use std::sync::{Arc, PoisonError, RwLock};

use axum::{Router, routing::get};
use tracing_subscriber::EnvFilter;
use types::{
    Branch, ConsoleSettings, Group, ListQuery, NewUser, Paginated, Result, User, UserField, err,
};

pub use crate::backend::BackendClient;
pub use crate::config::Config;

/// Shared state of the running server.
pub struct Services {
    pub config: Config,
    pub backend: BackendClient,
}

static SERVICES: RwLock<Option<Arc<Services>>> = RwLock::new(None);

/// Log to stdout, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed, e.g. by the dioxus CLI.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Load configuration, install the services and return the extra routes to
/// serve next to the app.
pub async fn init() -> Result<Router> {
    let config = Config::load()?;
    let backend = BackendClient::new(&config)?;
    tracing::info!(
        backend = %config.backend_url,
        tenant = %config.tenant,
        "admin console services ready"
    );
    install(Services { config, backend });

    Ok(Router::new().route("/healthz", get(healthz)))
}

pub fn install(services: Services) -> Arc<Services> {
    let services = Arc::new(services);
    *SERVICES.write().unwrap_or_else(PoisonError::into_inner) = Some(services.clone());
    services
}

pub fn services() -> Result<Arc<Services>> {
    SERVICES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or_else(|| err!("server services are not initialised"))
}

/// Drop the installed services. Requests made afterwards fail until the next
/// [`init`].
pub fn shutdown() {
    if SERVICES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .is_some()
    {
        tracing::info!("admin console services stopped");
    }
}

async fn healthz() -> &'static str {
    "ok"
}

pub async fn list_branches(query: ListQuery) -> Result<Paginated<Branch>> {
    Ok(services()?.backend.list_branches(&query).await?)
}

pub async fn list_users(query: ListQuery) -> Result<Paginated<User>> {
    Ok(services()?.backend.list_users(&query).await?)
}

pub async fn list_groups(query: ListQuery) -> Result<Paginated<Group>> {
    Ok(services()?.backend.list_groups(&query).await?)
}

pub async fn list_user_fields() -> Result<Vec<UserField>> {
    Ok(services()?.backend.list_user_fields().await?)
}

/// Trim and validate a new user before it is sent anywhere.
fn prepare(new_user: NewUser) -> Result<NewUser> {
    let new_user = new_user.normalized();
    new_user.validate()?;
    Ok(new_user)
}

/// Validate and create a user. Invalid input never reaches the backend.
pub async fn create_user(new_user: NewUser) -> Result<User> {
    let new_user = prepare(new_user)?;
    let services = services()?;
    let user = services.backend.create_user(&new_user).await?;
    tracing::info!(username = %user.username, "created user");
    Ok(user)
}

pub async fn console_settings() -> Result<ConsoleSettings> {
    let services = services()?;
    let tenant = services.backend.tenant_settings().await?;
    Ok(ConsoleSettings {
        tenant,
        default_page_size: services.config.default_page_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            backend_url: "http://127.0.0.1:9/".parse().unwrap(),
            backend_token: "s3cret".to_string().into(),
            tenant: "acme".into(),
            default_page_size: 10,
            max_page_size: 100,
            request_timeout_secs: 1,
        }
    }

    #[test]
    fn new_user_is_trimmed_before_sending() {
        let new_user = NewUser {
            name: " Lina Khoury ".into(),
            username: " lina.k ".into(),
            email: "lina@example.com ".into(),
            branch_id: Some(types::NodeId::Int(5)),
        };

        let prepared = prepare(new_user).unwrap();

        assert_eq!(prepared.name, "Lina Khoury");
        assert_eq!(prepared.username, "lina.k");
        assert_eq!(prepared.email, "lina@example.com");
    }

    #[tokio::test]
    async fn services_lifecycle() {
        shutdown();
        let err = list_groups(ListQuery::default()).await.unwrap_err();
        assert!(err.message.contains("not initialised"), "{err}");

        let config = config();
        let backend = BackendClient::new(&config).unwrap();
        install(Services { config, backend });
        assert_eq!(services().unwrap().config.tenant, "acme");

        // Validation runs before any request is made.
        let err = create_user(NewUser::default()).await.unwrap_err();
        assert!(err.message.contains("Name is required"), "{err}");

        shutdown();
        assert!(services().is_err());
    }
}
