use dioxus::prelude::*;
use types::{Branch, ConsoleSettings, Group, ListQuery, NewUser, Paginated, User, UserField};

#[post("/api/branches")]
pub async fn list_branches(query: ListQuery) -> ServerFnResult<Paginated<Branch>> {
    Ok(server::list_branches(query).await?)
}

#[post("/api/users")]
pub async fn list_users(query: ListQuery) -> ServerFnResult<Paginated<User>> {
    Ok(server::list_users(query).await?)
}

#[post("/api/groups")]
pub async fn list_groups(query: ListQuery) -> ServerFnResult<Paginated<Group>> {
    Ok(server::list_groups(query).await?)
}

#[post("/api/user-fields")]
pub async fn list_user_fields() -> ServerFnResult<Vec<UserField>> {
    Ok(server::list_user_fields().await?)
}

#[post("/api/users/create")]
pub async fn create_user(new_user: NewUser) -> ServerFnResult<User> {
    Ok(server::create_user(new_user).await?)
}

#[post("/api/settings")]
pub async fn get_tenant_settings() -> ServerFnResult<ConsoleSettings> {
    Ok(server::console_settings().await?)
}
