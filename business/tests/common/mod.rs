#![allow(dead_code)]

use roster_business::{BusinessConfig, UserRecord, build_state_ctx, sync_user_pipeline};
use roster_states::StateCtx;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Names chosen so that exactly three contain an "a".
pub const NAMES: [&str; 10] = [
    "Alice", "Bob", "Carl", "Dee", "Eve", "Finn", "Gus", "Hugo", "Ivy", "Nadia",
];

pub fn user_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "username": name.to_lowercase(),
        "email": format!("{}@example.com", name.to_lowercase()),
        "address": {
            "street": "Main St",
            "suite": format!("Apt. {id}"),
            "city": "Springfield",
            "zipcode": "12345",
            "geo": { "lat": "0.0", "lng": "0.0" }
        },
        "phone": format!("555-01{id:02}"),
        "website": format!("{}.example.com", name.to_lowercase()),
        "company": {
            "name": format!("Company {:03}", 999u64.saturating_sub(id)),
            "catchPhrase": "Synergy",
            "bs": "leverage"
        }
    })
}

pub fn users_json(count: usize) -> Value {
    Value::Array(
        NAMES
            .iter()
            .cycle()
            .take(count)
            .enumerate()
            .map(|(index, name)| user_json(index as u64 + 1, name))
            .collect(),
    )
}

pub fn records(count: usize) -> Vec<UserRecord> {
    serde_json::from_value(users_json(count)).expect("fixture should decode")
}

pub async fn mount_users(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn ctx_for(server: &MockServer) -> StateCtx {
    build_state_ctx(BusinessConfig::new(server.uri()))
}

/// Waits for every spawned command, then applies their updates like a frame would.
pub async fn settle(ctx: &mut StateCtx) {
    while ctx.task_set_mut().join_next().await.is_some() {}
    ctx.sync_computes();
    sync_user_pipeline(ctx);
}
