//! Navigation between the dashboard, the details page and the not-found page.

use kittest::Queryable;
use roster_business::Route;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{TestCtx, user_json, users_json};

mod common;

async fn server_with_users() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users_json(12)))
        .mount(&server)
        .await;
    server
}

fn route_of(ctx: &mut TestCtx<'_>) -> Route {
    ctx.harness_mut().state().state.ctx.state::<Route>().clone()
}

#[tokio::test]
async fn test_open_details_from_table_and_go_back() {
    let server = server_with_users().await;
    Mock::given(method("GET"))
        .and(path("/users/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(2)))
        .expect(1)
        .mount(&server)
        .await;
    let mut ctx = TestCtx::with_server(server, |app| app);
    ctx.settle().await;

    ctx.harness_mut().get_by_label("Ervin Howell").click();
    ctx.harness_mut().step();
    ctx.settle().await;

    assert_eq!(route_of(&mut ctx), Route::UserDetails("2".to_owned()));
    let harness = ctx.harness_mut();
    assert!(harness.query_by_label("User Details").is_some());
    assert!(harness.query_by_label("@user2").is_some());
    assert!(harness.query_by_label("user2@example.com").is_some());
    assert!(harness.query_by_label("Company 2").is_some());

    harness.get_by_label("⬅ Back to users").click();
    harness.step();
    harness.step();

    assert_eq!(route_of(&mut ctx), Route::Dashboard);
    assert!(ctx.harness_mut().query_by_label("Leanne Graham").is_some());
}

#[tokio::test]
async fn test_missing_user_shows_not_found_warning() {
    let server = server_with_users().await;
    Mock::given(method("GET"))
        .and(path("/users/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;
    let mut ctx = TestCtx::with_server(server, |app| {
        app.with_route(Route::UserDetails("99".to_owned()))
    });
    ctx.settle().await;

    let harness = ctx.harness_mut();
    assert!(harness.query_by_label("User 99 was not found.").is_some());

    harness.get_by_label("Dismiss").click();
    harness.step();
    harness.step();

    assert!(harness.query_by_label("User 99 was not found.").is_none());
    assert!(harness.query_by_label("Retry").is_some());
}

#[tokio::test]
async fn test_invalid_id_is_rejected_without_request() {
    let server = server_with_users().await;
    let mut ctx = TestCtx::with_server(server, |app| {
        app.with_route(Route::UserDetails("abc".to_owned()))
    });
    ctx.settle().await;

    assert!(
        ctx.harness_mut()
            .query_by_label_contains("Invalid user ID")
            .is_some()
    );

    let requests = ctx.server().received_requests().await.unwrap_or_default();
    assert!(
        requests.iter().all(|request| request.url.path() == "/users"),
        "only the list should have been requested"
    );
}

#[tokio::test]
async fn test_unknown_path_shows_not_found_page() {
    let server = server_with_users().await;
    let mut ctx = TestCtx::with_server(server, |app| {
        app.with_route(Route::from_path("/nope/nothing"))
    });
    ctx.settle().await;

    assert!(ctx.harness_mut().query_by_label("404 Not Found").is_some());

    ctx.harness_mut().get_by_label("Go to the dashboard").click();
    ctx.harness_mut().step();
    ctx.harness_mut().step();

    assert_eq!(route_of(&mut ctx), Route::Dashboard);
    assert!(ctx.harness_mut().query_by_label("User Dashboard").is_some());

    // The list is first requested on reaching the dashboard.
    ctx.settle().await;
    assert!(ctx.harness_mut().query_by_label("Leanne Graham").is_some());
}
