use std::time::Duration;

use egui_kittest::Harness;
use roster_business::BusinessConfig;
use roster_ui::RosterApp;
use roster_ui::state::State;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const NAMES: [&str; 12] = [
    "Leanne Graham",
    "Ervin Howell",
    "Clementine Bauch",
    "Patricia Lebsack",
    "Chelsey Dietrich",
    "Dennis Schulist",
    "Kurtis Weissnat",
    "Nicholas Runolfsdottir",
    "Glenna Reichert",
    "Clementina DuBuque",
    "Tobin Ferry",
    "Rhys Okuneva",
];

pub fn user_json(id: u64) -> Value {
    let name = NAMES[(id as usize - 1) % NAMES.len()];
    json!({
        "id": id,
        "name": name,
        "username": format!("user{id}"),
        "email": format!("user{id}@example.com"),
        "phone": "1-770-736-8031",
        "website": "example.org",
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "company": {
            "name": format!("Company {id}"),
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    })
}

pub fn users_json(count: u64) -> Value {
    Value::Array((1..=count).map(user_json).collect())
}

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, RosterApp>,
}

impl<'a> TestCtx<'a> {
    /// App against a server that answers `/users` with twelve users.
    pub async fn new_app() -> Self {
        Self::with_users_response(ResponseTemplate::new(200).set_body_json(users_json(12))).await
    }

    #[allow(unused)]
    pub async fn new_app_with_status(status_code: u16) -> Self {
        Self::with_users_response(ResponseTemplate::new(status_code)).await
    }

    #[allow(unused)]
    pub async fn with_users_response(response: ResponseTemplate) -> Self {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(response)
            .mount(&mock_server)
            .await;
        Self::with_server(mock_server, |app| app)
    }

    /// App against a server the caller has already mocked.
    pub fn with_server(mock_server: MockServer, build: impl FnOnce(RosterApp) -> RosterApp) -> Self {
        Self::with_config(mock_server, |config| config, build)
    }

    pub fn with_config(
        mock_server: MockServer,
        configure: impl FnOnce(BusinessConfig) -> BusinessConfig,
        build: impl FnOnce(RosterApp) -> RosterApp,
    ) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let config = configure(BusinessConfig::new(mock_server.uri()));
        let harness = Harness::new_eframe(move |cc| {
            build(RosterApp::new(State::test_with(config, cc.egui_ctx.clone())))
        });

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, RosterApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Steps frames, yielding to the runtime in between, until no request is in flight.
    pub async fn settle(&mut self) {
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.harness.step();
            if self.harness.state().state.ctx.task_count() == 0 {
                break;
            }
        }
        // One more frame so the synced results are drawn.
        self.harness.step();
    }
}
