//! BDD step definitions for check-host feature

use std::sync::Arc;

use cucumber::{given, then, when};

use checkhost_relay::checkhost::{CheckHostClient, CheckHostResponse};
use checkhost_relay::io::HttpClient;

use crate::world::RelayWorld;

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[given(expr = "a check-host response with request id {string} and permanent link {string}")]
fn check_host_response(world: &mut RelayWorld, request_id: String, permanent_link: String) {
    world.check_response = Some(CheckHostResponse {
        request_id: non_empty(request_id),
        permanent_link: non_empty(permanent_link),
    });
}

#[then(expr = "the result link should be {string}")]
fn result_link(world: &mut RelayWorld, expected: String) {
    let response = world.check_response.as_ref().expect("response not set");
    assert_eq!(response.result_link(), expected);
}

#[when(expr = "a check is created for {string}")]
async fn create_check(world: &mut RelayWorld, host: String) {
    let http: Arc<dyn HttpClient> = Arc::clone(&world.http) as Arc<dyn HttpClient>;
    let client = CheckHostClient::new(http);
    world.check_result = Some(client.check(&host, world.proxy_url.as_deref()).await);
}

#[then(expr = "the check should return {string}")]
fn check_returns(world: &mut RelayWorld, expected: String) {
    let result = world.check_result.as_ref().expect("no result");
    assert_eq!(result.as_ref().unwrap(), &expected);
}

#[then(expr = "the check should fail with an error containing {string}")]
fn check_fails_with(world: &mut RelayWorld, fragment: String) {
    let result = world.check_result.as_ref().expect("no result");
    let err = result.as_ref().unwrap_err();
    assert!(err.to_string().contains(&fragment), "{err}");
}
