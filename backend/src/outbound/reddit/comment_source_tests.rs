//! Tests for the Reddit comment adapter against a local stub server.

use std::time::Duration;

use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::HandlePolicy;
use crate::test_support::upstream::{StubResponse, UpstreamStub, unreachable_base_url};

fn source(api_base: Url) -> RedditCommentSource {
    RedditCommentSource::new(&RedditEndpoints {
        auth_base: api_base.clone(),
        api_base,
        user_agent: "profile-backend-tests/0.1".to_owned(),
        timeout: Duration::from_secs(5),
    })
    .expect("adapter builds")
}

fn handle(raw: &str) -> Handle {
    Handle::parse(raw, HandlePolicy::default()).expect("valid handle")
}

fn token() -> AccessToken {
    AccessToken::new("bearer-xyz")
}

fn listing(bodies: &[Option<&str>]) -> Value {
    let children: Vec<Value> = bodies
        .iter()
        .map(|body| match body {
            Some(text) => json!({ "kind": "t1", "data": { "body": text } }),
            None => json!({ "kind": "t3", "data": { "title": "link" } }),
        })
        .collect();
    json!({ "kind": "Listing", "data": { "after": null, "children": children } })
}

#[actix_web::test]
async fn returns_bodies_in_platform_order() {
    let stub = UpstreamStub::start([(
        "/user/spez/comments",
        StubResponse::json(
            200,
            listing(&[Some("newest"), None, Some("  "), Some("middle"), Some("oldest")]),
        ),
    )]);

    let comments = source(stub.base_url())
        .fetch_comments(&handle("spez"), &token(), CommentLimit::new(25).expect("limit"))
        .await
        .expect("listing fetched");

    assert_eq!(comments.bodies(), ["newest", "middle", "oldest"].map(str::to_owned));
    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].query, "limit=25&raw_json=1");
    assert_eq!(requests[0].header("authorization"), Some("Bearer bearer-xyz"));
    stub.stop().await;
}

#[actix_web::test]
async fn unknown_user_is_not_found() {
    let stub = UpstreamStub::start([(
        "/user/doesnotexist123/comments",
        StubResponse::json(404, json!({ "message": "Not Found", "error": 404 })),
    )]);

    let error = source(stub.base_url())
        .fetch_comments(&handle("doesnotexist123"), &token(), CommentLimit::default())
        .await
        .expect_err("unknown user");

    assert_eq!(error, CommentSourceError::not_found("doesnotexist123"));
    stub.stop().await;
}

#[rstest]
#[case::no_children(listing(&[]))]
#[case::only_links(listing(&[None, None]))]
#[case::only_blank(listing(&[Some(""), Some("\n")]))]
#[actix_web::test]
async fn listing_without_text_is_empty(#[case] payload: Value) {
    let stub = UpstreamStub::start([(
        "/user/quiet_one/comments",
        StubResponse::json(200, payload),
    )]);

    let error = source(stub.base_url())
        .fetch_comments(&handle("quiet_one"), &token(), CommentLimit::default())
        .await
        .expect_err("no text");

    assert_eq!(error, CommentSourceError::empty("quiet_one"));
    stub.stop().await;
}

#[rstest]
#[case(403)]
#[case(429)]
#[case(503)]
#[actix_web::test]
async fn other_statuses_carry_status_and_body(#[case] status: u16) {
    let stub = UpstreamStub::start([(
        "/user/spez/comments",
        StubResponse::raw(status, "upstream   says\nno"),
    )]);

    let error = source(stub.base_url())
        .fetch_comments(&handle("spez"), &token(), CommentLimit::default())
        .await
        .expect_err("status failure");

    assert_eq!(error, CommentSourceError::status(status, "upstream says no"));
    stub.stop().await;
}

#[rstest]
#[case::missing_data(json!({ "kind": "Listing" }))]
#[case::missing_children(json!({ "kind": "Listing", "data": { "after": null } }))]
#[case::wrong_shape(json!([1, 2, 3]))]
#[actix_web::test]
async fn unexpected_structure_is_malformed(#[case] payload: Value) {
    let stub = UpstreamStub::start([("/user/spez/comments", StubResponse::json(200, payload))]);

    let error = source(stub.base_url())
        .fetch_comments(&handle("spez"), &token(), CommentLimit::default())
        .await
        .expect_err("malformed listing");

    assert_eq!(error.label(), "malformed");
    stub.stop().await;
}

#[actix_web::test]
async fn connection_failure_is_transport_error() {
    let error = source(unreachable_base_url())
        .fetch_comments(&handle("spez"), &token(), CommentLimit::default())
        .await
        .expect_err("nothing listening");

    assert_eq!(error.label(), "transport");
}

#[test]
fn listing_url_encodes_handle_and_limit() {
    let source = source(Url::parse("https://oauth.reddit.com").expect("url"));
    let lenient = Handle::parse(
        "odd name",
        HandlePolicy {
            validate_shape: false,
        },
    )
    .expect("non-empty");

    let url = source
        .listing_url(&lenient, CommentLimit::default())
        .expect("url builds");

    assert_eq!(
        url.as_str(),
        "https://oauth.reddit.com/user/odd%20name/comments?limit=100&raw_json=1"
    );
}
