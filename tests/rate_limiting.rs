//! End-to-end tests for the admission gate.

use form_gateway::config::GatewayConfig;

mod common;

#[tokio::test]
async fn fourth_contact_submission_is_throttled() {
    let (addr, shutdown) = common::spawn_gateway(GatewayConfig::default()).await;
    let client = common::client();

    for i in 0..3 {
        let res = client
            .post(format!("http://{addr}/api/contact"))
            .header("x-forwarded-for", "203.0.113.50")
            .json(&common::valid_contact_body())
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200, "submission {i} should be admitted");
    }

    let res = client
        .post(format!("http://{addr}/api/contact"))
        .header("x-forwarded-for", "203.0.113.50")
        .json(&common::valid_contact_body())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 429);
    let retry_after = res
        .headers()
        .get("retry-after")
        .expect("Retry-After header missing")
        .to_str()
        .unwrap()
        .parse::<u64>()
        .expect("Retry-After should be numeric");
    assert!(retry_after <= 600);

    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Too many requests"));
    shutdown.trigger();
}

#[tokio::test]
async fn client_identities_are_throttled_independently() {
    let mut config = GatewayConfig::default();
    config.rate_limit.contact.max_requests = 1;
    let (addr, shutdown) = common::spawn_gateway(config).await;
    let client = common::client();

    let first = client
        .post(format!("http://{addr}/api/contact"))
        .header("x-forwarded-for", "203.0.113.60")
        .json(&common::valid_contact_body())
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 200);

    let same_identity = client
        .post(format!("http://{addr}/api/contact"))
        .header("x-forwarded-for", "203.0.113.60")
        .json(&common::valid_contact_body())
        .send()
        .await
        .unwrap();
    assert_eq!(same_identity.status(), 429);

    let other_identity = client
        .post(format!("http://{addr}/api/contact"))
        .header("x-forwarded-for", "203.0.113.61")
        .json(&common::valid_contact_body())
        .send()
        .await
        .unwrap();
    assert_eq!(other_identity.status(), 200);
    shutdown.trigger();
}

#[tokio::test]
async fn rate_check_runs_before_body_parsing() {
    let mut config = GatewayConfig::default();
    config.rate_limit.contact.max_requests = 1;
    let (addr, shutdown) = common::spawn_gateway(config).await;
    let client = common::client();

    // Exhaust the window, then send garbage: the gate answers first.
    client
        .post(format!("http://{addr}/api/contact"))
        .header("x-forwarded-for", "203.0.113.70")
        .json(&common::valid_contact_body())
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("http://{addr}/api/contact"))
        .header("x-forwarded-for", "203.0.113.70")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 429);
    shutdown.trigger();
}

#[tokio::test]
async fn endpoints_have_separate_budgets() {
    let mut config = GatewayConfig::default();
    config.rate_limit.contact.max_requests = 1;
    config.rate_limit.newsletter.max_requests = 1;
    let (addr, shutdown) = common::spawn_gateway(config).await;
    let client = common::client();

    client
        .post(format!("http://{addr}/api/contact"))
        .header("x-forwarded-for", "203.0.113.80")
        .json(&common::valid_contact_body())
        .send()
        .await
        .unwrap();

    // Contact budget is spent; the newsletter key is untouched.
    let res = client
        .post(format!("http://{addr}/api/newsletter"))
        .header("x-forwarded-for", "203.0.113.80")
        .json(&serde_json::json!({ "email": "reader@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    shutdown.trigger();
}

#[tokio::test]
async fn missing_identity_headers_share_the_unknown_bucket() {
    let mut config = GatewayConfig::default();
    config.rate_limit.contact.max_requests = 1;
    let (addr, shutdown) = common::spawn_gateway(config).await;
    let client = common::client();

    let first = client
        .post(format!("http://{addr}/api/contact"))
        .json(&common::valid_contact_body())
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 200);

    let second = client
        .post(format!("http://{addr}/api/contact"))
        .json(&common::valid_contact_body())
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 429);
    shutdown.trigger();
}
