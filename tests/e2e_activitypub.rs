//! E2E tests for the actor, activity and object endpoints

mod common;

use common::TestServer;
use serde_json::Value;

#[tokio::test]
async fn actor_document_for_known_user() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/user/testUser"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["type"], "Person");
    assert_eq!(json["preferredUsername"], "testUser");
    assert!(
        json["id"]
            .as_str()
            .unwrap()
            .ends_with("/user/testUser")
    );
    assert_eq!(json["@context"][0], "https://www.w3.org/ns/activitystreams");
    assert_eq!(json["@context"][1], "https://w3id.org/security/v1");
    assert_eq!(json["publicKey"]["owner"], json["id"]);
    assert!(
        json["publicKey"]["publicKeyPem"]
            .as_str()
            .unwrap()
            .contains("BEGIN PUBLIC KEY")
    );
}

#[tokio::test]
async fn actor_lookup_for_unknown_user_is_404() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/user/wrongname"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), "Error, no such user");
}

#[tokio::test]
async fn activity_document_for_stored_id() {
    let server = TestServer::new().await;
    let activity_id = server.activity_id();
    let note_id = server.note_id();

    let response = server
        .client
        .get(server.url(&format!("/activity/{}", activity_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["type"], "Create");
    assert_eq!(json["cc"], "https://remote.example/users/faleidel");
    assert_eq!(json["to"][0], "https://www.w3.org/ns/activitystreams#Public");
    assert!(
        json["actor"]
            .as_str()
            .unwrap()
            .ends_with("/user/testUser")
    );
    assert!(
        json["object"]["id"]
            .as_str()
            .unwrap()
            .ends_with(&format!("/post/{}", note_id))
    );
    // Both the envelope and the nested object carry the context pair.
    assert_eq!(json["object"]["@context"][1], "https://w3id.org/security/v1");
}

#[tokio::test]
async fn activity_lookup_for_unknown_id_is_404() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/activity/000"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), "Error, no such post");
}

#[tokio::test]
async fn object_view_matches_activity_object() {
    let server = TestServer::new().await;
    let activity_id = server.activity_id();
    let note_id = server.note_id();

    let activity: Value = server
        .client
        .get(server.url(&format!("/activity/{}", activity_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let object: Value = server
        .client
        .get(server.url(&format!("/post/{}", note_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(activity["object"], object);
}

#[tokio::test]
async fn object_document_fields() {
    let server = TestServer::new().await;
    let note_id = server.note_id();

    let response = server
        .client
        .get(server.url(&format!("/post/{}", note_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let json: Value = response.json().await.unwrap();
    assert_eq!(json["type"], "Note");
    assert_eq!(json["id"], json["url"]);
    assert_eq!(json["attributedTo"], "testUser");
    assert_eq!(json["content"], "Hello from the test instance.");
    assert_eq!(json["sensitive"], false);
    assert!(json["summary"].is_null());
    assert_eq!(json["attachment"].as_array().unwrap().len(), 0);
    assert_eq!(json["tag"][0]["type"], "Mention");
    assert_eq!(json["tag"][0]["href"], "https://remote.example/users/faleidel");
    assert_eq!(json["tag"][0]["name"], "@faleidel@remote.example");
}

#[tokio::test]
async fn object_lookup_for_unknown_id_is_404() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/post/000"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), "Error, no such post");
}

#[tokio::test]
async fn activity_id_is_not_a_valid_object_id() {
    let server = TestServer::new().await;
    let activity_id = server.activity_id();

    let response = server
        .client
        .get(server.url(&format!("/post/{}", activity_id)))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn repeated_requests_yield_identical_documents() {
    let server = TestServer::new().await;
    let activity_id = server.activity_id();
    let url = server.url(&format!("/activity/{}", activity_id));

    let first = server.client.get(&url).send().await.unwrap().bytes().await.unwrap();
    let second = server.client.get(&url).send().await.unwrap().bytes().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn unmatched_path_gets_catch_all_body() {
    let server = TestServer::new().await;

    let response = server
        .client
        .get(server.url("/something/else"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert_eq!(
        response.text().await.unwrap(),
        "Error, nothing to do with this url"
    );
}
