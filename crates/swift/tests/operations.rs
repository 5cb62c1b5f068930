//! Container and object operations against a mock Swift account

mod common;

use std::time::Duration;

use common::*;
use futures::future::join_all;
use serde_json::json;
use swc_core::{Error, ObjectStore, UploadSource, empty_container, ensure_container};
use swc_swift::SwiftClient;
use wiremock::matchers::{body_bytes, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

#[tokio::test]
async fn test_list_containers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ACCOUNT_PATH))
        .and(query_param("format", "json"))
        .and(header("X-Auth-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(containers()))
        .expect(1)
        .mount(&server)
        .await;

    let containers = session(&server).list_containers().await.unwrap();
    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0].name, "test");
    assert_eq!(containers[1].bytes, 5246);
}

#[tokio::test]
async fn test_listing_ignores_advertised_charset() {
    let server = MockServer::start().await;
    let body = json!([{"name": "写真", "bytes": 0, "count": 0}]).to_string();
    Mock::given(method("GET"))
        .and(path(ACCOUNT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.into_bytes(), "application/json; charset=iso-8859-1"),
        )
        .mount(&server)
        .await;

    let containers = session(&server).list_containers().await.unwrap();
    assert_eq!(containers[0].name, "写真");
}

#[tokio::test]
async fn test_empty_account_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(session(&server).list_containers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_listing_is_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ACCOUNT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("test\ntest2\n"))
        .mount(&server)
        .await;

    let result = session(&server).list_containers().await;
    assert!(matches!(result, Err(Error::Json(_))));
}

#[tokio::test]
async fn test_container_lifecycle_statuses() {
    let server = MockServer::start().await;
    let container_path = account_path(&[CONTAINER]);
    Mock::given(method("PUT"))
        .and(path(container_path.as_str()))
        .and(header("X-Auth-Token", TOKEN))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path(container_path.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(container_path.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    assert_eq!(client.create_container(CONTAINER).await.unwrap(), 201);
    assert!(client.container_exists(CONTAINER).await.unwrap());
    assert_eq!(client.delete_container(CONTAINER).await.unwrap(), 204);
}

#[tokio::test]
async fn test_existing_container_put_returns_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(account_path(&[CONTAINER])))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let scope = session(&server);
    assert_eq!(scope.container(CONTAINER).unwrap().create().await.unwrap(), 202);
}

#[tokio::test]
async fn test_missing_container_does_not_exist() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path(account_path(&["missing"])))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    assert!(!client.container_exists("missing").await.unwrap());
    assert!(matches!(
        client.container_metadata("missing").await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_container_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path(account_path(&[CONTAINER])))
        .respond_with(
            ResponseTemplate::new(204)
                .insert_header("X-Container-Object-Count", "3")
                .insert_header("X-Container-Bytes-Used", "15738")
                .insert_header("X-Container-Meta-Owner", "ops"),
        )
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    let meta = client.container_metadata(CONTAINER).await.unwrap();
    assert_eq!(meta.name, CONTAINER);
    assert_eq!(meta.object_count, Some(3));
    assert_eq!(meta.bytes_used, Some(15738));
    assert_eq!(meta.metadata["owner"], "ops");
}

#[tokio::test]
async fn test_list_objects_uses_trailing_slash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/", account_path(&[CONTAINER]))))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(objects()))
        .expect(1)
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    let objects = client.list_objects(CONTAINER).await.unwrap();

    let names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["sample.txt", "sample_2.txt", "sample_3.txt"]);
    assert_eq!(objects[2].hash.as_deref(), Some("d226a3f396cbe3c187f2b7b78030eebb"));
}

#[tokio::test]
async fn test_list_objects_missing_container() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/", account_path(&["missing"]))))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>Not Found</html>"))
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    assert!(matches!(
        client.list_objects("missing").await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_create_object_from_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join(OBJECT);
    std::fs::write(&file, b"sample content\n").unwrap();

    Mock::given(method("PUT"))
        .and(path(account_path(&[CONTAINER, OBJECT])))
        .and(header("X-Auth-Token", TOKEN))
        .and(header("Content-Length", "15"))
        .and(header("Content-Type", "text/plain"))
        .and(body_bytes(b"sample content\n".to_vec()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    let status = client
        .create_object(CONTAINER, UploadSource::LocalFile(file), None)
        .await
        .unwrap();
    assert_eq!(status, 201);
}

#[tokio::test]
async fn test_create_zero_byte_object_sends_content_length() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("empty.dat");
    std::fs::write(&file, b"").unwrap();

    Mock::given(method("PUT"))
        .and(path(account_path(&[CONTAINER, "empty.dat"])))
        .and(header("Content-Length", "0"))
        .and(header("Content-Type", "application/x-empty"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    let status = client
        .create_object(CONTAINER, UploadSource::LocalFile(file), None)
        .await
        .unwrap();
    assert_eq!(status, 201);
}

#[tokio::test]
async fn test_create_object_from_stream_with_name() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(account_path(&[CONTAINER, "image"])))
        .and(header("Content-Type", "image/png"))
        .and(header("Content-Length", PNG.len().to_string().as_str()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    let status = client
        .create_object(
            CONTAINER,
            UploadSource::stream(std::io::Cursor::new(PNG.to_vec())),
            Some("image".into()),
        )
        .await
        .unwrap();
    assert_eq!(status, 201);
}

#[tokio::test]
async fn test_create_object_from_stream_without_name() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    let result = client
        .create_object(CONTAINER, UploadSource::stream(std::io::empty()), None)
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_concurrent_uploads_keep_their_own_headers() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(account_path(&[CONTAINER, "a.png"])))
        .and(header("Content-Type", "image/png"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(account_path(&[CONTAINER, "b.txt"])))
        .and(header("Content-Type", "text/plain"))
        .and(header("Content-Length", "5"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let session = session(&server);
    let container = session.container(CONTAINER).unwrap();
    let image = container.object("a.png");
    let text = container.object("b.txt");
    let uploads = vec![
        image.create(UploadSource::stream(std::io::Cursor::new(PNG.to_vec()))),
        text.create(UploadSource::stream(std::io::Cursor::new(b"hello".to_vec()))),
    ];
    let statuses: Vec<u16> = join_all(uploads)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(statuses, vec![201, 201]);
    assert_eq!(session.auth_headers().len(), 1);
    assert!(session.auth_headers().get("content-type").is_none());
}

#[tokio::test]
async fn test_retrieve_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(account_path(&[CONTAINER, OBJECT])))
        .and(header("X-Auth-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"sample content\n".to_vec()))
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    let (ok, body) = client.retrieve_object(CONTAINER, OBJECT).await.unwrap();
    assert!(ok);
    assert_eq!(body, b"sample content\n");
}

#[tokio::test]
async fn test_retrieve_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(account_path(&[CONTAINER, "empty.dat"])))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    let (ok, body) = client.retrieve_object(CONTAINER, "empty.dat").await.unwrap();
    assert!(ok);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_retrieve_missing_object_is_not_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(account_path(&[CONTAINER, "missing.txt"])))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    let (ok, body) = client.retrieve_object(CONTAINER, "missing.txt").await.unwrap();
    assert!(!ok);
    assert_eq!(body, b"Not Found");
}

#[tokio::test]
async fn test_copy_object() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(account_path(&[CONTAINER, DEST])))
        .and(header("X-Auth-Token", TOKEN))
        .and(header("X-Copy-From", "/test/sample.txt"))
        .and(header("Content-Length", "0"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    let status = client.copy_object(CONTAINER, OBJECT, DEST).await.unwrap();
    assert_eq!(status, 201);
}

#[tokio::test]
async fn test_object_exists_and_delete() {
    let server = MockServer::start().await;
    let object_path = account_path(&[CONTAINER, OBJECT]);
    Mock::given(method("HEAD"))
        .and(path(object_path.as_str()))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(object_path.as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    assert!(client.object_exists(CONTAINER, OBJECT).await.unwrap());
    assert_eq!(client.delete_object(CONTAINER, OBJECT).await.unwrap(), 204);
}

#[tokio::test]
async fn test_object_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path(account_path(&[CONTAINER, OBJECT])))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/plain")
                .insert_header("ETag", "\"d226a3f396cbe3c187f2b7b78030eebb\"")
                .insert_header("Last-Modified", "Wed, 01 May 2013 08:40:00 GMT")
                .insert_header("X-Object-Meta-Color", "blue"),
        )
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    let meta = client.object_metadata(CONTAINER, OBJECT).await.unwrap();
    assert_eq!(meta.name, OBJECT);
    assert_eq!(meta.content_type.as_deref(), Some("text/plain"));
    assert_eq!(meta.etag.as_deref(), Some("d226a3f396cbe3c187f2b7b78030eebb"));
    assert_eq!(
        meta.last_modified.as_deref(),
        Some("Wed, 01 May 2013 08:40:00 GMT")
    );
    assert_eq!(meta.metadata["color"], "blue");
}

#[tokio::test]
async fn test_per_call_timeout_override() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path(account_path(&[CONTAINER])))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let session = session(&server);
    let quick = session.with_timeout(Duration::from_millis(200));
    let err = quick
        .container(CONTAINER)
        .unwrap()
        .exists()
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(session.timeout(), Duration::from_secs(5));
}

#[tokio::test]
async fn test_store_helpers_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path(account_path(&[CONTAINER])))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(account_path(&[CONTAINER])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/", account_path(&[CONTAINER]))))
        .respond_with(ResponseTemplate::new(200).set_body_json(objects()))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(3)
        .mount(&server)
        .await;

    let client = SwiftClient::new(session(&server));
    assert!(ensure_container(&client, CONTAINER).await.unwrap());

    let summary = empty_container(&client, CONTAINER).await.unwrap();
    assert_eq!(summary.deleted.len(), 3);
    assert!(summary.is_complete());
}
