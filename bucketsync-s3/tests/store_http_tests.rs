//! Request/response mapping of `S3Store` against a mock S3 endpoint.

mod support;

use bucketsync_core::{ContentDigest, ObjectAcl, ObjectStore, StoreError};
use bucketsync_s3::store::canned_acl;
use pretty_assertions::assert_eq;
use tokio::io::AsyncReadExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HELLO_ETAG: &str = "\"5d41402abc4b2a76b9719d911017c592\"";

#[tokio::test]
async fn lookup_returns_etag_and_last_modified() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/bucketsync-test/a.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", HELLO_ETAG)
                .insert_header("Last-Modified", "Wed, 21 Oct 2015 07:28:00 GMT"),
        )
        .mount(&server)
        .await;

    let store = support::store_for(&server.uri()).await;
    let meta = store.lookup("a.txt").await.unwrap();

    assert_eq!(meta.etag.as_deref(), Some(HELLO_ETAG));
    assert!(ContentDigest::of_bytes(b"hello").matches_tag(meta.etag.as_deref().unwrap()));
    assert_eq!(
        meta.last_modified.map(|t| t.timestamp()),
        Some(1_445_412_480)
    );
}

#[tokio::test]
async fn lookup_404_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/bucketsync-test/missing.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = support::store_for(&server.uri()).await;
    let err = store.lookup("missing.txt").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn lookup_403_is_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/bucketsync-test/secret.txt"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let store = support::store_for(&server.uri()).await;
    let err = store.lookup("secret.txt").await.unwrap_err();
    assert!(!err.is_not_found());
    assert!(err.to_string().contains("head object failed for secret.txt"));
}

#[tokio::test]
async fn open_reader_streams_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bucketsync-test/b.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"world".to_vec()))
        .mount(&server)
        .await;

    let store = support::store_for(&server.uri()).await;
    let mut reader = store.open_reader("b.txt").await.unwrap();
    let mut out = Vec::new();
    reader.read_to_end(&mut out).await.unwrap();

    assert_eq!(out, b"world");
}

#[tokio::test]
async fn open_reader_forbidden_is_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bucketsync-test/b.txt"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let store = support::store_for(&server.uri()).await;
    let err = store.open_reader("b.txt").await.err().unwrap();
    assert!(matches!(err, StoreError::Backend(_)));
    assert!(err.to_string().contains("download failed for b.txt"));
}

#[tokio::test]
async fn write_object_sends_body_type_and_acl() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/bucketsync-test/docs/a.txt"))
        .respond_with(ResponseTemplate::new(200).insert_header("ETag", HELLO_ETAG))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let src = support::write_file(dir.path(), "a.txt", b"hello");
    let file = tokio::fs::File::open(&src).await.unwrap();

    let store = support::store_for(&server.uri()).await;
    store
        .write_object("docs/a.txt", file, 5, "text/plain", ObjectAcl::PublicRead)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.body, b"hello");
    assert_eq!(
        request.headers.get("content-type").unwrap().to_str().unwrap(),
        "text/plain"
    );
    assert_eq!(
        request.headers.get("x-amz-acl").unwrap().to_str().unwrap(),
        "public-read"
    );
}

#[test]
fn canned_acl_matches_header_values() {
    for acl in [
        ObjectAcl::Private,
        ObjectAcl::PublicRead,
        ObjectAcl::PublicReadWrite,
        ObjectAcl::AuthenticatedRead,
        ObjectAcl::BucketOwnerRead,
        ObjectAcl::BucketOwnerFullControl,
    ] {
        assert_eq!(canned_acl(acl).as_str(), acl.as_str());
    }
}
