//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use serde_json::{Value, json};
use swc_swift::{DEFAULT_TIMEOUT, Session};
use wiremock::MockServer;

pub const TOKEN: &str = "AUTH_tk55ed712a114a467ca10e3841bb98accf";
pub const ACCOUNT_PATH: &str = "/v1/AUTH_c1d6a4bc-892d-4106-9c62-36a48ea0f129";
pub const KEYSTONE_TOKEN: &str = "4bbf2976ab9d4703b85207054dbdb701";
pub const CONTAINER: &str = "test";
pub const OBJECT: &str = "sample.txt";
pub const DEST: &str = "sample_1.txt";

/// Storage URL served by `server`
pub fn storage_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), ACCOUNT_PATH)
}

/// Path of a resource below the account
pub fn account_path(segments: &[&str]) -> String {
    let mut path = ACCOUNT_PATH.to_string();
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    path
}

/// Session pointed at `server`
pub fn session(server: &MockServer) -> Session {
    Session::new(storage_url(server), TOKEN, true, DEFAULT_TIMEOUT).unwrap()
}

pub fn containers() -> Value {
    json!([
        {"bytes": 0, "count": 0, "name": "test"},
        {"bytes": 5246, "count": 1, "name": "test2"}
    ])
}

pub fn objects() -> Value {
    json!([
        {
            "bytes": 5246,
            "content_type": "text/plain",
            "hash": "d226a3f396cbe3c187f2b7b78030eebb",
            "last_modified": "2013-05-01T08:40:00.459930",
            "name": "sample.txt"
        },
        {
            "bytes": 5246,
            "content_type": "text/plain",
            "hash": "d226a3f396cbe3c187f2b7b78030eebb",
            "last_modified": "2013-05-01T08:40:02.193190",
            "name": "sample_2.txt"
        },
        {
            "bytes": 5246,
            "content_type": "text/plain",
            "hash": "d226a3f396cbe3c187f2b7b78030eebb",
            "last_modified": "2013-05-01T08:40:03.987650",
            "name": "sample_3.txt"
        }
    ])
}

/// KeyStone v2 token response whose swift endpoint is `public_url`
pub fn keystone_v2_response(public_url: &str) -> Value {
    json!({
        "access": {
            "token": {
                "expires": "2013-05-02T08:40:00Z",
                "id": KEYSTONE_TOKEN,
                "tenant": {"id": "c6f41799c8e44974bf6b2f3af9495dc0", "name": "guest"}
            },
            "serviceCatalog": [
                {
                    "endpoints": [{
                        "adminURL": "http://example.org:8774/v2/c6f41799c8e44974bf6b2f3af9495dc0",
                        "publicURL": "http://example.org:8774/v2/c6f41799c8e44974bf6b2f3af9495dc0"
                    }],
                    "name": "nova",
                    "type": "compute"
                },
                {
                    "endpoints": [{
                        "adminURL": "http://example.org:8080",
                        "publicURL": public_url
                    }],
                    "name": "swift",
                    "type": "object-store"
                }
            ],
            "user": {"id": "u1", "name": "guest", "roles": [{"name": "Member"}]}
        }
    })
}

/// KeyStone v3 token body whose object-store endpoint is `url`
pub fn keystone_v3_response(url: &str) -> Value {
    json!({
        "token": {
            "methods": ["password"],
            "expires_at": "2013-05-02T08:40:00.000000Z",
            "catalog": [
                {
                    "type": "identity",
                    "name": "keystone",
                    "endpoints": [{"interface": "public", "url": "http://example.org:5000/v3"}]
                },
                {
                    "type": "object-store",
                    "name": "swift",
                    "endpoints": [{"interface": "public", "url": url}]
                }
            ]
        }
    })
}
