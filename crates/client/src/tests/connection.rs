use core::time::Duration;

use cfgtree_primitives::{Endpoint, Operation, Payload};
use serde_json::json;

use super::{client, err, ok, requests, MockTransport};
use crate::connection::Connection;
use crate::errors::{ClientError, ProtocolError};

fn show(path: &str) -> Payload {
    Operation::show(path.parse().unwrap()).into()
}

#[tokio::test]
async fn test_returns_envelope_data() {
    let connection =
        Connection::new(MockTransport::new().respond(&ok(json!({ "host-name": "gw" }))));

    let data = connection.request(&show("system")).await.unwrap();

    assert_eq!(data, json!({ "host-name": "gw" }));
}

#[tokio::test]
async fn test_error_message_is_preserved() {
    let message = "Commit failed\n[ service ssh ]\nport must be between 1 and 65535";
    let connection = Connection::new(MockTransport::new().respond(&err(message)));

    let result = connection.request(&show("service ssh")).await;

    assert!(matches!(result, Err(ClientError::Store(m)) if m == message));
}

#[tokio::test]
async fn test_error_wins_over_success_flag() {
    let connection = Connection::new(
        MockTransport::new().respond(&json!({ "success": true, "data": null, "error": "boom" })),
    );

    let result = connection.request(&show("a")).await;

    assert!(matches!(result, Err(ClientError::Store(m)) if m == "boom"));
}

#[tokio::test]
async fn test_unsuccessful_without_message() {
    let connection = Connection::new(
        MockTransport::new().respond(&json!({ "success": false, "data": null, "error": null })),
    );

    let result = connection.request(&show("a")).await;

    assert!(matches!(
        result,
        Err(ClientError::Protocol(ProtocolError::Unsuccessful))
    ));
}

#[tokio::test]
async fn test_missing_fields_default() {
    let connection = Connection::new(MockTransport::new().respond(&json!({ "data": "x" })));

    let data = connection.request(&show("a")).await.unwrap();

    assert_eq!(data, json!("x"));
}

#[tokio::test]
async fn test_routes_payload_to_endpoint() {
    let client = client(MockTransport::new());

    let _ignored = client.connection().request(&show("a")).await.unwrap();
    let _ignored = client
        .connection()
        .request(&Operation::delete("a".parse().unwrap()).into())
        .await
        .unwrap();

    let endpoints: Vec<_> = requests(&client)
        .into_iter()
        .map(|(endpoint, _)| endpoint)
        .collect();
    assert_eq!(endpoints, [Endpoint::Retrieve, Endpoint::Configure]);
}

#[tokio::test]
async fn test_exchanges_never_overlap() {
    let client = client(MockTransport::with_delay(Duration::from_millis(20)));
    let service = client.config();

    let (a, b, c, d) = tokio::join!(
        service.set("a", "1"),
        service.set("b", "2"),
        service.show_tree("c"),
        service.delete(["d"]),
    );

    a.unwrap();
    b.unwrap();
    // `data: null` is not a tree
    assert!(matches!(c, Err(ClientError::UnexpectedResponseShape(_))));
    d.unwrap();

    assert_eq!(requests(&client).len(), 4);
    assert_eq!(client.connection().transport().max_in_flight(), 1);
}

#[tokio::test]
async fn test_exchanges_never_overlap_across_tasks() {
    let client = client(MockTransport::with_delay(Duration::from_millis(10)));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.config().set("counter", &i.to_string()).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(requests(&client).len(), 8);
    assert_eq!(client.connection().transport().max_in_flight(), 1);
}
