// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end checks of the HTTP transport against a local service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use redfish_api_rs::common::ListError;
use redfish_api_rs::resources::{Outlet, PowerDistribution};
use redfish_api_rs::runtime::LoggingConfig;
use redfish_api_rs::{Client, RedfishClient, RedfishClientConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
struct Seen {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: String,
}

type Documents = Arc<HashMap<&'static str, &'static str>>;

async fn read_request(stream: &mut TcpStream) -> Seen {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap().split_whitespace();
    let method = request_line.next().unwrap().to_string();
    let path = request_line.next().unwrap().to_string();
    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let length = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < head_end + length {
        let n = stream.read(&mut chunk).await.unwrap();
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[head_end..head_end + length]).to_string();

    Seen {
        method,
        path,
        headers,
        body,
    }
}

/// Serve `documents` for GET and answer PATCH with 204 until the test ends.
async fn redfish_service(documents: Documents) -> (String, Arc<Mutex<Vec<Seen>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let request = read_request(&mut stream).await;
            log.lock().unwrap().push(request.clone());

            let reply = match (request.method.as_str(), documents.get(request.path.as_str())) {
                ("PATCH", Some(_)) => {
                    "HTTP/1.1 204 No Content\r\nConnection: close\r\n\r\n".to_string()
                }
                ("GET", Some(body)) => format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                ),
                _ => {
                    let body = r#"{"error":{"code":"Base.1.8.ResourceMissingAtURI","message":"The resource was not found."}}"#;
                    format!(
                        "HTTP/1.1 404 Not Found\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    )
                }
            };
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        }
    });

    (format!("http://{addr}"), seen)
}

fn pdu_documents() -> Documents {
    let mut documents = HashMap::new();
    documents.insert(
        "/redfish/v1/PowerEquipment/RackPDUs/1",
        r#"{
            "@odata.id": "/redfish/v1/PowerEquipment/RackPDUs/1",
            "@odata.etag": "\"pdu-3\"",
            "Id": "1",
            "EquipmentType": "RackPDU",
            "UserLabel": "RACK-A",
            "Outlets": {"@odata.id": "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets"}
        }"#,
    );
    documents.insert(
        "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets",
        r#"{
            "Members": [
                {"@odata.id": "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A1"},
                {"@odata.id": "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A2"},
                {"@odata.id": "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A3"}
            ],
            "Members@odata.count": 3
        }"#,
    );
    documents.insert(
        "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A1",
        r#"{"@odata.id": "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A1", "Id": "A1"}"#,
    );
    documents.insert(
        "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A3",
        r#"{"@odata.id": "/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A3", "Id": "A3"}"#,
    );
    Arc::new(documents)
}

#[tokio::test]
async fn test_update_over_http() {
    let (endpoint, seen) = redfish_service(pdu_documents()).await;
    let client = RedfishClient::new(
        RedfishClientConfig::builder(endpoint)
            .credentials("admin", "secret")
            .build(),
    )
    .unwrap()
    .into_shared();

    let mut pdu = PowerDistribution::get(&client, "/redfish/v1/PowerEquipment/RackPDUs/1")
        .await
        .unwrap();
    pdu.user_label = Some("RACK-B".to_string());
    pdu.update().await.unwrap();

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 2);
    let patch = &seen[1];
    assert_eq!(patch.method, "PATCH");
    assert_eq!(patch.path, "/redfish/v1/PowerEquipment/RackPDUs/1");
    assert_eq!(patch.headers.get("if-match").map(String::as_str), Some("\"pdu-3\""));
    assert_eq!(
        patch.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
    assert!(patch.headers.contains_key("authorization"));
    let body: serde_json::Value = serde_json::from_str(&patch.body).unwrap();
    assert_eq!(body, serde_json::json!({"UserLabel": "RACK-B"}));
}

#[tokio::test]
async fn test_partial_collection_over_http() {
    let (endpoint, seen) = redfish_service(pdu_documents()).await;
    let client = RedfishClient::new(RedfishClientConfig::builder(endpoint).build())
        .unwrap()
        .into_shared();

    let pdu = PowerDistribution::get(&client, "/redfish/v1/PowerEquipment/RackPDUs/1")
        .await
        .unwrap();
    let err = pdu.outlets().await.unwrap_err();

    let ListError::Partial(partial) = err else {
        panic!("expected a partial failure");
    };
    let ids: Vec<&str> = partial.items.iter().map(|o: &Outlet| o.entity.id.as_str()).collect();
    assert_eq!(ids, vec!["A1", "A3"]);

    let failure = partial
        .failures
        .get("/redfish/v1/PowerEquipment/RackPDUs/1/Outlets/A2")
        .unwrap();
    assert!(failure.is_not_found());
    assert!(failure.to_string().contains("The resource was not found."));

    // PDU, collection, then each outlet once.
    assert_eq!(seen.lock().unwrap().len(), 5);
}

#[tokio::test]
async fn test_request_metrics() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();

    let (endpoint, _seen) = redfish_service(pdu_documents()).await;
    let client = RedfishClient::new(
        RedfishClientConfig::builder(endpoint)
            .credentials("admin", "secret")
            .logging(LoggingConfig::verbose())
            .build(),
    )?;

    client.get("/redfish/v1/PowerEquipment/RackPDUs/1").await?;
    let missing = client.get("/redfish/v1/PowerEquipment/RackPDUs/2").await;
    assert!(missing.is_err_and(|e| e.is_not_found()));

    let metrics = client.logger().metrics();
    assert_eq!(metrics.total_requests(), 2);
    assert_eq!(metrics.successful_requests(), 1);
    assert_eq!(metrics.failed_requests(), 1);
    Ok(())
}
