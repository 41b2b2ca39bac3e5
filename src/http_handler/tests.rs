use super::http_request::{post_order_post::PostOrderRequest, task_blocks_post::TaskBlocksRequest};
use super::http_request::request_common::{HTTPRequestType, JSONBodyHTTPRequestType};
use super::http_response::{
    post_order::PostOrderResponse,
    response_common::{HTTPResponseType, ResponseError},
    task_blocks::TaskBlocksResponse,
};
use super::http_client::HTTPClient;
use super::common::HTTPError;
use super::{FleetGateway, MissionOrder, TaskBlock};
use crate::topology::SlotId;
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

/// Answers one connection per canned `(status, body)` pair and returns the
/// raw requests it received.
async fn canned_fleet(replies: Vec<(u16, String)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status, body) in replies {
            let (mut socket, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut socket).await);
            let reply = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
        requests
    });
    (base_url, handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&raw).into_owned();
        let Some(head_end) = text.find("\r\n\r\n") else { continue };
        let body_len = text[..head_end]
            .lines()
            .filter_map(|l| l.split_once(':'))
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if raw.len() >= head_end + 4 + body_len {
            break;
        }
    }
    String::from_utf8(raw).unwrap()
}

#[test]
fn test_post_order_body() {
    let req = PostOrderRequest {
        label_ref: String::from("00400160200426780644"),
        to_slot: String::from("AMR01"),
        final_slot: String::from("AMR08"),
    };
    assert_eq!(req.endpoint(), "/script-api/postOrder");
    assert_eq!(
        serde_json::to_value(req.body()).unwrap(),
        json!({"label_ref": "00400160200426780644", "to_slot": "AMR01", "final_slot": "AMR08"})
    );
}

#[test]
fn test_task_blocks_body() {
    let req = TaskBlocksRequest { task_record_id: String::from("AMR01L1") };
    assert_eq!(serde_json::to_value(req.body()).unwrap(), json!({"taskRecordId": "AMR01L1"}));
}

#[test]
fn test_post_order_accepted_codes() {
    assert!(PostOrderResponse::is_accepted(StatusCode::OK));
    assert!(PostOrderResponse::is_accepted(StatusCode::CREATED));
    assert!(!PostOrderResponse::is_accepted(StatusCode::ACCEPTED));
    assert!(!PostOrderResponse::is_accepted(StatusCode::INTERNAL_SERVER_ERROR));
}

#[test]
fn test_task_blocks_response() {
    let body = json!({
        "code": 0,
        "data": {
            "blockList": [
                {"blockLabel": "DispatchUnit", "status": 1003, "blockId": "b1"},
                {"blockLabel": "Wait", "status": 1001}
            ]
        }
    });
    let resp = TaskBlocksResponse::parse_body(body.to_string().as_bytes()).unwrap();
    assert_eq!(
        resp.into_blocks(),
        vec![TaskBlock::new("DispatchUnit", 1003), TaskBlock::new("Wait", 1001)]
    );
}

#[test]
fn test_task_blocks_malformed() {
    let missing_data = json!({"code": 0}).to_string();
    assert!(matches!(
        TaskBlocksResponse::parse_body(missing_data.as_bytes()),
        Err(ResponseError::Malformed(_))
    ));
    assert!(matches!(TaskBlocksResponse::parse_body(b"<html>"), Err(ResponseError::Malformed(_))));
    let empty = json!({"data": {}}).to_string();
    assert!(TaskBlocksResponse::parse_body(empty.as_bytes()).unwrap().into_blocks().is_empty());
}

#[tokio::test]
async fn test_http_client_against_fleet_socket() {
    let blocks = json!({"data": {"blockList": [{"blockLabel": "DispatchUnit", "status": 1003}]}});
    let (base_url, server) = canned_fleet(vec![
        (500, String::from("{\"msg\": \"busy\"}")),
        (201, String::from("{}")),
        (200, blocks.to_string()),
    ])
    .await;
    let client = HTTPClient::new(&base_url, Duration::from_secs(5)).unwrap();
    let order = MissionOrder {
        label_ref: String::from("L1"),
        origin_slot: SlotId::Amr01,
        destination_slot: SlotId::Amr08,
    };

    let refused = client.dispatch(&order).await.unwrap_err();
    assert!(matches!(
        refused,
        HTTPError::HTTPResponseError(ResponseError::Rejected { status: 500, .. })
    ));
    client.dispatch(&order).await.unwrap();
    let list = client.query_blocks("AMR01L1").await.unwrap();
    assert_eq!(list, vec![TaskBlock::new("DispatchUnit", 1003)]);

    let requests = server.await.unwrap();
    assert!(requests[0].starts_with("POST /script-api/postOrder "));
    assert!(requests[1].contains(r#""label_ref":"L1""#));
    assert!(requests[1].contains(r#""to_slot":"AMR01""#));
    assert!(requests[2].starts_with("POST /script-api/queryBlocksByTaskId "));
    assert!(requests[2].contains(r#""taskRecordId":"AMR01L1""#));
}

#[tokio::test]
async fn test_http_client_unreachable_fleet() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let client = HTTPClient::new(&base_url, Duration::from_secs(2)).unwrap();
    let err = client.query_blocks("AMR01L1").await.unwrap_err();
    assert!(matches!(err, HTTPError::HTTPResponseError(ResponseError::NoConnection)));
}
