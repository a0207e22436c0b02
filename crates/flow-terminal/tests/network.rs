// crates/flow-terminal/tests/network.rs
use std::time::Duration;

use flow_core::{FetchError, FetchRequest, QueryFilter, RequestKind};
use flow_terminal::network::{endpoint_url, FetchResponse, TradeFeedConnection};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

fn request(seq: u64) -> FetchRequest {
    FetchRequest {
        seq,
        kind: RequestKind::Reload,
        offset: 0,
        limit: 100,
        filter: QueryFilter {
            option_type: vec!["PUT".into()],
            ..Default::default()
        },
    }
}

/// Serve `bodies` in order, one HTTP exchange per connection, and return
/// the request bodies that were received.
async fn serve(listener: TcpListener, bodies: Vec<(u16, String)>) -> Vec<String> {
    let mut seen = Vec::new();
    for (status, body) in bodies {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let request_body = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed early");
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(split) = text.find("\r\n\r\n") {
                let head = text[..split].to_ascii_lowercase();
                let length = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= split + 4 + length {
                    break text[split + 4..split + 4 + length].to_string();
                }
            }
        };
        seen.push(request_body);

        let response = format!(
            "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    }
    seen
}

#[test]
fn endpoint_joins_base_and_path() {
    assert_eq!(endpoint_url("http://h:1"), "http://h:1/api/option-trades");
    assert_eq!(endpoint_url("http://h:1/"), "http://h:1/api/option-trades");
}

#[tokio::test]
async fn fetch_posts_the_query_and_decodes_rows() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let server = tokio::spawn(serve(
        listener,
        vec![(
            200,
            r#"{"code":200,"data":[{"Symbol":"SPY","CreationDate":"5"}]}"#.to_string(),
        )],
    ));

    let (tx, _rx) = mpsc::unbounded_channel();
    let conn = TradeFeedConnection::new(&base, Duration::from_secs(5), tx).unwrap();
    let records = conn.fetch(&request(1)).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].symbol, "SPY");
    assert_eq!(records[0].creation_timestamp, 5);

    let bodies = server.await.unwrap();
    let sent: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
    assert_eq!(sent["offset"], 0);
    assert_eq!(sent["limit"], 100);
    assert_eq!(sent["optionType"][0], "PUT");
}

#[tokio::test]
async fn worker_answers_in_order_and_tags_by_seq() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let server = tokio::spawn(serve(
        listener,
        vec![
            (200, r#"{"code":200,"data":[]}"#.to_string()),
            (200, r#"{"code":500,"message":"boom"}"#.to_string()),
            (502, "bad gateway".to_string()),
        ],
    ));

    let (tx_out, mut rx_out) = mpsc::unbounded_channel::<FetchResponse>();
    let (tx_in, rx_in) = mpsc::unbounded_channel();
    let conn = TradeFeedConnection::new(&base, Duration::from_secs(5), tx_out).unwrap();
    let worker = tokio::spawn(conn.run(rx_in));

    for seq in [7, 8, 9] {
        tx_in.send(request(seq)).unwrap();
    }

    let first = rx_out.recv().await.unwrap();
    assert_eq!(first, FetchResponse { seq: 7, outcome: Ok(vec![]) });

    let second = rx_out.recv().await.unwrap();
    assert_eq!(second.seq, 8);
    assert_eq!(
        second.outcome,
        Err(FetchError::Application {
            code: 500,
            message: "boom".into()
        })
    );

    let third = rx_out.recv().await.unwrap();
    assert_eq!(third.seq, 9);
    assert!(matches!(third.outcome, Err(FetchError::Transport(_))));

    drop(tx_in);
    worker.await.unwrap();
    server.await.unwrap();
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let (tx, _rx) = mpsc::unbounded_channel();
    let conn = TradeFeedConnection::new(&base, Duration::from_secs(2), tx).unwrap();
    let err = conn.fetch(&request(1)).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
