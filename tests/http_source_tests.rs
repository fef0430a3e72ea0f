#![cfg(feature = "http-source")]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use chrono::{TimeZone, Utc};
use ohlcv_chart::ChartError;
use ohlcv_chart::data::{BarRequest, BarSource, HttpBarSource, HttpSourceConfig};

/// Serves one canned response and hands back the request line it saw.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("http://{}/api/bars", listener.local_addr().expect("addr"));
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut request_line = String::new();
        reader.read_line(&mut request_line).expect("request line");
        let mut header = String::new();
        while reader.read_line(&mut header).expect("header") > 2 {
            header.clear();
        }
        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .expect("write response");
        request_line
    });
    (url, handle)
}

fn request(url: &str) -> BarRequest {
    BarRequest::new(
        "demo",
        "EURUSD",
        "M1",
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
    )
    .with_endpoint_url(url)
}

#[test]
fn downloads_and_decodes_compact_payload() {
    let (url, server) = serve_once(
        "200 OK",
        r#"[{"chunkStart": 1000, "bars": [{"time": 5, "close": 1.5, "tickVolume": 3}]}]"#,
    );
    let source = HttpBarSource::new(HttpSourceConfig::default()).expect("client");

    let mut reported = Vec::new();
    let bars = source
        .fetch(&request(&url).with_compact_encoding(true), &mut |p| {
            reported.push(p.percent)
        })
        .expect("fetch");

    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].time, 1005);
    assert_eq!(reported.first(), Some(&0.0));
    assert_eq!(reported.last(), Some(&100.0));
    assert!(reported.windows(2).all(|w| w[0] <= w[1]));

    let request_line = server.join().expect("server thread");
    assert!(request_line.starts_with("GET /api/bars?"));
    assert!(request_line.contains("symbol=EURUSD"));
    assert!(request_line.contains("compact=1"));
}

#[test]
fn error_status_is_a_network_error() {
    let (url, server) = serve_once("503 Service Unavailable", "busy");
    let source = HttpBarSource::new(HttpSourceConfig::default()).expect("client");

    let err = source
        .fetch(&request(&url), &mut |_| {})
        .expect_err("503 must fail");
    assert!(matches!(err, ChartError::Network(_)));
    server.join().expect("server thread");
}
