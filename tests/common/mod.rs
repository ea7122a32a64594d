// tests/common/mod.rs
//
// Shared fixtures: a sample payload and a one-shot local HTTP server that
// replays canned responses, one per connection, in order.
#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use fest_results::core::{HttpClient, HttpSettings};
use fest_results::model::ResultEntry;

pub const SAMPLE_CSV: &str = "Position,Chest No,Candidate Name,Team Code,Grade,Program Code,Program Name,Program Section\r\n\
1,101,Alice,A,A,P1,Quiz,Senior\r\n\
2,102,Bob,A,B,P1,Quiz,Senior\r\n\
1,201,Carol,B,A,P2,Dance,Junior\r\n";

pub struct Canned {
    pub status: u16,
    pub content_type: &'static str,
    pub location: Option<&'static str>,
    pub body: String,
}

impl Canned {
    pub fn ok(body: &str) -> Self {
        Self { status: 200, content_type: "text/csv; charset=utf-8", location: None, body: body.to_string() }
    }
    pub fn html(body: &str) -> Self {
        Self { status: 200, content_type: "text/html; charset=utf-8", location: None, body: body.to_string() }
    }
    pub fn status(status: u16) -> Self {
        Self { status, content_type: "text/plain", location: None, body: String::from("nope") }
    }
    pub fn redirect(to: &'static str) -> Self {
        Self { status: 302, content_type: "text/plain", location: Some(to), body: String::new() }
    }
}

/// Serve `responses` on 127.0.0.1, one connection each; returns the URL.
pub fn serve(responses: Vec<Canned>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");

    thread::spawn(move || {
        for canned in responses {
            let Ok((mut stream, _)) = listener.accept() else { return };
            read_request(&mut stream);
            let mut head = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n",
                canned.status,
                reason(canned.status),
                canned.content_type,
                canned.body.len()
            );
            if let Some(to) = canned.location {
                head.push_str(&format!("Location: {to}\r\n"));
            }
            head.push_str("\r\n");
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(canned.body.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{addr}/exec")
}

/// A URL nothing listens on.
pub fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/exec")
}

/// Proxy-free client with a short timeout.
pub fn client() -> HttpClient {
    HttpClient::new(&HttpSettings {
        timeout: Duration::from_secs(5),
        use_system_proxy: false,
        ..Default::default()
    })
}

pub fn entry(name: &str, team: &str, code: &str, program: &str, section: &str) -> ResultEntry {
    ResultEntry {
        candidate_name: name.into(),
        team_code: team.into(),
        program_code: code.into(),
        program_name: program.into(),
        program_section: section.into(),
        ..Default::default()
    }
}

/// Alice and Bob in P1 (team A), Carol in P2 (team B).
pub fn sample_records() -> Vec<ResultEntry> {
    vec![
        entry("Alice", "A", "P1", "Quiz", "Senior"),
        entry("Bob", "A", "P1", "Quiz", "Senior"),
        entry("Carol", "B", "P2", "Dance", "Junior"),
    ]
}

fn read_request(stream: &mut TcpStream) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 2048];
    let mut seen = Vec::new();
    loop {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                seen.extend_from_slice(&buf[..n]);
                if seen.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
