//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed responses by request path and counts how often each path was hit.
//! Every response closes the connection, so bodies sent without a
//! `Content-Length` header end at EOF.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
    /// If false, the body is sent without `Content-Length`.
    pub send_content_length: bool,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            content_type: None,
            send_content_length: true,
        }
    }

    pub fn html(body: impl Into<Vec<u8>>, content_type: &str) -> Self {
        Self {
            content_type: Some(content_type.to_string()),
            ..Self::ok(body)
        }
    }

    pub fn without_content_length(self) -> Self {
        Self {
            send_content_length: false,
            ..self
        }
    }
}

pub struct TestServer {
    base_url: String,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl TestServer {
    /// Starts a server in a background thread. Unknown paths get a 404.
    /// The server runs until the process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, route)| (path.to_string(), route))
                .collect(),
        );
        let hits = Arc::new(Mutex::new(HashMap::new()));

        let server_hits = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let hits = Arc::clone(&server_hits);
                thread::spawn(move || handle(stream, &routes, &hits));
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            hits,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn hits(&self, path: &str) -> usize {
        self.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    hits: &Mutex<HashMap<String, usize>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(5)));

    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&request);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    *hits.lock().unwrap().entry(path.clone()).or_default() += 1;

    let not_found = Route {
        status: 404,
        body: b"not found".to_vec(),
        content_type: None,
        send_content_length: true,
    };
    let route = routes.get(&path).unwrap_or(&not_found);

    let reason = if route.status == 200 { "OK" } else { "Not Found" };
    let mut head = format!("HTTP/1.1 {} {}\r\nConnection: close\r\n", route.status, reason);
    if let Some(content_type) = &route.content_type {
        head.push_str(&format!("Content-Type: {content_type}\r\n"));
    }
    if route.send_content_length {
        head.push_str(&format!("Content-Length: {}\r\n", route.body.len()));
    }
    head.push_str("\r\n");

    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();
}
