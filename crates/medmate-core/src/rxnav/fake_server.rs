//! Local HTTP server standing in for RxNav in tests.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use crate::config::ClientConfig;

/// Answers requests one at a time with `(status, body)` from a handler.
///
/// The handler gets the zero-based request number and the request target
/// (`/rxcui.json?name=...`). Every response closes its connection.
pub(crate) struct FakeRxNav {
    base_url: String,
    hits: Arc<AtomicUsize>,
    arrivals: Receiver<String>,
}

impl FakeRxNav {
    pub(crate) fn serve<F>(handler: F) -> Self
    where
        F: Fn(usize, &str) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let (tx, arrivals) = mpsc::channel();

        let counter = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let n = counter.fetch_add(1, Ordering::SeqCst);
                answer(stream, n, &handler, &tx);
            }
        });

        Self {
            base_url,
            hits,
            arrivals,
        }
    }

    /// Client config pointed at this server with a 1 ms backoff.
    pub(crate) fn config(&self, max_retries: u32) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
            max_retries,
            retry_backoff_ms: 1,
        }
    }

    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Block until the next request reaches the server.
    pub(crate) fn wait_for_request(&self) -> String {
        self.arrivals.recv().unwrap()
    }
}

fn answer<F>(stream: TcpStream, n: usize, handler: &F, arrivals: &Sender<String>)
where
    F: Fn(usize, &str) -> (u16, String),
{
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    // Drain headers; requests are bodiless GETs
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) if line == "\r\n" => break,
            Ok(_) => {}
        }
    }

    let target = request_line
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_string();
    let _ = arrivals.send(target.clone());

    let (status, body) = handler(n, &target);
    let response = format!(
        "HTTP/1.1 {} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let mut stream = reader.into_inner();
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
