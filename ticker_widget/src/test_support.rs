//! Local socket fixtures shared by the widget's tests.
use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use ticker_common::{Quote, RenderedQuote};
use tungstenite::Message;

use crate::display::Display;

/// Serve exactly one HTTP response on a fresh local port.
///
/// Returns the base ticker URL and a handle yielding the request line the server saw.
pub fn serve_http_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind http fixture");
    let addr = listener.local_addr().expect("http fixture address");
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept http client");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(size) => request.extend_from_slice(&buf[..size]),
            }
        }
        let _ = stream.write_all(response.as_bytes());
        let text = String::from_utf8_lossy(&request).into_owned();
        text.lines().next().unwrap_or_default().to_string()
    });

    (format!("http://{}/api/v3/ticker/24hr", addr), handle)
}

/// Accept one WebSocket client, send `frames`, then hold the connection until the
/// client goes away.
pub fn serve_ws_frames(frames: Vec<String>) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ws fixture");
    let addr = listener.local_addr().expect("ws fixture address");

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept ws client");
        let mut socket = tungstenite::accept(stream).expect("ws handshake");
        for frame in frames {
            socket.send(Message::text(frame)).expect("send ws frame");
        }
        while socket.read().is_ok() {}
    });

    (format!("ws://{}/ws/btcusdt@ticker", addr), handle)
}

/// Accept one TCP client and never answer it; the handle finishes once the client
/// closes or shuts down its side.
pub fn serve_silently() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind silent fixture");
    let addr = listener.local_addr().expect("silent fixture address");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept silent client");
        let mut buf = [0u8; 1024];
        while let Ok(size) = stream.read(&mut buf) {
            if size == 0 {
                break;
            }
        }
        let _ = stream.shutdown(Shutdown::Both);
    });

    (format!("ws://{}/ws/btcusdt@ticker", addr), handle)
}

/// A local address nothing is listening on.
pub fn unused_local_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind unused port");
    listener.local_addr().expect("unused port address")
}

/// Poll `condition` every 10 ms until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    condition()
}

/// Display that records what it was asked to paint.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub rendered: Vec<RenderedQuote>,
    pub exited: bool,
}

impl Display for RecordingDisplay {
    fn render(&mut self, quote: &Quote) {
        self.rendered.push(RenderedQuote::from(quote));
    }

    fn exit(&mut self) {
        self.exited = true;
    }
}
