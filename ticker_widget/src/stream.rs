//! Auto-reconnecting subscription to the push-ticker stream.
//!
//! `StreamingQuoteClient` owns one worker thread that connects, reads text frames,
//! decodes them into `Quote`s, and hands each one to the `on_update` callback. The
//! callback runs on the worker thread, so it must not touch UI state; the widget only
//! publishes into the `QuoteBridge` from it.
//!
//! Connection lifecycle:
//!
//! - `Disconnected` → `Connecting` when the worker starts an attempt.
//! - `Connecting` → `Connected` once the handshake succeeds.
//! - Any close or transport error → `Disconnected`. While the client is running the
//!   worker then waits a fixed delay and tries again, forever. There is no backoff and
//!   no attempt cap.
//! - Malformed frames are dropped with a `debug` log; the next tick corrects the display.
//!
//! `stop()` clears the running flag, shuts down the socket (which unblocks a pending
//! handshake or receive), wakes a pending reconnect wait, and joins the worker. After
//! it returns no further `on_update` call can happen. Connectors hand over the socket's
//! interrupter as soon as the TCP connection exists, so a server that accepts but
//! never answers the upgrade cannot wedge `stop()`.
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use log::{debug, error, info, warn};
use ticker_common::{FeedError, Quote, Result};
use ticker_common::net::HANDSHAKE_TIMEOUT;
use tungstenite::client::IntoClientRequest;
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

/// Closure that forcibly closes a live connection from another thread.
pub type Interrupter = Box<dyn FnOnce() + Send>;

/// Opens connections to the ticker stream.
pub trait TickerConnector: Send + Sync + 'static {
    /// Connection type produced by this connector.
    type Connection: TickerConnection;

    /// Perform the handshake with `url`.
    ///
    /// Before any blocking handshake step the connector passes an interrupter for the
    /// underlying transport to `register`; it stays valid for the whole connection. If
    /// `register` returns `false` the client is stopping and the attempt is abandoned.
    fn connect(&self, url: &str, register: &dyn Fn(Interrupter) -> bool)
        -> Result<Self::Connection>;
}

/// A live ticker stream connection.
pub trait TickerConnection: Send {
    /// Block until the next text frame. `Ok(None)` means the peer closed the stream.
    fn next_frame(&mut self) -> Result<Option<String>>;
}

/// Observable connection state of the streaming client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Disconnected,
    Connecting,
    Connected,
}

/// State shared between the client handle and its worker thread.
struct Shared {
    running: AtomicBool,
    state: Mutex<StreamState>,
    interrupter: Mutex<Option<Interrupter>>,
}

impl Shared {
    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn set_state(&self, state: StreamState) {
        *lock(&self.state) = state;
    }

    /// Store the transport's interrupter unless the client was stopped meanwhile.
    fn register(&self, interrupter: Interrupter) -> bool {
        let mut slot = lock(&self.interrupter);
        if !self.is_running() {
            return false;
        }
        *slot = Some(interrupter);
        true
    }

    fn unregister(&self) {
        lock(&self.interrupter).take();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Client for a push-ticker stream with fixed-delay reconnects.
pub struct StreamingQuoteClient<C: TickerConnector = TungsteniteConnector> {
    connector: Arc<C>,
    url: String,
    reconnect_delay: Duration,
    shared: Arc<Shared>,
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl<C: TickerConnector> StreamingQuoteClient<C> {
    /// Create a stopped client for `url`.
    pub fn new(connector: C, url: &str, reconnect_delay: Duration) -> Self {
        StreamingQuoteClient {
            connector: Arc::new(connector),
            url: url.to_string(),
            reconnect_delay,
            shared: Arc::new(Shared {
                running: AtomicBool::new(false),
                state: Mutex::new(StreamState::Disconnected),
                interrupter: Mutex::new(None),
            }),
            stop_tx: None,
            worker: None,
        }
    }

    /// Current connection state.
    pub fn state(&self) -> StreamState {
        *lock(&self.shared.state)
    }

    /// Spawn the worker thread. Does nothing if the client is already running.
    pub fn start<F>(&mut self, on_update: F) -> Result<()>
    where
        F: Fn(Quote) + Send + 'static,
    {
        if self.worker.is_some() {
            warn!("Stream client for {} is already running", self.url);
            return Ok(());
        }

        let (stop_tx, stop_rx) = bounded::<()>(1);
        self.shared.running.store(true, Ordering::SeqCst);

        let worker = Worker {
            connector: Arc::clone(&self.connector),
            url: self.url.clone(),
            reconnect_delay: self.reconnect_delay,
            shared: Arc::clone(&self.shared),
            stop_rx,
        };
        let spawned = thread::Builder::new()
            .name("ticker-stream".to_string())
            .spawn(move || worker.run(on_update));

        match spawned {
            Ok(handle) => {
                self.stop_tx = Some(stop_tx);
                self.worker = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.shared.running.store(false, Ordering::SeqCst);
                Err(FeedError::Io(e))
            }
        }
    }

    /// Stop the worker and wait for it to exit. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.shared.running.store(false, Ordering::SeqCst);
        // dropping the sender wakes a pending reconnect wait
        self.stop_tx.take();
        let interrupter = lock(&self.shared.interrupter).take();
        if let Some(interrupt) = interrupter {
            interrupt();
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Stream worker panicked");
            }
            info!("Stream client stopped");
        }
    }
}

impl<C: TickerConnector> Drop for StreamingQuoteClient<C> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Everything the worker thread owns.
struct Worker<C: TickerConnector> {
    connector: Arc<C>,
    url: String,
    reconnect_delay: Duration,
    shared: Arc<Shared>,
    stop_rx: Receiver<()>,
}

impl<C: TickerConnector> Worker<C> {
    fn run<F: Fn(Quote)>(self, on_update: F) {
        while self.shared.is_running() {
            self.shared.set_state(StreamState::Connecting);
            info!("Connecting to {}", self.url);

            let register = |interrupter: Interrupter| self.shared.register(interrupter);
            match self.connector.connect(&self.url, &register) {
                Ok(mut connection) => {
                    if self.shared.is_running() {
                        self.shared.set_state(StreamState::Connected);
                        info!("Stream connected: {}", self.url);
                        self.pump(&mut connection, &on_update);
                    }
                }
                Err(e) => {
                    if self.shared.is_running() {
                        warn!("Stream connect failed: {}", e);
                    }
                }
            }
            self.shared.unregister();
            self.shared.set_state(StreamState::Disconnected);

            if !self.shared.is_running() {
                break;
            }
            warn!("Stream disconnected, reconnecting in {:?}", self.reconnect_delay);
            match self.stop_rx.recv_timeout(self.reconnect_delay) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        debug!("Stream worker exiting");
    }

    fn pump<F: Fn(Quote)>(&self, connection: &mut C::Connection, on_update: &F) {
        loop {
            match connection.next_frame() {
                Ok(Some(frame)) => {
                    if !self.shared.is_running() {
                        return;
                    }
                    match Quote::from_stream_json(&frame) {
                        Ok(quote) => on_update(quote),
                        Err(e) => debug!("Dropping malformed ticker frame: {}", e),
                    }
                }
                Ok(None) => {
                    info!("Stream closed by peer");
                    return;
                }
                Err(e) => {
                    if self.shared.is_running() {
                        warn!("Stream receive failed: {}", e);
                    }
                    return;
                }
            }
        }
    }
}

/// Production connector: blocking `tungstenite` client, TLS via native-tls.
///
/// The TCP connect and the TLS/upgrade handshake are each bounded by `timeout`; the
/// socket timeouts are cleared once the stream is established.
#[derive(Debug, Clone, Copy)]
pub struct TungsteniteConnector {
    timeout: Duration,
}

impl TungsteniteConnector {
    pub fn new(timeout: Duration) -> Self {
        TungsteniteConnector { timeout }
    }
}

impl Default for TungsteniteConnector {
    fn default() -> Self {
        Self::new(HANDSHAKE_TIMEOUT)
    }
}

impl TickerConnector for TungsteniteConnector {
    type Connection = TungsteniteConnection;

    fn connect(
        &self,
        url: &str,
        register: &dyn Fn(Interrupter) -> bool,
    ) -> Result<Self::Connection> {
        let request = url.into_client_request().map_err(ws_error)?;
        let uri = request.uri();
        let host = uri
            .host()
            .ok_or_else(|| FeedError::WebSocket(format!("no host in {}", url)))?;
        let port = uri
            .port_u16()
            .unwrap_or(if uri.scheme_str() == Some("wss") { 443 } else { 80 });
        let host = host.trim_start_matches('[').trim_end_matches(']');
        let tcp = connect_tcp(host, port, self.timeout)?;

        let raw = tcp.try_clone()?;
        let interrupter: Interrupter = Box::new(move || {
            if let Err(e) = raw.shutdown(Shutdown::Both) {
                debug!("Socket shutdown failed: {}", e);
            }
        });
        if !register(interrupter) {
            return Err(FeedError::WebSocket("stopped before handshake".to_string()));
        }

        tcp.set_read_timeout(Some(self.timeout))?;
        tcp.set_write_timeout(Some(self.timeout))?;
        let (socket, response) = tungstenite::client_tls_with_config(request, tcp, None, None)
            .map_err(ws_error)?;
        debug!("Handshake response status: {}", response.status());

        if let Some(tcp) = tcp_of(socket.get_ref()) {
            tcp.set_read_timeout(None)?;
            tcp.set_write_timeout(None)?;
        }
        Ok(TungsteniteConnection { socket })
    }
}

fn ws_error(e: impl std::fmt::Display) -> FeedError {
    FeedError::WebSocket(e.to_string())
}

/// Connect to the first reachable address of `host:port`, each try bounded by `timeout`.
fn connect_tcp(host: &str, port: u16, timeout: Duration) -> Result<TcpStream> {
    let mut last_error = None;
    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_error = Some(e),
        }
    }
    Err(match last_error {
        Some(e) => FeedError::Io(e),
        None => FeedError::WebSocket(format!("{}:{} did not resolve", host, port)),
    })
}

fn tcp_of(stream: &MaybeTlsStream<TcpStream>) -> Option<&TcpStream> {
    match stream {
        MaybeTlsStream::Plain(stream) => Some(stream),
        MaybeTlsStream::NativeTls(stream) => Some(stream.get_ref()),
        _ => None,
    }
}

/// Live `tungstenite` connection.
pub struct TungsteniteConnection {
    socket: WebSocket<MaybeTlsStream<TcpStream>>,
}

impl TickerConnection for TungsteniteConnection {
    fn next_frame(&mut self) -> Result<Option<String>> {
        loop {
            match self.socket.read() {
                Ok(Message::Text(text)) => return Ok(Some(text)),
                Ok(Message::Close(frame)) => {
                    debug!("Close frame received: {:?}", frame);
                    return Ok(None);
                }
                // ping replies are queued by tungstenite itself
                Ok(_) => continue,
                Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                    return Ok(None);
                }
                Err(e) => return Err(FeedError::WebSocket(e.to_string())),
            }
        }
    }
}
