//! Doubles shared by the unit tests.

use crate::challenge_store::MemoryChallengeStore;
use crate::enums::{FailurePolicy, PersonaState};
use crate::error::ConnectionError;
use crate::session::{
    event_channel,
    ConnectionEvent,
    ConnectionEventSender,
    Credentials,
    LogOnDetails,
    SessionManager,
    SessionOptions,
    SteamConnection,
};
use std::sync::Arc;
use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// A call made on a [`MockConnection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionCall {
    LogOn(LogOnDetails),
    SteamGuardCode(String),
    SetPersona(PersonaState),
}

/// Records every call it receives and optionally rejects logging on.
pub struct MockConnection {
    calls: mpsc::UnboundedSender<ConnectionCall>,
    log_on_error: Option<String>,
}

#[async_trait]
impl SteamConnection for MockConnection {
    async fn log_on(&self, details: LogOnDetails) -> Result<(), ConnectionError> {
        let _ = self.calls.send(ConnectionCall::LogOn(details));
        
        match &self.log_on_error {
            Some(message) => Err(ConnectionError(message.clone())),
            None => Ok(()),
        }
    }
    
    async fn submit_steam_guard_code(&self, code: String) -> Result<(), ConnectionError> {
        let _ = self.calls.send(ConnectionCall::SteamGuardCode(code));
        Ok(())
    }
    
    async fn set_persona(&self, state: PersonaState) -> Result<(), ConnectionError> {
        let _ = self.calls.send(ConnectionCall::SetPersona(state));
        Ok(())
    }
}

pub fn mock_connection() -> (Arc<MockConnection>, mpsc::UnboundedReceiver<ConnectionCall>) {
    let (calls, receiver) = mpsc::unbounded_channel();
    
    (Arc::new(MockConnection { calls, log_on_error: None }), receiver)
}

pub fn failing_connection(message: &str) -> (Arc<MockConnection>, mpsc::UnboundedReceiver<ConnectionCall>) {
    let (calls, receiver) = mpsc::unbounded_channel();
    let connection = MockConnection {
        calls,
        log_on_error: Some(message.to_string()),
    };
    
    (Arc::new(connection), receiver)
}

/// A request received by a [`MockServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
    
    /// Decodes an `application/x-www-form-urlencoded` body.
    pub fn form(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.body.as_bytes())
            .into_owned()
            .collect()
    }
    
    pub fn form_value(&self, key: &str) -> Option<String> {
        self.form()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }
}

/// An HTTP server answering every request with the same response.
pub struct MockServer {
    pub url: String,
    requests: mpsc::UnboundedReceiver<RecordedRequest>,
}

impl MockServer {
    pub async fn start(status: u16, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let (requests_tx, requests) = mpsc::unbounded_channel();
        
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let requests_tx = requests_tx.clone();
                
                tokio::spawn(respond(stream, requests_tx, status, body));
            }
        });
        
        Self { url, requests }
    }
    
    pub async fn next_request(&mut self) -> RecordedRequest {
        self.requests.recv().await.unwrap()
    }
    
    /// The requests received so far.
    pub fn received(&mut self) -> Vec<RecordedRequest> {
        let mut requests = Vec::new();
        
        while let Ok(request) = self.requests.try_recv() {
            requests.push(request);
        }
        
        requests
    }
}

async fn respond(
    mut stream: TcpStream,
    requests_tx: mpsc::UnboundedSender<RecordedRequest>,
    status: u16,
    body: &'static str,
) -> Option<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let read = stream.read(&mut chunk).await.ok()?;
        
        if read == 0 {
            return None;
        }
        
        buffer.extend_from_slice(&chunk[..read]);
        
        if let Some(position) = buffer.windows(4).position(|window| window == b"\r\n\r\n") {
            break position + 4;
        }
    };
    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();
    let headers = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect::<Vec<_>>();
    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    
    while buffer.len() < header_end + content_length {
        let read = stream.read(&mut chunk).await.ok()?;
        
        if read == 0 {
            break;
        }
        
        buffer.extend_from_slice(&chunk[..read]);
    }
    
    let body_end = buffer.len().min(header_end + content_length);
    let request_body = String::from_utf8_lossy(&buffer[header_end..body_end]).to_string();
    
    // Recorded before responding so the request is visible once the client has its response.
    let _ = requests_tx.send(RecordedRequest {
        method,
        path,
        headers,
        body: request_body,
    });
    
    let response = format!(
        "HTTP/1.1 {status} Mock\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );
    
    stream.write_all(response.as_bytes()).await.ok()?;
    stream.shutdown().await.ok()
}

/// Session options which report a rejected code instead of exiting.
pub fn surface_options() -> SessionOptions {
    SessionOptions {
        failure_policy: FailurePolicy::Surface,
        ..SessionOptions::default()
    }
}

/// The session a mock connection hands out.
pub fn web_session_event() -> ConnectionEvent {
    ConnectionEvent::WebSession {
        sessionid: "37bf523a24034ec06c60ec61".into(),
        cookies: vec![
            "sessionid=37bf523a24034ec06c60ec61".into(),
            "steamLoginSecure=76561198000000000%7C%7Ctoken".into(),
        ],
    }
}

/// Starts a session and completes the login. The event sender is returned so the session stays
/// open for the duration of the test.
pub async fn authenticated_session() -> (SessionManager, ConnectionEventSender) {
    let (connection, _calls) = mock_connection();
    let (events_tx, events) = event_channel();
    let session = SessionManager::start(
        Credentials::new("user", "hunter2").unwrap(),
        connection,
        events,
        Arc::new(MemoryChallengeStore::default()),
        surface_options(),
    ).await.unwrap();
    
    events_tx.send(web_session_event()).unwrap();
    session.ensure_ready().await.unwrap();
    
    (session, events_tx)
}

/// Starts a session that never finishes logging in.
pub async fn pending_session() -> (SessionManager, ConnectionEventSender) {
    let (connection, _calls) = mock_connection();
    let (events_tx, events) = event_channel();
    let session = SessionManager::start(
        Credentials::new("user", "hunter2").unwrap(),
        connection,
        events,
        Arc::new(MemoryChallengeStore::default()),
        surface_options(),
    ).await.unwrap();
    
    (session, events_tx)
}
