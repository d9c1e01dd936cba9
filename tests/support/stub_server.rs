use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// Canned reply for one endpoint.
#[derive(Clone, Debug)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// What the stub backend remembers between requests.
#[derive(Debug, Default)]
pub struct StubState {
    /// Stored configuration JSON served by `GET /train/config`.
    pub config: Option<String>,
    /// Replies for `POST /train/config`, used before storing; empty means accept.
    pub save_replies: Vec<Reply>,
    /// Replies for `POST /train/start`; empty means a bare 200.
    pub start_replies: Vec<Reply>,
    /// `METHOD path` of every request received, in order.
    pub requests: Vec<String>,
}

/// In-process HTTP server imitating the training backend.
pub struct StubTrainingServer {
    pub base_url: String,
    pub state: Arc<Mutex<StubState>>,
}

impl StubTrainingServer {
    pub fn start(config: Option<&str>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let state = Arc::new(Mutex::new(StubState {
            config: config.map(str::to_string),
            ..StubState::default()
        }));
        let shared = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                handle(stream, &shared);
            }
        });
        Self {
            base_url: format!("http://{addr}/"),
            state,
        }
    }

    pub fn stored_config(&self) -> Option<serde_json::Value> {
        let state = self.state.lock().unwrap();
        state
            .config
            .as_deref()
            .map(|body| serde_json::from_str(body).expect("stored config is JSON"))
    }

    pub fn push_save_reply(&self, reply: Reply) {
        self.state.lock().unwrap().save_replies.push(reply);
    }

    pub fn push_start_reply(&self, reply: Reply) {
        self.state.lock().unwrap().start_replies.push(reply);
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

fn handle(mut stream: TcpStream, state: &Arc<Mutex<StubState>>) {
    let Some((request_line, body)) = read_request(&stream) else {
        return;
    };
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();
    let reply = {
        let mut state = state.lock().unwrap();
        state.requests.push(format!("{method} {path}"));
        route(&mut state, &method, &path, body)
    };
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reply.body.len(),
        reply.body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn route(state: &mut StubState, method: &str, path: &str, body: String) -> Reply {
    match (method, path) {
        ("GET", "/train/config") => match &state.config {
            Some(config) => Reply::json(200, config),
            None => Reply::json(404, r#"{"detail":"No configuration stored"}"#),
        },
        ("POST", "/train/config") => {
            if state.save_replies.is_empty() {
                state.config = Some(body);
                Reply::json(200, r#"{"status":"ok"}"#)
            } else {
                state.save_replies.remove(0)
            }
        }
        ("POST", "/train/start") => {
            if state.start_replies.is_empty() {
                Reply::json(200, "")
            } else {
                state.start_replies.remove(0)
            }
        }
        _ => Reply::json(404, r#"{"detail":"Not Found"}"#),
    }
}

fn read_request(stream: &TcpStream) -> Option<(String, String)> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;
    Some((
        request_line.trim_end().to_string(),
        String::from_utf8_lossy(&body).into_owned(),
    ))
}
