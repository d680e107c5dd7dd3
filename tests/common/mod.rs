//! A tiny HTTP/1.1 server answering canned responses, standing in for the
//! GitHub REST API.
#![allow(dead_code)]

use std::{
  collections::HashMap,
  io::{BufRead, BufReader, Write},
  net::{TcpListener, TcpStream},
  sync::{Arc, Mutex},
  thread,
  time::Duration,
};

#[derive(Debug, Clone)]
pub struct Request {
  pub target: String,
  pub authorization: Option<String>,
}

pub struct StubServer {
  pub url: String,
  requests: Arc<Mutex<Vec<Request>>>,
}

type Routes = HashMap<String, (u16, String)>;

impl StubServer {
  /// `routes` maps a request target (path plus query) to a status and JSON
  /// body. Anything else gets a 404.
  pub fn start(routes: Routes) -> Self {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let routes = Arc::new(routes);
    let requests = Arc::new(Mutex::new(Vec::new()));

    let thread_requests = requests.clone();
    thread::spawn(move || {
      for stream in listener.incoming() {
        let stream = match stream {
          Ok(stream) => stream,
          Err(_) => continue,
        };
        let routes = routes.clone();
        let requests = thread_requests.clone();
        thread::spawn(move || respond(stream, &routes, &requests));
      }
    });

    Self { url, requests }
  }

  pub fn requests(&self) -> Vec<Request> {
    self.requests.lock().unwrap().clone()
  }

  pub fn targets(&self) -> Vec<String> {
    let mut targets: Vec<_> =
      self.requests().into_iter().map(|r| r.target).collect();
    targets.sort();
    targets
  }
}

fn respond(
  mut stream: TcpStream,
  routes: &Routes,
  requests: &Mutex<Vec<Request>>,
) {
  let mut reader = BufReader::new(stream.try_clone().unwrap());

  let mut request_line = String::new();
  if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
    return;
  }
  let target = request_line
    .split_whitespace()
    .nth(1)
    .unwrap_or("/")
    .to_owned();

  let mut authorization = None;
  loop {
    let mut line = String::new();
    if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
      break;
    }
    let mut parts = line.splitn(2, ':');
    let name = parts.next().unwrap_or("").trim().to_ascii_lowercase();
    if name == "authorization" {
      authorization = parts.next().map(|v| v.trim().to_owned());
    }
  }

  requests.lock().unwrap().push(Request {
    target: target.clone(),
    authorization,
  });

  let (status, body) = routes
    .get(&target)
    .cloned()
    .unwrap_or_else(|| (404, r#"{"message":"Not Found"}"#.to_owned()));

  let _ = write!(
    stream,
    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\n\
     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
    status,
    body.len(),
    body
  );
  let _ = stream.flush();
}

pub fn contents_body(text: &str) -> String {
  serde_json::json!({
    "name": "pubspec.yaml",
    "path": "pubspec.yaml",
    "encoding": "base64",
    "content": base64::encode(text),
  })
  .to_string()
}

pub fn contents_route(repo: &str, text: &str) -> (String, (u16, String)) {
  (
    format!("/repos/{}/contents/pubspec.yaml", repo),
    (200, contents_body(text)),
  )
}

/// Keeps requests to the stub off any proxy configured in the environment.
pub fn bypass_proxy() {
  std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
  std::env::set_var("no_proxy", "127.0.0.1,localhost");
}

/// Accepts connections but never answers, holding each one open for `hold`.
pub fn silent_server(hold: Duration) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").unwrap();
  let url = format!("http://{}", listener.local_addr().unwrap());
  thread::spawn(move || {
    for stream in listener.incoming().flatten() {
      thread::spawn(move || {
        thread::sleep(hold);
        drop(stream);
      });
    }
  });
  url
}
