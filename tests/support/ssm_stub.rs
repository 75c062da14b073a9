//! Local stand-in for the SSM `GetParameters` endpoint.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Answers every request with the same `GetParameters` response.
///
/// The listener thread runs until the test process exits.
pub struct SsmStub {
    port: u16,
}

impl SsmStub {
    /// Serve `parameters` as found values and `invalid` as unresolved names.
    pub fn start(parameters: &[(&str, &str)], invalid: &[&str]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind stub listener");
        let port = listener.local_addr().expect("stub has no address").port();
        let body = response_body(parameters, invalid);

        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let body = body.clone();
                thread::spawn(move || serve(stream, &body));
            }
        });
        Self { port }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }
}

fn response_body(parameters: &[(&str, &str)], invalid: &[&str]) -> String {
    let found: Vec<String> = parameters
        .iter()
        .map(|(name, value)| {
            format!(
                r#"{{"Name":"{}","Type":"String","Value":"{}","Version":1}}"#,
                name, value
            )
        })
        .collect();
    let invalid: Vec<String> = invalid.iter().map(|name| format!(r#""{}""#, name)).collect();
    format!(
        r#"{{"Parameters":[{}],"InvalidParameters":[{}]}}"#,
        found.join(","),
        invalid.join(",")
    )
}

/// Handle requests on one connection until the client closes it.
fn serve(stream: TcpStream, body: &str) {
    let mut reader = BufReader::new(stream);
    loop {
        let mut content_length = 0usize;
        let mut saw_request = false;
        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) | Err(_) => return,
                Ok(_) => {}
            }
            let line = line.trim_end();
            if line.is_empty() {
                if saw_request {
                    break;
                }
                continue;
            }
            saw_request = true;
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }
        }

        let mut request_body = vec![0u8; content_length];
        if reader.read_exact(&mut request_body).is_err() {
            return;
        }

        let response = format!(
            "HTTP/1.1 200 OK\r\n\
             Content-Type: application/x-amz-json-1.1\r\n\
             x-amzn-RequestId: 00000000-0000-0000-0000-000000000000\r\n\
             Content-Length: {}\r\n\
             \r\n\
             {}",
            body.len(),
            body
        );
        if reader.get_mut().write_all(response.as_bytes()).is_err() {
            return;
        }
    }
}
