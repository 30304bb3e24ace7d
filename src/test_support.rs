//! Fixtures shared by unit tests: scratch directories and a one-shot
//! loopback HTTP server standing in for the classification service.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::Duration;

pub(crate) fn fixture_root(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    let pid = std::process::id();
    path.push(format!("palm-classifier-{label}-{pid}-{nanos}"));
    path
}

pub(crate) fn with_temp_root<F: FnOnce(&Path)>(label: &str, f: F) {
    let root = fixture_root(label);
    std::fs::create_dir_all(&root).unwrap();
    f(&root);
    let _ = std::fs::remove_dir_all(&root);
}

/// Write a small JPEG-looking file. The classifier never decodes it.
pub(crate) fn write_fixture_image(root: &Path, name: &str) -> PathBuf {
    let path = root.join(name);
    std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F']).unwrap();
    path
}

#[derive(Debug, Clone)]
pub(crate) enum CannedResponse {
    Reply {
        status: u16,
        content_type: &'static str,
        body: String,
    },
    /// Read the request, then stay silent for the given time before closing.
    Silent(Duration),
}

impl CannedResponse {
    pub(crate) fn json(body: &str) -> Self {
        Self::Reply {
            status: 200,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub(crate) fn status(status: u16, body: &str) -> Self {
        Self::Reply {
            status,
            content_type: "text/plain",
            body: body.to_string(),
        }
    }
}

pub(crate) struct LoopbackServer {
    pub(crate) url: String,
    handle: JoinHandle<Vec<u8>>,
}

impl LoopbackServer {
    /// Serve exactly one connection with `response`.
    pub(crate) fn serve_once(response: CannedResponse) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let addr = listener.local_addr().expect("listener address");
        let handle = std::thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return Vec::new();
            };
            let request = read_request(&mut stream).unwrap_or_default();
            match response {
                CannedResponse::Reply {
                    status,
                    content_type,
                    body,
                } => {
                    let head = format!(
                        "HTTP/1.1 {status} {}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        reason_phrase(status),
                        body.len()
                    );
                    let _ = stream.write_all(head.as_bytes());
                    let _ = stream.write_all(body.as_bytes());
                    let _ = stream.flush();
                }
                CannedResponse::Silent(hold) => std::thread::sleep(hold),
            }
            request
        });

        Self {
            url: format!("http://{addr}"),
            handle,
        }
    }

    /// Raw bytes of the request the server received.
    pub(crate) fn received_request(self) -> Vec<u8> {
        self.handle.join().unwrap_or_default()
    }
}

/// An address nothing listens on.
pub(crate) fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{addr}")
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

fn read_request(stream: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    let mut data = Vec::new();
    let mut buf = [0_u8; 4096];
    loop {
        let read = stream.read(&mut buf)?;
        if read == 0 {
            break;
        }
        data.extend_from_slice(&buf[..read]);
        if request_complete(&data) {
            break;
        }
    }
    Ok(data)
}

fn request_complete(data: &[u8]) -> bool {
    let Some(header_end) = data.windows(4).position(|window| window == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&data[..header_end]).to_ascii_lowercase();
    let content_length = headers.lines().find_map(|line| {
        line.strip_prefix("content-length:")
            .and_then(|value| value.trim().parse::<usize>().ok())
    });

    match content_length {
        Some(length) => data.len() >= header_end + 4 + length,
        None if headers.contains("transfer-encoding: chunked") => data.ends_with(b"0\r\n\r\n"),
        None => true,
    }
}
