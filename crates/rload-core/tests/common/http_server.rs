//! Minimal HTTP/1.1 server for integration tests.
//!
//! Each connection gets one canned response. The request head the client sent
//! is captured so tests can assert on the wire format.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// What the server does after reading the request.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Write these bytes, then close the connection.
    Close(Vec<u8>),
    /// Write these bytes, then keep the connection open until the client closes it.
    Hold(Vec<u8>),
}

pub struct TestServer {
    pub addr: SocketAddr,
    requests: mpsc::Receiver<String>,
}

impl TestServer {
    /// Next request head received (blocks up to 5s).
    pub fn request(&self) -> String {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("no request received")
    }
}

/// Serve `reply` to every connection until the process exits.
pub fn start(reply: Reply) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let reply = reply.clone();
            let tx = tx.clone();
            thread::spawn(move || handle(stream, reply, tx));
        }
    });
    TestServer { addr, requests: rx }
}

fn handle(mut stream: TcpStream, reply: Reply, tx: mpsc::Sender<String>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let head = match read_request_head(&mut stream) {
        Some(h) => h,
        None => return,
    };
    let _ = tx.send(head);
    match reply {
        Reply::Close(bytes) => {
            let _ = stream.write_all(&bytes);
        }
        Reply::Hold(bytes) => {
            let _ = stream.write_all(&bytes);
            let _ = stream.flush();
            // Returns once the client closes (or the read timeout fires).
            let mut buf = [0u8; 64];
            while let Ok(n) = stream.read(&mut buf) {
                if n == 0 {
                    break;
                }
            }
        }
    }
}

/// Read until the blank line ending the request head.
fn read_request_head(stream: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    while !data.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        // Not HTTP (e.g. a TLS ClientHello): answer right away.
        if !data[0].is_ascii_alphabetic() {
            return Some(String::from_utf8_lossy(&data).into_owned());
        }
    }
    String::from_utf8(data).ok()
}
