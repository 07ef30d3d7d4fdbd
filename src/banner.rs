//! Service banner grabbing for HTTP and SMTP.
//!
//! HTTP banners come from the `Server:` header of a `HEAD` response; SMTP
//! banners are whatever the server sends right after the connection opens.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::timeout;
use tracing::debug;

/// Maximum bytes to read for a banner.
const MAX_BANNER_SIZE: usize = 1024;

/// Longest banner kept after sanitizing.
const MAX_BANNER_LEN: usize = 256;

pub const HTTP_PORT: u16 = 80;
pub const SMTP_PORT: u16 = 25;

/// Build the `HEAD` request sent to the HTTP port.
pub fn head_request(host: &str, user_agent: &str) -> String {
    format!(
        "HEAD / HTTP/1.1\r\nHost: {}\r\nUser-Agent: {}\r\n\r\n",
        host, user_agent
    )
}

/// Connect with a timeout.
async fn connect<A: ToSocketAddrs>(addr: A, connect_timeout: Duration) -> Option<TcpStream> {
    match timeout(connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(stream)) => Some(stream),
        Ok(Err(e)) => {
            debug!(error = %e, "banner connection failed");
            None
        }
        Err(_) => {
            debug!("banner connection timed out");
            None
        }
    }
}

/// Read one chunk from the stream.
async fn read_chunk(stream: &mut TcpStream, read_timeout: Duration) -> Option<Vec<u8>> {
    let mut buffer = vec![0u8; MAX_BANNER_SIZE];
    match timeout(read_timeout, stream.read(&mut buffer)).await {
        Ok(Ok(n)) if n > 0 => {
            buffer.truncate(n);
            Some(buffer)
        }
        _ => None,
    }
}

/// Grab the `Server:` header from an HTTP server.
///
/// Sends a `HEAD` request with the given `Host` and `User-Agent`, reads a
/// single response chunk and extracts the header value. Returns `None` on
/// any I/O failure or when no `Server:` header is present.
pub async fn grab_http_banner(
    addr: SocketAddr,
    host: &str,
    user_agent: &str,
    io_timeout: Duration,
) -> Option<String> {
    let mut stream = connect(addr, io_timeout).await?;

    let request = head_request(host, user_agent);
    if let Err(e) = stream.write_all(request.as_bytes()).await {
        debug!(%addr, error = %e, "failed to send HTTP request");
        return None;
    }

    let response = read_chunk(&mut stream, io_timeout).await?;
    parse_server_header(&String::from_utf8_lossy(&response))
}

/// Grab the first line an SMTP server sends after connecting.
pub async fn grab_smtp_banner(host: &str, port: u16, io_timeout: Duration) -> Option<String> {
    let mut stream = connect((host, port), io_timeout).await?;
    let greeting = read_chunk(&mut stream, io_timeout).await?;
    let first_line = greeting.split(|&b| b == b'\n').next().unwrap_or_default();
    let banner = sanitize_banner(first_line);
    (!banner.is_empty()).then_some(banner)
}

/// Extract the value of the first `Server:` header (case-insensitive).
pub fn parse_server_header(response: &str) -> Option<String> {
    response
        .lines()
        .find_map(|line| {
            let prefix = line.get(..7)?;
            prefix
                .eq_ignore_ascii_case("server:")
                .then(|| line[7..].trim().to_string())
        })
        .filter(|value| !value.is_empty())
}

/// Sanitize banner by removing non-printable characters and limiting length.
fn sanitize_banner(data: &[u8]) -> String {
    let s: String = data
        .iter()
        .take(MAX_BANNER_LEN)
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else if b == b'\r' || b == b'\n' || b == b'\t' {
                ' '
            } else {
                '.'
            }
        })
        .collect();

    // Collapse multiple spaces and trim
    let mut result = String::with_capacity(s.len());
    let mut prev_space = false;
    for c in s.chars() {
        if c == ' ' {
            if !prev_space {
                result.push(c);
            }
            prev_space = true;
        } else {
            result.push(c);
            prev_space = false;
        }
    }

    result.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[test]
    fn test_sanitize_banner() {
        let data = b"220 mx.example.com ESMTP Postfix\r\n";
        assert_eq!(sanitize_banner(data), "220 mx.example.com ESMTP Postfix");
    }

    #[test]
    fn test_sanitize_binary_data() {
        let data = b"\x00\x01Hello\x02World\x03";
        assert_eq!(sanitize_banner(data), "..Hello.World.");
    }

    #[test]
    fn test_head_request_format() {
        assert_eq!(
            head_request("xn--gogle-3ve.com", "Mozilla/5.0"),
            "HEAD / HTTP/1.1\r\nHost: xn--gogle-3ve.com\r\nUser-Agent: Mozilla/5.0\r\n\r\n"
        );
    }

    #[test]
    fn test_parse_server_header() {
        let response = "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nSERVER:  nginx/1.25.3 \r\n\r\n";
        assert_eq!(parse_server_header(response), Some("nginx/1.25.3".to_string()));
    }

    #[test]
    fn test_parse_server_header_missing() {
        assert_eq!(parse_server_header("HTTP/1.1 200 OK\r\n\r\n"), None);
        assert_eq!(parse_server_header("Server:\r\n"), None);
        assert_eq!(parse_server_header(""), None);
    }

    #[tokio::test]
    async fn test_grab_http_banner_from_local_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 1024];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nServer: Apache/2.4.58\r\n\r\n")
                .await
                .unwrap();
            request
        });

        let banner =
            grab_http_banner(addr, "example.com", "squatscan-test", Duration::from_secs(2)).await;
        assert_eq!(banner, Some("Apache/2.4.58".to_string()));

        let request = server.await.unwrap();
        assert!(request.starts_with("HEAD / HTTP/1.1\r\n"));
        assert!(request.contains("Host: example.com\r\n"));
        assert!(request.contains("User-Agent: squatscan-test\r\n"));
    }

    #[tokio::test]
    async fn test_grab_smtp_banner_from_local_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket
                .write_all(b"220 mail.example.com ESMTP ready\r\n")
                .await
                .unwrap();
        });

        let banner = grab_smtp_banner("127.0.0.1", port, Duration::from_secs(2)).await;
        assert_eq!(banner, Some("220 mail.example.com ESMTP ready".to_string()));
    }

    #[tokio::test]
    async fn test_smtp_banner_keeps_first_line() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket
                .write_all(b"220-mx.example.com ESMTP\r\n220 ready\r\n")
                .await
                .unwrap();
        });

        let banner = grab_smtp_banner("127.0.0.1", port, Duration::from_secs(2)).await;
        assert_eq!(banner, Some("220-mx.example.com ESMTP".to_string()));
    }

    #[tokio::test]
    async fn test_grab_banner_closed_port() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let banner = grab_http_banner(addr, "example.com", "ua", Duration::from_millis(200)).await;
        assert!(banner.is_none());
    }
}
