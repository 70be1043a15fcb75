//! Synthetic container files laid out like an nginx proxy cache entry.

use std::fs;
use std::path::Path;

/// Header filler; the decoder never looks inside it.
pub fn header(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// `header + metadata + body` as one buffer.
pub fn container_bytes(header_size: usize, metadata: &[u8], body: &[u8]) -> Vec<u8> {
    let mut v = header(header_size);
    v.extend_from_slice(metadata);
    v.extend_from_slice(body);
    v
}

/// Write a container at `root/rel`, creating parent directories.
pub fn write_container(root: &Path, rel: &str, header_size: usize, metadata: &[u8], body: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, container_bytes(header_size, metadata, body)).unwrap();
}

/// Metadata block the way nginx writes it: a leading newline, the key line,
/// then the upstream response headers with CRLF endings and a blank CRLF line.
pub fn nginx_metadata(key: &str) -> Vec<u8> {
    format!(
        "\nKEY: {key}\nHTTP/1.1 200 OK\r\nContent-Type: text/html\r\nConnection: close\r\n\r\n"
    )
    .into_bytes()
}
