//! Client address extraction from HTTP requests.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Determines the client IP for a request.
///
/// When `behind_proxy` is false the socket peer address is authoritative and
/// forwarding headers are ignored, since any client can forge them.
///
/// When `behind_proxy` is true:
/// 1. The first parsable address in `X-Forwarded-For`
/// 2. Otherwise `X-Real-IP`
/// 3. Otherwise the peer address
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let ip = extract_client_ip(&headers, "10.0.0.1:5000".parse().unwrap(), true);
/// assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
/// ```
pub fn extract_client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> IpAddr {
    if !behind_proxy {
        return peer.ip();
    }

    forwarded_for(headers)
        .or_else(|| real_ip(headers))
        .unwrap_or_else(|| peer.ip())
}

fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get(X_FORWARDED_FOR)?
        .to_str()
        .ok()?
        .split(',')
        .find_map(|part| part.trim().parse().ok())
}

fn real_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers.get(X_REAL_IP)?.to_str().ok()?.trim().parse().ok()
}
