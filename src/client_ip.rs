use std::net::IpAddr;

use axum::http::HeaderMap;
use ipnet::IpNet;

/// The client address for rate limiting. `X-Forwarded-For` is honored only
/// when the direct peer is a trusted proxy; the first hop that is not itself
/// a trusted proxy wins.
pub fn resolve(headers: &HeaderMap, peer: IpAddr, trusted_proxies: &[IpNet]) -> IpAddr {
    if trusted_proxies.iter().any(|net| net.contains(&peer)) {
        if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
            for ip_str in xff.split(',').map(|s| s.trim()) {
                if let Ok(ip) = ip_str.parse::<IpAddr>() {
                    if !trusted_proxies.iter().any(|net| net.contains(&ip)) {
                        return ip;
                    }
                }
            }
        }
    }

    peer
}
