use std::{net::IpAddr, str::FromStr};

use actix_web::HttpRequest;
use log::trace;
use regex::Regex;

/// Get the remote IP address for a request, for audit logging of webhook callers.
///
/// Sources, in decreasing order of preference:
/// 1. The `X-Forwarded-For` header, iif `use_x_forwarded_for` is enabled in the configuration.
/// 2. The `Forwarded` header, iif `use_forwarded` is enabled.
/// 3. The peer address of the connection.
pub fn get_remote_ip(req: &HttpRequest, use_x_forwarded_for: bool, use_forwarded: bool) -> Option<IpAddr> {
    let mut result = None;
    if use_x_forwarded_for {
        result =
            req.headers().get("X-Forwarded-For").and_then(|v| v.to_str().ok()).and_then(|s| IpAddr::from_str(s).ok());
    }
    if use_forwarded && result.is_none() {
        let re = Regex::new(r#"for=(?P<ip>[^;]+)"#).unwrap();
        result = req
            .headers()
            .get("Forwarded")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| re.captures(v))
            .and_then(|caps| caps.name("ip"))
            .and_then(|m| IpAddr::from_str(m.as_str()).ok());
    }
    result.or_else(|| {
        let peer_addr = req.connection_info().peer_addr().map(|a| a.to_string());
        trace!("Using peer address for remote address: {peer_addr:?}");
        peer_addr.and_then(|s| IpAddr::from_str(&s).ok())
    })
}

#[cfg(test)]
mod test {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn forwarded_headers_are_opt_in() {
        let req = TestRequest::default().insert_header(("X-Forwarded-For", "10.1.2.3")).to_http_request();
        assert_eq!(get_remote_ip(&req, true, false), Some(IpAddr::from_str("10.1.2.3").unwrap()));
        assert_eq!(get_remote_ip(&req, false, false), None);
    }

    #[test]
    fn forwarded_header_is_parsed() {
        let req = TestRequest::default().insert_header(("Forwarded", "by=proxy;for=192.168.7.7")).to_http_request();
        assert_eq!(get_remote_ip(&req, false, true), Some(IpAddr::from_str("192.168.7.7").unwrap()));
    }
}
