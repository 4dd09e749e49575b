//! Turn HAR request records back into raw HTTP/1.x request bytes.

use url::Url;

use super::parse::{HarHeader, HarRequest};

const DEFAULT_HTTP_VERSION: &str = "HTTP/1.1";

/// Raw request: request line, headers, blank line, then the body if any.
///
/// HTTP/2 pseudo-headers (`:authority`, `:path`, ...) are dropped; a `Host`
/// header is added from the URL when the capture has none.
pub fn raw_request(req: &HarRequest) -> Vec<u8> {
    let parsed = Url::parse(&req.url).ok();
    let target = parsed
        .as_ref()
        .map(request_target)
        .unwrap_or_else(|| req.url.clone());
    let version = if req.http_version.trim().is_empty() {
        DEFAULT_HTTP_VERSION
    } else {
        req.http_version.trim()
    };

    let mut out = format!("{} {} {}\r\n", req.method, target, version);

    let headers: Vec<&HarHeader> = req
        .headers
        .iter()
        .filter(|h| !h.name.starts_with(':'))
        .collect();
    let has_host = headers.iter().any(|h| h.name.eq_ignore_ascii_case("Host"));
    if !has_host {
        if let Some(host) = parsed.as_ref().and_then(host_header) {
            out.push_str(&format!("Host: {}\r\n", host));
        }
    }
    for h in headers {
        out.push_str(&format!("{}: {}\r\n", h.name, h.value));
    }
    out.push_str("\r\n");

    if let Some(body) = req.post_data.as_ref().and_then(|p| p.text.as_deref()) {
        out.push_str(body);
    }
    out.into_bytes()
}

/// Path plus query, as sent in an origin-form request line.
fn request_target(url: &Url) -> String {
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }
    target
}

fn host_header(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::har::parse::HarPostData;

    fn header(name: &str, value: &str) -> HarHeader {
        HarHeader {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn request(method: &str, url: &str, headers: Vec<HarHeader>) -> HarRequest {
        HarRequest {
            method: method.to_string(),
            url: url.to_string(),
            http_version: "HTTP/1.1".to_string(),
            headers,
            post_data: None,
        }
    }

    #[test]
    fn get_with_query_and_existing_host() {
        let req = request(
            "GET",
            "https://example.com/login?next=%2Fhome",
            vec![header("Host", "example.com"), header("Accept", "*/*")],
        );
        let raw = String::from_utf8(raw_request(&req)).unwrap();
        assert_eq!(
            raw,
            "GET /login?next=%2Fhome HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\n"
        );
    }

    #[test]
    fn adds_host_with_port_and_drops_pseudo_headers() {
        let mut req = request(
            "GET",
            "http://example.com:8080/",
            vec![header(":authority", "example.com:8080"), header("X-A", "1")],
        );
        req.http_version = "http/2.0".to_string();
        let raw = String::from_utf8(raw_request(&req)).unwrap();
        assert_eq!(
            raw,
            "GET / http/2.0\r\nHost: example.com:8080\r\nX-A: 1\r\n\r\n"
        );
    }

    #[test]
    fn post_body_follows_blank_line() {
        let mut req = request(
            "POST",
            "https://example.com/api",
            vec![header("Content-Type", "application/json")],
        );
        req.http_version = String::new();
        req.post_data = Some(HarPostData {
            text: Some("{\"a\":1}".to_string()),
        });
        let raw = String::from_utf8(raw_request(&req)).unwrap();
        assert_eq!(
            raw,
            "POST /api HTTP/1.1\r\nHost: example.com\r\nContent-Type: application/json\r\n\r\n{\"a\":1}"
        );
    }

    #[test]
    fn unparseable_url_is_used_verbatim() {
        let req = request("GET", "/relative/only", vec![]);
        let raw = String::from_utf8(raw_request(&req)).unwrap();
        assert_eq!(raw, "GET /relative/only HTTP/1.1\r\n\r\n");
    }
}
