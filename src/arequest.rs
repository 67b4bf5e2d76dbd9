use std::net::IpAddr;

use anyhow::Result;
use rouille::Request;

use crate::http_request_method::HttpRequestMethod;
use crate::ppath::PPath;
use crate::query::QueryString;
use crate::url_encoding::UrlDecodingError;

/// Request wrapper carrying the parsed path and method alongside the
/// underlying rouille request.
pub struct ARequest<'r> {
    path: PPath,
    method: HttpRequestMethod,
    request: &'r Request,
}

impl<'r> ARequest<'r> {
    pub fn new(request: &'r Request) -> Result<Self> {
        let path_original = request.url(); // path only
        let path = PPath::from_str(&path_original);
        let method = HttpRequestMethod::from_str(request.method())?;
        Ok(ARequest {
            path,
            method,
            request,
        })
    }

    /// Like the request part in Apache style Combined Log Format
    pub fn request_line(&self) -> String {
        // Request does not appear to maintain the original request
        // line; thus have to reconstruct it, bummer.
        format!("{} {}",
                self.request.method(),
                self.request.raw_url())
    }

    /// `foo` part in `?foo`
    pub fn query_string(&self) -> &str {
        self.request.raw_query_string()
    }

    /// The query string parsed into an explicit value; the page
    /// builders take this instead of reaching into the request.
    pub fn query(&self) -> Result<QueryString, UrlDecodingError> {
        QueryString::from_str(self.query_string())
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.request.header("user-agent")
    }
    pub fn referer(&self) -> Option<&str> {
        self.request.header("referer")
    }
    pub fn header(&self, key: &str) -> Option<&str> {
        self.request.header(key)
    }

    pub fn client_ip(&'r self) -> IpAddr {
        self.request.remote_addr().ip()
    }

    pub fn method(&self) -> HttpRequestMethod { self.method }
    pub fn path(&self) -> &PPath { &self.path }
}
