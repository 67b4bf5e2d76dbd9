use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpRequestMethod {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    PATCH,
    OPTIONS,
    TRACE,
    CONNECT,
}

impl HttpRequestMethod {
    pub fn from_str(s: &str) -> Result<Self> {
        use HttpRequestMethod::*;
        Ok(match s {
            "GET" => GET,
            "HEAD" => HEAD,
            "POST" => POST,
            "PUT" => PUT,
            "DELETE" => DELETE,
            "PATCH" => PATCH,
            "OPTIONS" => OPTIONS,
            "TRACE" => TRACE,
            "CONNECT" => CONNECT,
            _ => bail!("unknown HTTP request method {s:?}")
        })
    }

    pub fn as_str(self) -> &'static str {
        use HttpRequestMethod::*;
        match self {
            GET => "GET",
            HEAD => "HEAD",
            POST => "POST",
            PUT => "PUT",
            DELETE => "DELETE",
            PATCH => "PATCH",
            OPTIONS => "OPTIONS",
            TRACE => "TRACE",
            CONNECT => "CONNECT",
        }
    }

    /// The subset that page handlers deal with; the rest is answered
    /// 501 at the server boundary.
    pub fn to_simple(self) -> Option<HttpRequestMethodSimple> {
        use HttpRequestMethod::*;
        match self {
            GET => Some(HttpRequestMethodSimple::GET),
            HEAD => Some(HttpRequestMethodSimple::HEAD),
            POST => Some(HttpRequestMethodSimple::POST),
            _ => None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpRequestMethodSimple {
    GET,
    HEAD,
    POST,
}

impl HttpRequestMethodSimple {
    pub fn is_post(self) -> bool {
        self == HttpRequestMethodSimple::POST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_from_str() {
        assert_eq!(HttpRequestMethod::from_str("GET").unwrap(),
                   HttpRequestMethod::GET);
        assert!(HttpRequestMethod::from_str("get").is_err());
        assert!(HttpRequestMethod::from_str("BREW").is_err());
    }

    #[test]
    fn t_to_simple() {
        assert_eq!(HttpRequestMethod::POST.to_simple(),
                   Some(HttpRequestMethodSimple::POST));
        assert_eq!(HttpRequestMethod::TRACE.to_simple(), None);
    }
}
