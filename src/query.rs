//! Simple representation of query strings. The hosting URL is the
//! page's only input; parsing it into an explicit value keeps the
//! page builders testable without a running server.

use kstring::KString;

use crate::url_encoding::{url_decode, UrlDecodingError};

#[derive(Debug, PartialEq)]
pub struct QueryString(Vec<(KString, KString)>);

impl QueryString {
    pub fn empty() -> Self {
        QueryString(Vec::new())
    }

    /// Parse the `foo` part in `?foo`. Empty parts are skipped; a
    /// part without `=` is taken as a key with an empty value.
    pub fn from_str(s: &str) -> Result<Self, UrlDecodingError> {
        let mut v = Vec::new();
        for partraw in s.split('&') {
            if !partraw.is_empty() {
                if let Some((key, val)) = partraw.split_once('=') {
                    v.push((url_decode(key)?.into(),
                            url_decode(val)?.into()));
                } else {
                    v.push((url_decode(partraw)?.into(),
                            "".into()));
                }
            }
        }
        Ok(QueryString(v))
    }

    /// First value for `key`, if the parameter is present at all. An
    /// explicitly empty value yields `Some("")`, not `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k.as_str() == key).map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_querystring_from_str() {
        fn t(s: &str, q: &[(&str, &str)]) {
            let q1 = QueryString::from_str(s).expect("not to fail");
            let q11: Vec<(&str, &str)> =
                q1.0.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            assert_eq!(&q11, q);
        }
        t("", &[]);
        t("foo", &[("foo", "")]);
        t("foo=1", &[("foo", "1")]);
        t("=1&&2=", &[("", "1"), ("2", "")]);
        t("foo=1&bar=2", &[("foo", "1"), ("bar", "2")]);
        t("foo=1%26&ba%72=%202", &[("foo", "1&"), ("bar", " 2")]);
        t("owner=Jane%20Doe&text=Hello%21", &[("owner", "Jane Doe"), ("text", "Hello!")]);
    }

    #[test]
    fn t_get() {
        let q = QueryString::from_str("owner=Jane&owner=Jake&text=").unwrap();
        assert_eq!(q.get("owner"), Some("Jane")); // first one wins
        assert_eq!(q.get("text"), Some("")); // present but empty
        assert_eq!(q.get("phone"), None);
    }

    #[test]
    fn t_get_invalid() {
        assert!(QueryString::from_str("a=%GG").is_err());
    }
}
