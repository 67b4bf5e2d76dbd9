use pct_str::{InvalidPctString, PctStr, PctString, URIReserved};

pub fn url_encode(s: &str) -> String {
    let p = PctString::encode(s.chars(), URIReserved);
    p.to_string()
}

// Don't return InvalidPctString as error value: it borrows the input
// &str, and that borrow would end up embedded in anyhow::Result down
// the line where the request must not escape the function body. Thus
// an owned error type.

#[derive(Debug, thiserror::Error)]
#[error("url decoding error: {0}")]
pub struct UrlDecodingError(Box<String>);

impl From<InvalidPctString<&str>> for UrlDecodingError {
    fn from(e: InvalidPctString<&str>) -> Self {
        Self(Box::new(format!("{}", e)))
    }
}

pub fn url_decode(s: &str) -> Result<String, UrlDecodingError> {
    let p = PctStr::new(s)?;
    Ok(p.decode())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_encode() {
        assert_eq!(url_encode("Hello"), "Hello");
        assert_eq!(url_encode("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(url_encode("Motörhead"), "Mot%C3%B6rhead");
    }

    #[test]
    fn t_roundtrip() {
        for s in ["", "plain", "Hi Jane, I scanned this QR & need you!",
                  "ö ü é 漢字", "100% + more"] {
            assert_eq!(url_decode(&url_encode(s)).expect("just encoded"), s);
        }
    }

    #[test]
    fn t_decode_invalid() {
        assert!(url_decode("%ZZ").is_err());
        assert!(url_decode("%2").is_err());
    }
}
