//! Paths independent of the local file system (pure functions), for
//! use in request routing.

//! Does not concern itself with handling ".." or ".", i.e. does not
//! offer canonicalization; see `handler::canonicalize_path` for the
//! place that needs it.

use kstring::KString;

/// Iterator over the non-empty segments of a path string; multiple
/// slashes collapse.
pub fn path_segments(s: &str) -> impl Iterator<Item = &str> {
    s.split('/').filter(|segment| !segment.is_empty())
}

#[derive(Clone, Debug, PartialEq)]
pub struct PPath {
    is_absolute: bool,
    ends_with_slash: bool,
    segments: Vec<KString>, // without empty ones
}

impl PPath {
    pub fn new(is_absolute: bool, ends_with_slash: bool, segments: Vec<KString>) -> Self {
        PPath { is_absolute, ends_with_slash, segments }
    }

    pub fn from_str(s: &str) -> Self {
        let is_absolute = s.chars().next() == Some('/');
        let ends_with_slash = s.chars().last() == Some('/');
        PPath {
            is_absolute,
            ends_with_slash,
            segments: path_segments(s).map(KString::from_ref).collect()
        }
    }

    pub fn is_absolute(&self) -> bool { self.is_absolute }
    pub fn ends_with_slash(&self) -> bool { self.ends_with_slash }
    pub fn segments(&self) -> &[KString] { &self.segments }

    pub fn to_string(&self) -> String {
        let mut s = String::new();
        if self.is_absolute {
            s.push('/');
        }
        if self.segments.is_empty() {
            if !self.is_absolute {
                s.push('.');
                if self.ends_with_slash {
                    s.push('/');
                }
            }
        } else {
            let mut seen = false;
            for p in &self.segments {
                if seen {
                    s.push('/');
                }
                s.push_str(p.as_str());
                seen = true;
            }
            if self.ends_with_slash {
                s.push('/');
            }
        }
        s
    }
}
