//! Map path prefixes to handlers. Multiple entries per path are
//! allowed; they shall be tried in sequence. Lookup picks the entry
//! with the longest matching segment prefix.

use std::fmt::Debug;

use kstring::KString;

use crate::ppath::{path_segments, PPath};

#[derive(Debug)]
pub struct MultiRouter<T> {
    routes: Vec<(Vec<KString>, Vec<T>)>,
}

impl<T> MultiRouter<T> {
    pub fn new() -> MultiRouter<T> {
        MultiRouter { routes: Vec::new() }
    }

    /// Using path *strings*, and chaining.
    pub fn add(&mut self, path: &str, val: T) -> &mut Self
    where T: Debug
    {
        let pathv: Vec<KString> = path_segments(path).map(KString::from_ref).collect();
        match self.routes.iter_mut().find(|(p, _)| *p == pathv) {
            Some((_, vals)) => vals.push(val),
            None => self.routes.push((pathv, vec![val]))
        }
        self
    }

    /// The entry with the longest segment prefix matching `path`,
    /// together with the path rest below the matched prefix.
    pub fn get(&self, path: &PPath) -> Option<(&Vec<T>, PPath)> {
        let segments = path.segments();
        let best = self.routes.iter()
            .filter(|(prefix, _)| {
                prefix.len() <= segments.len()
                    && prefix.iter().zip(segments).all(|(a, b)| a == b)
            })
            .max_by_key(|(prefix, _)| prefix.len())?;
        let (prefix, vals) = best;
        let rest = PPath::new(false, path.ends_with_slash(),
                              segments[prefix.len()..].to_vec());
        Some((vals, rest))
    }
}

impl<T> Default for MultiRouter<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_longest_prefix() {
        let mut r = MultiRouter::new();
        r
            .add("/call", 1)
            .add("/static", 2)
            .add("/", 3)
            ;
        let (vals, rest) = r.get(&PPath::from_str("/call")).unwrap();
        assert_eq!(vals, &vec![1]);
        assert!(rest.segments().is_empty());

        let (vals, rest) = r.get(&PPath::from_str("/static/main.css")).unwrap();
        assert_eq!(vals, &vec![2]);
        assert_eq!(rest.to_string(), "main.css");

        let (vals, _) = r.get(&PPath::from_str("/unknown")).unwrap();
        assert_eq!(vals, &vec![3]); // falls back to the "/" prefix
    }

    #[test]
    fn t_multiple_entries_in_order() {
        let mut r = MultiRouter::new();
        r
            .add("/a", "first")
            .add("/a", "second")
            ;
        let (vals, _) = r.get(&PPath::from_str("/a")).unwrap();
        assert_eq!(vals, &vec!["first", "second"]);
    }

    #[test]
    fn t_no_match_without_root() {
        let mut r = MultiRouter::new();
        r.add("/call", 1);
        assert!(r.get(&PPath::from_str("/other")).is_none());
        // a partial segment is not a prefix
        assert!(r.get(&PPath::from_str("/cal")).is_none());
    }
}
