use std::any::type_name;
use std::borrow::Cow;
use std::fmt::Debug;
use std::fs::File;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use anyhow::{anyhow, bail, Context, Result};
use httpdate::{fmt_http_date, parse_http_date};
use kstring::KString;
use rouille::{extension_to_mime, Response, ResponseBody};

use crate::arequest::ARequest;
use crate::http_request_method::HttpRequestMethodSimple;
use crate::http_response_status_codes::HttpResponseStatusCode;
use crate::ppath::PPath;
use crate::warn;

macro_rules! cow {
    ($a:expr, $b:expr) => {
        (Cow::from($a), Cow::from($b))
    }
}

/// Resolve "." and ".." segments; `None` when ".." would escape the
/// base.
fn canonicalize_path<'s>(path: &'s [KString]) -> Option<Vec<&'s str>> {
    let mut out = Vec::new();
    for segment in path {
        let segment = segment.as_str();
        match segment {
            "." => (),
            ".." =>
                if out.pop().is_none() {
                    return None
                },
            "" => (),
            _ => out.push(segment)
        }
    }
    Some(out)
}

pub trait Handler: Debug + Send + Sync {
    /// Returning Ok(None) means, the handler is refusing to handle
    /// the request. It is to be handled as 404 not found by the
    /// caller, unless there's another alternative handler picking up
    /// the request. Err means, the handler has accepted to handle the
    /// request but failed to; this will be handled as internal server
    /// error. In either case, the caller has to format a 404 or other
    /// error page.
    fn call(
        &self,
        request: &ARequest,
        method: HttpRequestMethodSimple,
        pathrest: &PPath)
        -> Result<Option<Response>>;
}

// ------------------------------------------------------------------
/// Serve files from the local file system
#[derive(Debug)]
pub struct FileHandler {
    /// Path to base directory in local file system from which to
    /// serve the files. No ".." or "." are allowed in the surplus of
    /// the request path.
    basepath: PathBuf,
    // no cache for now
}

impl FileHandler {
    pub fn new(basepath: impl Into<PathBuf>) -> FileHandler {
        FileHandler {
            basepath: basepath.into()
        }
    }
}

impl Handler for FileHandler {
    /// Returns None if the file does not exist
    fn call(
        &self,
        request: &ARequest,
        method: HttpRequestMethodSimple,
        pathrest: &PPath)
        -> Result<Option<Response>> {
        if method.is_post() {
            bail!("can't POST to a file")
        }
        let canonpath = match canonicalize_path(pathrest.segments()) {
            Some(p) => p,
            None => return Ok(None)
        };
        if canonpath.is_empty() {
            return Ok(None) // Since it's a directory, not a file.
        }
        let canonpathstr: String = canonpath.join("/");
        let full_path: PathBuf = self.basepath.join(&canonpathstr);
        let metadata =
            match full_path.metadata() {
                Ok(m) => m,
                Err(e) =>
                    match e.kind() {
                        ErrorKind::NotFound => return Ok(None),
                        _ => return Err(e).with_context(
                            || anyhow!("can't open file for reading: {:?}",
                                       full_path))
                    }
            };
        if !metadata.is_file() {
            warn!("not serving non-file path {full_path:?}");
            return Ok(None)
        }
        let mimetype =
            if let Some(extension_os) = full_path.extension() {
                let extension = extension_os.to_str().expect("came from String above");
                extension_to_mime(extension)
            } else {
                "text/plain"
            };
        let fh = match File::open(&full_path) {
            Err(e) =>
                match e.kind() {
                    ErrorKind::NotFound => return Ok(None),
                    _ => return Err(e).with_context(
                        || anyhow!("can't open file for reading: {:?}",
                                   full_path))
                },
            Ok(fh) => fh
        };
        let mtime: SystemTime = metadata.modified()?;
        let headers = vec![
            cow!("Content-type", mimetype),
            cow!("Last-Modified", fmt_http_date(mtime)),
            cow!("Cache-Control", "max-age=3600"),
        ];
        if let Some(modsince_str) = request.header("If-Modified-Since") {
            let modsince = parse_http_date(modsince_str).with_context(
                || anyhow!("parsing If-Modified-Since {:?}", modsince_str))?;
            // mtime carries sub-second precision where modsince has
            // none; only report newer when at least a second apart.
            let is_newer = match mtime.duration_since(modsince) {
                Err(_e) => false,
                Ok(secsnewer) => secsnewer >= Duration::from_secs(1)
            };
            if !is_newer {
                return Ok(Some(Response {
                    status_code: HttpResponseStatusCode::NotModified304.code(),
                    headers,
                    data: ResponseBody::empty(),
                    upgrade: None,
                }))
            }
        }
        Ok(Some(Response {
            status_code: HttpResponseStatusCode::OK200.code(),
            headers,
            data: ResponseBody::from_reader(fh),
            upgrade: None,
        }))
    }
}

// ------------------------------------------------------------------
/// A Handler that does not allow a path surplus, passing it to the handler Fn.
#[derive(Clone, Copy)]
pub struct ExactFnHandler<F>
where F: Fn(&ARequest, HttpRequestMethodSimple)
            -> Result<Response> + Send + Sync
{
    handler: F
}

impl<F: Fn(&ARequest, HttpRequestMethodSimple)
           -> Result<Response> + Send + Sync>
    ExactFnHandler<F>
{
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F: Fn(&ARequest, HttpRequestMethodSimple)
           -> Result<Response> + Send + Sync>
    Handler for ExactFnHandler<F>
{
    fn call(
        &self,
        request: &ARequest,
        method: HttpRequestMethodSimple,
        pathrest: &PPath) -> Result<Option<Response>>
    {
        if pathrest.segments().is_empty() {
            Ok(Some((self.handler)(request, method)?))
        } else {
            // refuse to handle if there is a rest (-> 404)
            Ok(None)
        }
    }
}

impl<F: Fn(&ARequest, HttpRequestMethodSimple)
           -> Result<Response> + Send + Sync>
    Debug for ExactFnHandler<F>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("ExactFnHandler({})", type_name::<F>()))
    }
}

// ------------------------------------------------------------------
// Redirect handler

pub fn map_redirect(code: HttpResponseStatusCode) -> Option<Box<dyn Fn(String) -> Response>>
{
    match code {
        HttpResponseStatusCode::MovedPermanently301 => Some(Box::new(Response::redirect_301)),
        HttpResponseStatusCode::Found302 => Some(Box::new(Response::redirect_302)),
        // ^ Instruct the client to do GET
        HttpResponseStatusCode::PermanentRedirect308 => Some(Box::new(Response::redirect_308)),
        // ^ Instruct the client to do GET or POST as per original request
        _ => None
    }
}

pub struct RedirectHandler<F>
where F: Fn(&ARequest) -> String + Send + Sync,
{
    calculate_target: F,
    code: HttpResponseStatusCode,
}

impl<F> RedirectHandler<F>
where F: Fn(&ARequest) -> String + Send + Sync,
{
    /// Panics immediately when given a `code` that's not a redirect.
    pub fn new(calculate_target: F, code: HttpResponseStatusCode) -> Self {
        let _ = map_redirect(code).expect(
            "given code must be a redirect");
        RedirectHandler {
            calculate_target,
            code,
        }
    }
}

impl<F> Debug for RedirectHandler<F>
where F: Fn(&ARequest) -> String + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("RedirectHandler(?, {:?})", self.code))
    }
}

impl<F> Handler for RedirectHandler<F>
where F: Fn(&ARequest) -> String + Send + Sync,
{
    fn call(
        &self,
        request: &ARequest,
        _method: HttpRequestMethodSimple,
        _pathrest: &PPath
    ) -> Result<Option<Response>> {
        let target = (self.calculate_target)(request);
        let responder = map_redirect(self.code).expect("already checked earlier");
        Ok(Some(responder(target)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ks(segments: &[&str]) -> Vec<KString> {
        segments.iter().map(|s| KString::from_ref(s)).collect()
    }

    #[test]
    fn t_canonicalize_path() {
        assert_eq!(canonicalize_path(&ks(&[])), Some(vec![]));
        assert_eq!(canonicalize_path(&ks(&["a", "b"])), Some(vec!["a", "b"]));
        assert_eq!(canonicalize_path(&ks(&[".", "a", ".", "b", ".", ".."])),
                   Some(vec!["a"]));
        assert_eq!(canonicalize_path(&ks(&["a", "..", "b"])),
                   Some(vec!["b"]));
        assert_eq!(canonicalize_path(&ks(&["a", "..", "b", ".."])),
                   Some(vec![]));
        assert_eq!(canonicalize_path(&ks(&["a", "..", ".", ".."])),
                   None);
        assert_eq!(canonicalize_path(&ks(&["a", "foo.html", "."])),
                   Some(vec!["a", "foo.html"]));
        assert_eq!(canonicalize_path(&ks(&["foo", ""])),
                   Some(vec!["foo"]));
    }
}
