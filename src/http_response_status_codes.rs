#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpResponseStatusCode {
    OK200,
    MovedPermanently301,
    Found302,
    NotModified304,
    PermanentRedirect308,
    BadRequest400,
    NotFound404,
    InternalServerError500,
    NotImplemented501,
}

impl HttpResponseStatusCode {
    pub fn code(self) -> u16 {
        use HttpResponseStatusCode::*;
        match self {
            OK200 => 200,
            MovedPermanently301 => 301,
            Found302 => 302,
            NotModified304 => 304,
            PermanentRedirect308 => 308,
            BadRequest400 => 400,
            NotFound404 => 404,
            InternalServerError500 => 500,
            NotImplemented501 => 501,
        }
    }

    pub fn title(self) -> &'static str {
        use HttpResponseStatusCode::*;
        match self {
            OK200 => "OK",
            MovedPermanently301 => "Moved Permanently",
            Found302 => "Found",
            NotModified304 => "Not Modified",
            PermanentRedirect308 => "Permanent Redirect",
            BadRequest400 => "Bad Request",
            NotFound404 => "Not Found",
            InternalServerError500 => "Internal Server Error",
            NotImplemented501 => "Not Implemented",
        }
    }

    pub fn desc(self) -> &'static str {
        use HttpResponseStatusCode::*;
        match self {
            OK200 => "The request has succeeded.",
            MovedPermanently301 => "The resource has moved permanently.",
            Found302 => "The resource resides temporarily under a different URI.",
            NotModified304 => "The resource has not been modified.",
            PermanentRedirect308 => "The resource has moved permanently; \
                                     repeat the request against the new URI.",
            BadRequest400 => "The request could not be understood.",
            NotFound404 => "The requested page could not be found.",
            InternalServerError500 => "The server encountered an internal error.",
            NotImplemented501 => "The server does not support the \
                                  functionality required for this request.",
        }
    }
}
