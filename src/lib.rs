pub mod apachelog;
pub mod arequest;
pub mod contact;
pub mod handler;
pub mod html;
pub mod http_request_method;
pub mod http_response_status_codes;
pub mod page;
pub mod ppath;
pub mod query;
pub mod router;
pub mod server;
pub mod url_encoding;
pub mod util;
pub mod warn;
pub mod webutils;
