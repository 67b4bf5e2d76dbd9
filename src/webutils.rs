use std::borrow::Cow;

use anyhow::{Error, Result};
use rouille::{Response, ResponseBody};

use crate::html::Node;
use crate::http_response_status_codes::HttpResponseStatusCode;

pub fn errorpage_from_status(status: HttpResponseStatusCode) -> Response {
    let title = status.title();
    let explanation = status.desc();
    let resp = format!("<html><head><title>{title}</title></head><body><h1>{title}</h1>\
                        <p>{explanation}</p></body></html>\n");
    Response {
        status_code: status.code(),
        headers: vec![(Cow::from("Content-type"), Cow::from("text/html"))],
        data: ResponseBody::from_string(resp),
        upgrade: None,
    }
}

pub fn errorpage_from_error(err: Error) -> Response {
    let status = HttpResponseStatusCode::InternalServerError500;
    eprintln!("ERROR in page (return {status:?}): {err:#}");
    errorpage_from_status(status)
}

pub fn htmlresponse(
    status: HttpResponseStatusCode,
    produce: impl FnOnce() -> Result<Node>
) -> Result<Response>
{
    Ok(Response {
        status_code: status.code(),
        headers: vec![(Cow::from("Content-type"),
                       Cow::from("text/html; charset=utf-8"))],
        data: ResponseBody::from_string(produce()?.to_html_document_string()),
        upgrade: None,
    })
}
