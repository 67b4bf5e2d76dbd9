//! The handler glue for Rouille's server loop: wrap each request,
//! route it, log it, and keep panics from taking the process down
//! unlogged.

use std::sync::{Arc, Mutex};

use rouille::{Request, Response};

use crate::apachelog::{log_combined, Logs};
use crate::arequest::ARequest;
use crate::handler::Handler;
use crate::http_response_status_codes::HttpResponseStatusCode;
use crate::router::MultiRouter;
use crate::warn;
use crate::webutils::{errorpage_from_error, errorpage_from_status};

/// Make a handler for Rouille's `Server::new` procedure.
pub fn server_handler(
    router: Arc<MultiRouter<Arc<dyn Handler>>>,
    logs: Arc<Mutex<Logs>>,
) -> impl for<'r> Fn(&'r Request) -> Response {
    move |request: &Request| -> Response {
        match ARequest::new(request) {
            Ok(arequest) => {
                log_combined(&arequest, &logs, || -> anyhow::Result<Response> {
                    let simplemethod = match arequest.method().to_simple() {
                        Some(m) => m,
                        None => {
                            warn!("method {:?} not implemented (yet)",
                                  arequest.method().as_str());
                            return Ok(errorpage_from_status(
                                HttpResponseStatusCode::NotImplemented501))
                        }
                    };
                    if let Some((handlers, rest)) = router.get(arequest.path()) {
                        for handler in handlers {
                            match handler.call(&arequest, simplemethod, &rest)? {
                                Some(response) => return Ok(response),
                                None => (),
                            }
                        }
                    }
                    Ok(errorpage_from_status(HttpResponseStatusCode::NotFound404))
                })
            }
            Err(e) => errorpage_from_error(e),
        }
    }
}
