use std::sync::Arc;
use std::thread;

use anyhow::{bail, Result};
use kstring::KString;
use rouille::Server;

use connect360::apachelog::Logs;
use connect360::arequest::ARequest;
use connect360::contact::{ContactPageOptions, DEFAULT_CONTACT_NUMBER};
use connect360::handler::{FileHandler, Handler, RedirectHandler};
use connect360::http_response_status_codes::HttpResponseStatusCode;
use connect360::page::{contactpage_handler, DEFAULT_LAYOUT};
use connect360::router::MultiRouter;
use connect360::server::server_handler;
use connect360::util::{getenv, getenv_or, log_basedir, my_read_to_string};
use connect360::warn;

struct Tlskeys {
    crt: Vec<u8>,
    key: Vec<u8>,
}

fn main() -> Result<()> {
    let staticdir = getenv_or("STATICDIR", Some("data/static"))?;
    let contact_number = getenv_or("CONTACT_NUMBER", Some(DEFAULT_CONTACT_NUMBER))?;
    let tlskeysfilebase = getenv("TLSKEYSFILEBASE")?;
    let is_dev = getenv("IS_DEV")?.is_some();

    let tlskeys = tlskeysfilebase.map(
        |base| -> Result<_> {
            Ok(Tlskeys {
                crt: my_read_to_string(format!("{base}.crt"))?.into_bytes(),
                key: my_read_to_string(format!("{base}.key"))?.into_bytes()
            })
        }).transpose()?;

    let mut router: MultiRouter<Arc<dyn Handler>> = MultiRouter::new();
    router
        .add("/call", contactpage_handler(
            ContactPageOptions::quick_contact(KString::from_string(contact_number)),
            &DEFAULT_LAYOUT))
        .add("/sms", contactpage_handler(
            ContactPageOptions::direct_contact(),
            &DEFAULT_LAYOUT))
        .add("/", Arc::new(RedirectHandler::new(
            |request: &ARequest| {
                let qs = request.query_string();
                if qs.is_empty() {
                    String::from("/call")
                } else {
                    format!("/call?{}", qs)
                }
            },
            HttpResponseStatusCode::Found302)))
        .add("/static", Arc::new(FileHandler::new(staticdir)))
        ;
    let router = Arc::new(router);

    let logbasedir = log_basedir()?;
    eprintln!("Logging to dir {logbasedir:?}");

    macro_rules! run {
        { $server_result:expr } => {
            $server_result.expect("could not start server")
                .run();
        }
    }

    let http_thread = thread::Builder::new().name("connect360_http".into()).spawn({
        let addr = std::env::var("LISTEN_HTTP").unwrap_or("127.0.0.1:3000".into());
        let router = router.clone();
        let logs = Logs::open_in_basedir(&logbasedir, false)?;
        move || {
            run!(Server::new(addr, server_handler(router, logs)));
        }
    })?;

    let https_thread = thread::Builder::new().name("connect360_https".into()).spawn({
        let addr = std::env::var("LISTEN_HTTPS").unwrap_or("127.0.0.1:3001".into());
        let router = router.clone();
        let logs = Logs::open_in_basedir(&logbasedir, true)?;
        move || {
            if let Some(tlskeys) = tlskeys {
                run!(Server::new_ssl(
                    addr,
                    server_handler(router, logs),
                    tlskeys.crt,
                    tlskeys.key));
            } else {
                if is_dev {
                    // run fake service
                    run!(Server::new(addr, server_handler(router, logs)));
                } else {
                    warn!("don't have keys, thus not running the HTTPS service!");
                }
            }
        }
    })?;

    http_thread.join().expect("http thread should not panic");
    https_thread.join().expect("https thread should not panic");
    bail!("Server stopped.");
}
