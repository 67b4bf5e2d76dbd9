//! Write HTTP access log files in the Combined Log Format (extended
//! Common Log Format) for access logs (Apache style), as per
//! <https://httpd.apache.org/docs/2.4/logs.html>.

use std::io::{stderr, BufWriter, Write};
use std::mem::swap;
use std::panic;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime};

use anyhow::Result;
use chrono::{DateTime, Datelike, Timelike, Utc};
use rouille::{Response, ResponseBody};

use crate::arequest::ARequest;
use crate::http_response_status_codes::HttpResponseStatusCode;
use crate::util::open_log_output;
use crate::warn;
use crate::webutils::errorpage_from_status;

static MONTHS: &[&str; 12] = &["Jan", "Feb", "Mar", "Apr", "May", "Jun",
                               "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

// "06/Dec/2023:02:02:47 +0000"
pub fn write_time(
    outp: &mut impl Write,
    time: SystemTime
) -> Result<()> {
    let dt: DateTime<Utc> = DateTime::from(time);
    write!(outp, "{:02}/{}/{:04}:{:02}:{:02}:{:02} +0000",
           dt.day(), MONTHS[dt.month0() as usize], dt.year(),
           dt.hour(), dt.minute(), dt.second())?;
    Ok(())
}

// Apache:
// 18.134.151.89 - - [06/Dec/2023:02:02:47 +0100] "GET /login.jsp HTTP/1.1" 404 447 "-" "..."
// We also add duration at the end.

/// Write to access.log
pub fn write_combined(
    outp: &mut impl Write,
    request: &ARequest,
    duration: Duration,
    response: &mut Response, // temporarily swaps out ResponseBody and back
) -> Result<()> {
    // Write the time when the log entry is made, not when the
    // request started
    let now = SystemTime::now();
    write!(outp, "{} - - [", request.client_ip())?;
    write_time(outp, now)?;
    let len = {
        // The response body length fields are private and there are
        // no accessors; swap the body out and back to get at them.
        let mut responsebody = ResponseBody::empty();
        swap(&mut responsebody, &mut response.data);
        let (data, length) = responsebody.into_reader_and_size();
        let len = length.clone();
        responsebody =
            if let Some(len) = length {
                ResponseBody::from_reader_and_size(data, len)
            } else {
                ResponseBody::from_reader(data)
            };
        swap(&mut responsebody, &mut response.data);
        len
    };
    writeln!(outp, "] {:?} {} {} {:?} {:?} {duration:?}",
             request.request_line(),
             response.status_code,
             len.unwrap_or(0),
             request.referer().unwrap_or("-"),
             request.user_agent().unwrap_or("-")
    )?;
    outp.flush()?;
    Ok(())
}

/// Write to error.log
fn write_error(
    outp: &mut impl Write,
    request: &ARequest,
    duration: Duration,
    err: anyhow::Error,
) -> Result<()> {
    let now = SystemTime::now();
    write!(outp, "[")?;
    write_time(outp, now)?;
    writeln!(outp, "] [error] [client {}] {:?} {duration:?}: {err:#}",
             request.client_ip(),
             request.request_line())?;
    outp.flush()?;
    Ok(())
}

/// Panic log to stderr. Panics on errors logging to stderr.
fn write_panic_stderr(
    request: &ARequest,
    duration: Duration
) {
    let mut outp = BufWriter::new(stderr().lock());
    // Stderr is fed to the service supervisor anyway, hence no
    // timestamps here.
    writeln!(&mut outp, "[panic] handling {:?} after {duration:?}",
             request.request_line()).expect("stderr always writable");
    outp.flush().expect("stderr always writable");
}

/// The log files to write to, either access_log if successful, or
/// error_log when no response (even templated one) was made. Should
/// do buffering (i.e. be BufWriter), the code calls flush once per
/// entry.
pub struct Logs {
    pub access_log: Box<dyn Write + Send + Sync>,
    pub error_log: Box<dyn Write + Send + Sync>,
}

impl Logs {
    pub fn open_in_basedir(
        logbasedir: &str,
        is_https: bool
    ) -> Result<Arc<Mutex<Logs>>>
    {
        let s = if is_https { "s" } else { "" };
        Ok(Arc::new(Mutex::new(Logs {
            access_log: open_log_output(
                format!("{logbasedir}/http{s}_access.log"))?,
            error_log: open_log_output(
                format!("{logbasedir}/http{s}_error.log"))?,
        })))
    }
}

pub fn log_combined<F>(
    request: &ARequest,
    logs: &Arc<Mutex<Logs>>,
    handler: F
) -> Response
where
    F: FnOnce() -> anyhow::Result<Response>,
{
    let start_instant = Instant::now();

    // Call the handler and catch panics. Note that we always resume
    // unwinding afterwards.
    let result = panic::catch_unwind(panic::AssertUnwindSafe(handler));
    let elapsed = start_instant.elapsed();

    match result {
        Ok(result) => match result {
            Ok(mut response) => {
                {
                    let mut _logs = logs.lock().expect(
                        "if `write` panics then we are lost anyway");
                    match write_combined(&mut _logs.access_log, request, elapsed,
                                         &mut response)
                    {
                        Ok(()) => (),
                        Err(e) => warn!("could not write to access log: {e:#}")
                    }
                }
                response
            }
            Err(err) => {
                {
                    let mut _logs = logs.lock().expect(
                        "if `write` panics then we are lost anyway");
                    match write_error(&mut _logs.error_log, request, elapsed, err) {
                        Ok(()) => (),
                        Err(e) => warn!("could not write to error log: {e:#}")
                    }
                }
                errorpage_from_status(HttpResponseStatusCode::InternalServerError500)
            }
        },
        Err(payload) => {
            write_panic_stderr(request, elapsed);
            // The panic handler will print the payload contents
            panic::resume_unwind(payload);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn t_write_time() {
        let mut out = Vec::new();
        // 2023-12-06 02:02:47 UTC
        let t = UNIX_EPOCH + Duration::from_secs(1701828167);
        write_time(&mut out, t).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(),
                   "06/Dec/2023:02:02:47 +0000");
    }
}
