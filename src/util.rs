use std::env::VarError;
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

/// Get an env var as a String; decoding failures are reported as
/// errors. If the var is not set and no fallback was given, an error
/// is reported as well.
pub fn getenv_or(name: &str, fallbackvalue: Option<&str>) -> Result<String> {
    match std::env::var(name) {
        Ok(s) => Ok(s),
        Err(e) => match e {
            VarError::NotPresent =>
                match fallbackvalue {
                    Some(v) => Ok(v.to_string()),
                    None => bail!("{name:?} env var is missing and \
                                   no default provided"),
                },
            VarError::NotUnicode(_) => bail!("{name:?} env var is not unicode"),
        }
    }
}

/// Get an env var as a String; decoding failures are reported as
/// errors.
pub fn getenv(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(s) => Ok(Some(s)),
        Err(e) => match e {
            VarError::NotPresent => Ok(None),
            VarError::NotUnicode(_) => bail!("{name:?} env var is not unicode"),
        }
    }
}

pub fn program_name() -> Result<String> {
    let exe = std::env::current_exe().context("can't get current_exe")?;
    let name = exe.file_name().ok_or_else(
        || anyhow!("current_exe has no file name: {exe:?}"))?;
    Ok(name.to_string_lossy().to_string())
}

pub fn log_basedir() -> Result<String> {
    let logbasedir = format!("{}/log/{}",
                             std::env::var("HOME").with_context(
                                 || anyhow!("can't get HOME env var"))?,
                             program_name()?);
    create_dir_all(&logbasedir).with_context(
        || anyhow!("can't create log base directory {:?}",
                   logbasedir))?;
    Ok(logbasedir)
}

/// Open a log file for appending, creating parent directories as
/// needed. The result does line-wise buffering via BufWriter; callers
/// flush once per entry.
pub fn open_log_output(path: String) -> Result<Box<dyn Write + Send + Sync>> {
    if let Some(dir) = Path::new(&path).parent() {
        create_dir_all(dir).with_context(
            || anyhow!("can't create log directory for {path:?}"))?;
    }
    let fh = OpenOptions::new().create(true).append(true).open(&path)
        .with_context(|| anyhow!("can't open log file {path:?}"))?;
    Ok(Box::new(BufWriter::new(fh)))
}

pub fn my_read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut fh = File::open(path).with_context(
        || anyhow!("can't open file {:?}", path.to_string_lossy()))?;
    let mut s = String::new();
    fh.read_to_string(&mut s).with_context(
        || anyhow!("can't read file {:?}", path.to_string_lossy()))?;
    Ok(s)
}
