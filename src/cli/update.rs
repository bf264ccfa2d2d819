use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::{self, BoardsConfig, ConfigPaths};
use crate::error::{PulseError, Result};

/// Where the latest boards document is published
pub const BOARDS_URL: &str = "https://denis-engcom.github.io/mlog/boards.toml";
/// Overrides `BOARDS_URL`
pub const BOARDS_URL_ENV: &str = "PULSELOG_BOARDS_URL";

/// Fetch the latest boards configuration
pub fn run() -> Result<()> {
    let paths = ConfigPaths::resolve()?;
    let url = std::env::var(BOARDS_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| BOARDS_URL.to_string());
    let stdout = io::stdout();
    update(&url, &paths.boards, &mut stdout.lock())
}

/// Download `url` and replace `dest` with it once the whole body has been
/// received and parses as a boards document
pub fn update(url: &str, dest: &Path, out: &mut dyn Write) -> Result<()> {
    tracing::debug!(url, dest = %dest.display(), "update");
    let download_failed = || PulseError::remote(format!("A problem occurred when downloading {}.", url));

    let response = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .map_err(|e| download_failed().with_source(e))?;

    let bytes = replace_atomically(dest, response)?;

    writeln!(out, "GET {} ({} bytes) - successful", url, bytes)?;
    writeln!(out, "Saved to {}", dest.display())?;
    if let Ok(boards) = config::read_toml::<BoardsConfig>(dest) {
        if let Some(description) = boards.description() {
            writeln!(out, "✅ Description: {}", description)?;
        }
    }
    writeln!(out, "Update complete without errors.")?;
    Ok(())
}

fn temp_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    dest.with_file_name(name)
}

/// Stream `body` into a temporary file next to `dest`, check it, then
/// rename it over `dest`. On any failure the temporary file is removed and
/// `dest` is left as it was. Returns the number of bytes written.
pub fn replace_atomically(dest: &Path, body: impl Read) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(dest);
    let result = write_then_rename(&tmp, dest, body);
    if result.is_err() && tmp.exists() {
        if let Err(e) = fs::remove_file(&tmp) {
            tracing::warn!(path = %tmp.display(), error = %e, "failed to remove temporary file");
        }
    }
    result
}

fn write_then_rename(tmp: &Path, dest: &Path, mut body: impl Read) -> Result<u64> {
    let mut file = File::create(tmp)?;
    let bytes = io::copy(&mut body, &mut file).map_err(|e| {
        PulseError::remote("The boards configuration download was interrupted.").with_source(e)
    })?;
    file.sync_all()?;
    drop(file);

    let boards: BoardsConfig = config::read_toml(tmp).map_err(|e| {
        PulseError::config("The downloaded boards configuration is not valid TOML.").with_source(e)
    })?;
    let missing = boards.missing_fields();
    if !missing.is_empty() {
        return Err(
            PulseError::config("The downloaded boards configuration is incomplete.")
                .with_source(format!("missing {}", missing.join(", "))),
        );
    }

    fs::rename(tmp, dest)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    const OLD: &str = "person_column_id = \"old\"\nhours_column_id = \"old\"\n";
    const NEW: &str = "person_column_id = \"person\"\nhours_column_id = \"numbers\"\ndescription = \"new boards\"\n";

    /// Yields a prefix of the body and then fails, like a dropped connection
    struct Truncated<'a> {
        data: &'a [u8],
        sent: bool,
    }

    impl Read for Truncated<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed mid-body",
                ));
            }
            self.sent = true;
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            Ok(n)
        }
    }

    fn existing(temp: &TempDir) -> PathBuf {
        let dest = temp.path().join("boards.toml");
        fs::write(&dest, OLD).unwrap();
        dest
    }

    #[test]
    fn test_replace_atomically_success() {
        let temp = TempDir::new().unwrap();
        let dest = existing(&temp);

        let bytes = replace_atomically(&dest, NEW.as_bytes()).unwrap();

        assert_eq!(bytes, NEW.len() as u64);
        assert_eq!(fs::read_to_string(&dest).unwrap(), NEW);
        assert!(!temp_path(&dest).exists());
    }

    #[test]
    fn test_truncated_body_keeps_old_file() {
        let temp = TempDir::new().unwrap();
        let dest = existing(&temp);

        let body = Truncated {
            data: &NEW.as_bytes()[..20],
            sent: false,
        };
        let err = replace_atomically(&dest, body).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(fs::read_to_string(&dest).unwrap(), OLD);
        assert!(!temp_path(&dest).exists());
    }

    #[test]
    fn test_unparsable_body_keeps_old_file() {
        let temp = TempDir::new().unwrap();
        let dest = existing(&temp);

        let err = replace_atomically(&dest, "<html>404</html>".as_bytes()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(fs::read_to_string(&dest).unwrap(), OLD);
        assert!(!temp_path(&dest).exists());
    }

    #[test]
    fn test_incomplete_body_keeps_old_file() {
        let temp = TempDir::new().unwrap();
        let dest = existing(&temp);

        let err = replace_atomically(&dest, "description = \"x\"\n".as_bytes()).unwrap_err();

        assert!(err.message().contains("incomplete"));
        assert_eq!(fs::read_to_string(&dest).unwrap(), OLD);
    }

    #[test]
    fn test_replace_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("data/pulselog/boards.toml");

        replace_atomically(&dest, NEW.as_bytes()).unwrap();
        assert!(dest.exists());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let dest = Path::new("/data/pulselog/boards.toml");
        assert_eq!(temp_path(dest), PathBuf::from("/data/pulselog/boards.toml.tmp"));
    }
}
