use std::io::{self, Write};

use crate::config::{self, check_boards, check_user, ConfigPaths, DocumentReport, UserConfig};
use crate::error::{PulseError, Result};

/// Check the configuration files needed by the other commands
pub fn run() -> Result<()> {
    let paths = ConfigPaths::resolve()?;
    let stdout = io::stdout();
    setup(&paths, &mut stdout.lock())
}

fn print_report(report: &DocumentReport, out: &mut dyn Write) -> Result<()> {
    for line in &report.lines {
        writeln!(out, "{}", line)?;
    }
    if report.is_valid() {
        writeln!(out, "✅ File is valid")?;
    }
    Ok(())
}

/// Print a pass/fail line per required field of both documents.
///
/// A missing user document is created as a template with empty fields.
/// The boards document is only checked once the user document is valid.
pub fn setup(paths: &ConfigPaths, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "User configuration path:   {}", paths.user.display())?;
    if !paths.user.exists() {
        config::save(&UserConfig::default(), &paths.user)?;
        writeln!(
            out,
            "Created a template; fill in api_access_token and logging_user_id."
        )?;
    }

    let user_report = check_user(&paths.user);
    print_report(&user_report, out)?;
    if !user_report.is_valid() {
        writeln!(out, "(skipping boards configuration)")?;
        return Err(PulseError::config(
            "The user configuration has one or more validation errors.\nRefer to config.example.toml for how to configure the file properly.",
        ));
    }

    writeln!(out, "Boards configuration path: {}", paths.boards.display())?;
    let boards_report = check_boards(&paths.boards);
    print_report(&boards_report, out)?;
    if !boards_report.is_valid() {
        return Err(PulseError::config(
            "The boards configuration has one or more validation errors.\nRun `pulselog update` to fetch the latest board configuration.",
        ));
    }

    writeln!(out, "Setup complete without errors.")?;
    Ok(())
}
