use std::io::{self, Write};

use crate::api::BoardService;
use crate::config::BoardsConfig;
use crate::error::Result;

/// Print the absolute link for a pulse id
pub fn run(pulse_id: u64) -> Result<()> {
    let (boards, client) = super::connect()?;
    let stdout = io::stdout();
    pulse_link(&client, &boards, pulse_id, &mut stdout.lock())
}

pub fn pulse_link(
    service: &dyn BoardService,
    boards: &BoardsConfig,
    pulse_id: u64,
    out: &mut dyn Write,
) -> Result<()> {
    tracing::debug!(pulse_id, "pulse_link");
    let relative_link = service.fetch_pulse_relative_link(pulse_id)?;
    writeln!(out, "{}", boards.pulse_url(&relative_link))?;
    Ok(())
}
