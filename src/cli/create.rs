use std::io::{self, Write};

use crate::api::{parse_hours, BoardService};
use crate::config::{BoardsConfig, DayRef};
use crate::error::{PulseError, Result};

/// Create one log entry from command-line arguments
pub fn run(date: &str, description: &str, hours: &str) -> Result<()> {
    let (boards, client) = super::connect()?;
    let stdout = io::stdout();
    create_one(&client, &boards, date, description, hours, &mut stdout.lock())
}

/// Resolve the day's board and group, validate the hours and create the
/// pulse. Prints the absolute link of the new pulse.
pub fn create_one(
    service: &dyn BoardService,
    boards: &BoardsConfig,
    date: &str,
    description: &str,
    hours: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let day = DayRef::parse(date)?;
    let board_id = boards.resolve_board_id(&day.month)?;
    let group_id = boards.resolve_group_id(&day.month, &day.day)?;

    if description.trim().is_empty() {
        return Err(PulseError::validation(
            "description (second arg): must not be empty.",
        ));
    }
    parse_hours(hours)?;

    tracing::debug!(
        month = %day.month,
        day_of_month = day.day_of_month,
        board_id,
        group_id,
        item_name = description,
        hours,
        "create_one"
    );
    let relative_link = service.create_log_item(board_id, group_id, description, hours)?;

    writeln!(out, "{}", boards.pulse_url(&relative_link))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{CreateCall, FakeBoardService};
    use crate::cli::sample_boards;
    use crate::error::ErrorKind;

    fn service() -> FakeBoardService {
        FakeBoardService {
            relative_link: "/boards/5064273451/pulses/987".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_one_prints_absolute_link() {
        let service = service();
        let mut out: Vec<u8> = Vec::new();

        create_one(&service, &sample_boards(), "2023-09-04", "Code review", "2.5", &mut out)
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "https://magicboard.monday.com/boards/5064273451/pulses/987\n"
        );
        assert_eq!(
            service.creates.borrow().as_slice(),
            &[CreateCall {
                board_id: 5064273451,
                group_id: "mon_sep_04".to_string(),
                item_name: "Code review".to_string(),
                hours: "2.5".to_string(),
            }]
        );
    }

    #[test]
    fn test_create_one_bad_date_never_calls_service() {
        let service = service();
        let err = create_one(&service, &sample_boards(), "2023-9-4", "x", "1", &mut std::io::sink())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(service.creates.borrow().is_empty());
    }

    #[test]
    fn test_create_one_unmapped_day() {
        let service = service();
        let err = create_one(&service, &sample_boards(), "2023-09-02", "x", "1", &mut std::io::sink())
            .unwrap_err();

        assert_eq!(
            err.message(),
            "\"months.2023-09.days.02\": not found in boards configuration."
        );
        assert!(service.creates.borrow().is_empty());
    }

    #[test]
    fn test_create_one_unmapped_month() {
        let service = service();
        let err = create_one(&service, &sample_boards(), "2024-01-02", "x", "1", &mut std::io::sink())
            .unwrap_err();

        assert!(err.message().contains("months.2024-01.board_id"));
    }

    #[test]
    fn test_create_one_rejects_hours_before_request() {
        let service = service();
        let err = create_one(&service, &sample_boards(), "2023-09-04", "x", "abc", &mut std::io::sink())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.message().contains("hours = abc"));
        assert!(service.creates.borrow().is_empty());
    }

    #[test]
    fn test_create_one_rejects_empty_description() {
        let service = service();
        let err = create_one(&service, &sample_boards(), "2023-09-04", "  ", "1", &mut std::io::sink())
            .unwrap_err();

        assert!(err.message().contains("description"));
    }

    #[test]
    fn test_create_one_remote_failure_is_ambiguous() {
        let service = FakeBoardService {
            fail_create: true,
            ..Default::default()
        };
        let mut out: Vec<u8> = Vec::new();
        let err = create_one(&service, &sample_boards(), "2023-09-04", "x", "1", &mut out)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Remote);
        assert!(err.message().contains("verify on monday.com"));
        assert!(out.is_empty());
    }
}
