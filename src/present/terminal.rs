// src/present/terminal.rs

use super::Presenter;
use crate::locale::Messages;
use crate::lookup::Outcome;
use crate::record::{Record, Subject};
use std::io::{self, Write};
use tracing::error;

/// Plain-text presenter for the command line.
pub struct TerminalPresenter<W: Write> {
    out: W,
    messages: &'static Messages,
    max_subtotal: u32,
    /// Print the loading line on stderr.
    progress: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, messages: &'static Messages, max_subtotal: u32) -> Self {
        Self {
            out,
            messages,
            max_subtotal,
            progress: false,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_outcome(&mut self, outcome: &Outcome) -> io::Result<()> {
        let m = self.messages;
        match outcome {
            Outcome::ValidationFailed => writeln!(self.out, "{}", m.enter_seat)?,
            Outcome::NotFound(key) => writeln!(self.out, "{}", m.not_found_for(key))?,
            Outcome::TransportError(e) => {
                writeln!(self.out, "{}", m.technical_error_for(&e.reason(m)))?
            }
            Outcome::Success(record) => self.write_record(record)?,
        }
        self.out.flush()
    }

    fn write_record(&mut self, record: &Record) -> io::Result<()> {
        let m = self.messages;
        writeln!(self.out, "{}: {}", m.name, record.name())?;
        writeln!(self.out, "{}: {}", m.seat, record.seat())?;
        writeln!(self.out, "{}: {}", m.institution, record.institution())?;
        writeln!(self.out)?;
        writeln!(self.out, "{} | {}", m.subject, m.grade)?;
        for subject in Subject::TABLE_ORDER {
            let marker = if subject.is_non_additive() { " *" } else { "" };
            writeln!(
                self.out,
                "{}{} | {}",
                m.subject(subject),
                marker,
                record.score(subject)
            )?;
        }
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{}: {} / {}",
            m.total,
            record.score(Subject::Subtotal),
            self.max_subtotal
        )
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn set_loading(&mut self, loading: bool) {
        if self.progress && loading {
            eprintln!("{}", self.messages.loading);
        }
    }

    fn present(&mut self, outcome: &Outcome) {
        if let Err(e) = self.write_outcome(outcome) {
            error!("failed to write result: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use crate::locate::locate;
    use crate::lookup::FetchError;

    fn render(outcome: &Outcome) -> String {
        let mut p = TerminalPresenter::new(Vec::new(), Locale::En.messages(), 280);
        p.present(outcome);
        String::from_utf8(p.into_inner()).unwrap()
    }

    #[test]
    fn test_record_layout() {
        let csv = "h\n101,Alice,North,70,60,50,40,30,20,270,45,غ,33\n";
        let text = render(&Outcome::Success(locate(csv, "101").unwrap()));
        assert!(text.starts_with("Name: Alice\nSeat number: 101\nSchool: North\n"));
        assert!(text.contains("Arabic | 70\n"));
        assert!(text.contains("Religious education * | غ\n"));
        assert!(text.ends_with("Total: 270 / 280\n"));
        assert!(!text.contains("Subtotal |"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(render(&Outcome::ValidationFailed), "Please enter a seat number.\n");
        assert_eq!(
            render(&Outcome::NotFound("9".into())),
            "Seat number \"9\" was not found or is invalid.\n"
        );
        assert_eq!(
            render(&Outcome::TransportError(FetchError::EmptyBody)),
            "A technical error occurred: The source returned an empty payload.\n"
        );
    }
}
