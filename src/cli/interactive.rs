use crate::core::installer::{InstallReport, Installer};
use crate::core::pip::PackageBackend;
use crate::core::python::ModuleProbe;
use crate::utils::output::{Reporter, Tone};
use crate::{PackageName, constants::*};
use std::io::{BufRead, ErrorKind};
use tracing::{debug, warn};

/// What one line of interactive input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Skip,
    Install(Vec<PackageName>),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Skip;
    }
    if EXIT_WORDS.iter().any(|word| line.eq_ignore_ascii_case(word)) {
        return Command::Quit;
    }
    // split_whitespace never yields an empty token
    Command::Install(
        line.split_whitespace()
            .filter_map(|token| PackageName::new(token).ok())
            .collect(),
    )
}

/// Prompt loop. Ends on `exit`/`quit` (any case) or end of input and returns
/// everything attempted across all lines.
pub fn execute<P, B, R, I>(installer: &mut Installer<P, B, R>, mut input: I) -> InstallReport
where
    P: ModuleProbe,
    B: PackageBackend,
    R: Reporter,
    I: BufRead,
{
    let mut total = InstallReport::default();
    installer.reporter_mut().banner();

    loop {
        installer.reporter_mut().prompt(&format!("\n{}", PROMPT));

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => {
                debug!("end of input");
                installer.reporter_mut().line(Tone::Progress, "");
                break;
            }
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(error = %e, "skipping line that is not valid UTF-8");
                continue;
            }
            Err(e) => {
                warn!(error = %e, "failed to read input, leaving interactive mode");
                break;
            }
        }

        match parse_line(&line) {
            Command::Quit => break,
            Command::Skip => continue,
            Command::Install(packages) => {
                let report = super::install::execute(installer, &packages);
                total.extend(report);
            }
        }
    }

    installer.reporter_mut().farewell();
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::installer::Outcome;
    use crate::core::installer::tests::{FakeBackend, FakeProbe};
    use crate::utils::output::PlainReporter;
    use std::io::Cursor;

    fn run(
        input: &str,
        present: &[&str],
        failing: &[&str],
    ) -> (InstallReport, Vec<String>, String) {
        run_bytes(input.as_bytes(), present, failing)
    }

    fn run_bytes(
        input: &[u8],
        present: &[&str],
        failing: &[&str],
    ) -> (InstallReport, Vec<String>, String) {
        let mut installer = Installer::new(
            FakeProbe::with(present),
            FakeBackend::failing(failing),
            PlainReporter::new(Vec::new()),
        );
        let report = execute(&mut installer, Cursor::new(input.to_vec()));
        let (_, backend, reporter) = installer.into_parts();
        let calls = backend.calls.borrow().clone();
        (report, calls, String::from_utf8(reporter.into_inner()).unwrap())
    }

    #[test]
    fn exit_ends_without_installing() {
        let (report, calls, text) = run("exit\nnumpy\n", &[], &[]);
        assert!(report.is_empty());
        assert!(calls.is_empty());
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn exit_words_ignore_case() {
        assert_eq!(parse_line("QUIT"), Command::Quit);
        assert_eq!(parse_line("  Exit \n"), Command::Quit);
        assert_eq!(parse_line("quit\r\n"), Command::Quit);
    }

    #[test]
    fn exit_only_counts_as_the_whole_line() {
        match parse_line("exit numpy") {
            Command::Install(names) => {
                let names: Vec<&str> = names.iter().map(PackageName::as_str).collect();
                assert_eq!(names, ["exit", "numpy"]);
            }
            other => panic!("expected Install, got {:?}", other),
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse_line(""), Command::Skip);
        assert_eq!(parse_line("   \t \n"), Command::Skip);
    }

    #[test]
    fn lines_are_split_on_whitespace() {
        let (report, calls, _) = run("numpy  pandas\n\n\tmatplotlib\nquit\n", &["pandas"], &[]);
        assert_eq!(
            report.outcomes(),
            vec![Outcome::Installed, Outcome::AlreadyPresent, Outcome::Installed]
        );
        assert_eq!(calls, ["numpy", "matplotlib"]);
    }

    #[test]
    fn end_of_input_ends_the_loop() {
        let (report, calls, text) = run("broken ok", &[], &["broken"]);
        assert_eq!(report.outcomes(), vec![Outcome::Failed, Outcome::Installed]);
        assert_eq!(calls, ["broken", "ok"]);
        assert!(text.contains("Welcome to pipit"));
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn non_utf8_line_is_skipped() {
        let (report, calls, text) = run_bytes(b"\xff\xfe numpy\npandas\nexit\n", &[], &[]);
        assert_eq!(report.outcomes(), vec![Outcome::Installed]);
        assert_eq!(calls, ["pandas"]);
        assert!(text.contains("Goodbye!"));
    }

    #[test]
    fn prompt_is_shown_for_each_line() {
        let (_, _, text) = run("\n\nexit\n", &[], &[]);
        assert_eq!(text.matches(PROMPT).count(), 3);
    }
}
