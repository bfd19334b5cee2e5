use crate::PackageName;
use crate::core::installer::InstallReport;
use colored::Colorize;
use serde::Deserialize;
use std::io::{self, Write};

/// How a status line should look. Only the colored reporter cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Progress,
    Notice,
    Success,
    Failure,
}

/// Presentation strategy for status output.
///
/// Implementations only decide how a toned line is rendered; the wording of
/// every message lives in the provided methods so colored and plain output
/// always say the same thing. Write errors are swallowed: status output is
/// best effort and never changes what gets installed.
pub trait Reporter {
    fn line(&mut self, tone: Tone, text: &str);

    /// Text without a trailing newline, flushed immediately.
    fn prompt(&mut self, text: &str);

    fn already_present(&mut self, name: &PackageName) {
        self.line(Tone::Notice, &format!("⚠️  {} is already installed.", name));
    }

    fn installing(&mut self, name: &PackageName) {
        self.line(Tone::Progress, &format!("🔍 Installing {} ...", name));
    }

    fn installed(&mut self, name: &PackageName) {
        self.line(Tone::Success, &format!("✅ Successfully installed {}\n", name));
    }

    fn failed(&mut self, name: &PackageName, reason: &str) {
        self.line(
            Tone::Failure,
            &format!("❌ Failed to install {}: {}\n", name, reason),
        );
    }

    fn banner(&mut self) {
        self.line(
            Tone::Progress,
            "🔧 Welcome to pipit, the command-line Python library installer!",
        );
    }

    fn farewell(&mut self) {
        self.line(Tone::Success, "👋 Goodbye!");
    }

    fn summary(&mut self, report: &InstallReport) {
        if report.is_empty() {
            return;
        }
        let text = format!(
            "Done: {} installed, {} already present, {} failed",
            report.installed(),
            report.already_present(),
            report.failed()
        );
        if report.failed() == 0 {
            self.line(Tone::Success, &text);
        } else {
            self.line(Tone::Failure, &text);
            let names: Vec<&str> = report.failed_names().map(PackageName::as_str).collect();
            self.line(Tone::Failure, &format!("   failed: {}", names.join(" ")));
        }
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn line(&mut self, tone: Tone, text: &str) {
        (**self).line(tone, text);
    }

    fn prompt(&mut self, text: &str) {
        (**self).prompt(text);
    }
}

pub struct ColoredReporter<W: Write> {
    out: W,
}

impl<W: Write> ColoredReporter<W> {
    /// Paints through `colored`, so output follows its detection unless
    /// the caller has set an override.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ColoredReporter<W> {
    fn line(&mut self, tone: Tone, text: &str) {
        let painted = match tone {
            Tone::Progress => text.cyan(),
            Tone::Notice => text.yellow(),
            Tone::Success => text.green(),
            Tone::Failure => text.red(),
        };
        let _ = writeln!(self.out, "{}", painted);
    }

    fn prompt(&mut self, text: &str) {
        let _ = write!(self.out, "{}", text.bold());
        let _ = self.out.flush();
    }
}

pub struct PlainReporter<W: Write> {
    out: W,
}

impl<W: Write> PlainReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for PlainReporter<W> {
    fn line(&mut self, _tone: Tone, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }

    fn prompt(&mut self, text: &str) {
        let _ = write!(self.out, "{}", text);
        let _ = self.out.flush();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when `colored` detects a capable terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn use_color(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }
}

/// Builds the stdout reporter once, at startup.
pub fn stdout_reporter(choice: ColorChoice) -> Box<dyn Reporter> {
    if choice == ColorChoice::Always {
        colored::control::set_override(true);
    }
    if choice.use_color() {
        Box::new(ColoredReporter::new(io::stdout()))
    } else {
        Box::new(PlainReporter::new(io::stdout()))
    }
}
