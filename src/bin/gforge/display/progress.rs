use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

/// The three stages of `gforge export`, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Export,
    Write,
}

impl Stage {
    const ALL: [Stage; 3] = [Stage::Read, Stage::Export, Stage::Write];

    fn label(self) -> &'static str {
        match self {
            Stage::Read => "Reading structure",
            Stage::Export => "Exporting frame",
            Stage::Write => "Writing output",
        }
    }

    fn ordinal(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).map_or(0, |i| i + 1)
    }
}

/// Stage reporting for the export pipeline. A spinner runs while a stage is
/// in flight and a timed check line replaces it once the stage is done.
///
/// Nothing is drawn when stderr is not a terminal or `--quiet` is given.
pub struct Progress {
    interactive: bool,
    spinner: Option<ProgressBar>,
    started: Instant,
    stage_started: Instant,
}

impl Progress {
    pub fn new(interactive: bool) -> Self {
        let now = Instant::now();
        Self {
            interactive,
            spinner: None,
            started: now,
            stage_started: now,
        }
    }

    pub fn begin(&mut self, stage: Stage) {
        self.stage_started = Instant::now();
        self.clear_spinner();
        if !self.interactive {
            return;
        }

        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");
        let spinner = ProgressBar::new_spinner().with_style(style);
        spinner.set_message(running_line(stage));
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Ends `stage`, listing `notes` under its check line.
    pub fn done(&mut self, stage: Stage, notes: &[String]) {
        self.clear_spinner();
        if !self.interactive {
            return;
        }

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", done_line(stage, self.stage_started.elapsed()));
        for note in notes {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {}", note);
        }
    }

    pub fn finish(mut self) {
        self.clear_spinner();
        if !self.interactive {
            return;
        }

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(stderr, "  \x1b[2m╺{}╸\x1b[0m", "━".repeat(54));
        let _ = writeln!(stderr);
        let _ = writeln!(stderr, "{}", footer_line(self.started.elapsed()));
        let _ = writeln!(stderr);
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

fn running_line(stage: Stage) -> String {
    format!("[{}/{}] {}...", stage.ordinal(), Stage::ALL.len(), stage.label())
}

fn done_line(stage: Stage, elapsed: Duration) -> String {
    format!(
        "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
        stage.label(),
        elapsed.as_secs_f64()
    )
}

fn footer_line(elapsed: Duration) -> String {
    let total = format!("Total: {:.2}s", elapsed.as_secs_f64());
    format!("  \x1b[32m✓\x1b[0m Export complete {:>34}", total)
}
