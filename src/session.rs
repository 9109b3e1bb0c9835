//! Interactive session: prompts, then edit and watermark.
//!
//! The session is generic over its input and output streams so tests can
//! script a whole run with a byte slice and capture what was printed.
//!
//! ## Flow
//!
//! ```text
//! App is loading...
//! ? ready?                       no  → exit
//! ? input file (test.jpg)
//! ? watermark type               Text | Image
//! ? edit image?                  yes → edit checklist → edit in place
//! ? watermark text | watermark file (logo.png)
//!                                → img/<name>-with-watermark.<ext>
//! ```
//!
//! ## Failure Policy
//!
//! A failed step never ends the session. Each step's error is logged and
//! replaced by the fixed [`output::FAILURE`] line; the run continues. Only
//! prompt I/O failures (including end of input) abort with [`SessionError`].
//!
//! Before touching any file the session checks that every referenced image
//! exists: the input for edits and text watermarks, and both the input and the
//! watermark image for image watermarks, each checked on its own.

use crate::config::AppConfig;
use crate::imaging::{
    EditOption, EditOptions, ImageBackend, WatermarkError, WatermarkSpec, add_watermark,
    edit_image_file, ensure_exists,
};
use crate::naming::derive_output_filename_with;
use crate::output;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input ended before the session finished")]
    EndOfInput,
}

/// The two watermark kinds offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkKind {
    Text,
    Image,
}

impl WatermarkKind {
    pub const ALL: [WatermarkKind; 2] = [WatermarkKind::Text, WatermarkKind::Image];

    pub fn label(self) -> &'static str {
        match self {
            WatermarkKind::Text => "Text watermark",
            WatermarkKind::Image => "Image watermark",
        }
    }
}

/// What happened in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user answered "no" to the readiness prompt.
    Declined,
    Finished {
        /// `None` when editing was not requested, else whether it succeeded.
        edited: Option<bool>,
        watermarked: bool,
    },
}

/// Line-oriented prompts over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, line: &str) -> Result<(), SessionError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String, SessionError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    /// Free-text answer; empty input takes `default`.
    pub fn input(&mut self, message: &str, default: Option<&str>) -> Result<String, SessionError> {
        let answer = self.ask(&output::format_question(message, default))?;
        match default {
            Some(d) if answer.is_empty() => Ok(d.to_string()),
            _ => Ok(answer),
        }
    }

    /// Yes/no answer; empty input takes `default`, anything else re-asks.
    pub fn confirm(&mut self, message: &str, default: bool) -> Result<bool, SessionError> {
        loop {
            let answer = self.ask(&output::format_confirm(message, default))?;
            match answer.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say(&output::format_invalid_answer(&answer, "answer y or n"))?,
            }
        }
    }

    /// Pick exactly one of `choices`; returns its index.
    pub fn select(&mut self, message: &str, choices: &[&str]) -> Result<usize, SessionError> {
        self.say(&format!("? {message}"))?;
        for line in output::format_choices(choices) {
            self.say(&line)?;
        }
        loop {
            let answer = self.ask(&format!("  Answer (1-{}): ", choices.len()))?;
            match parse_choice(&answer, choices.len()) {
                Some(index) => return Ok(index),
                None => self.say(&output::format_invalid_answer(
                    &answer,
                    "pick one number from the list",
                ))?,
            }
        }
    }

    /// Pick any subset of `choices`; returns sorted, de-duplicated indices.
    pub fn checkbox(&mut self, message: &str, choices: &[&str]) -> Result<Vec<usize>, SessionError> {
        self.say(&format!("? {message}"))?;
        for line in output::format_choices(choices) {
            self.say(&line)?;
        }
        loop {
            let answer = self.ask("  Answer: ")?;
            match parse_choices(&answer, choices.len()) {
                Some(indices) => return Ok(indices),
                None => self.say(&output::format_invalid_answer(
                    &answer,
                    "use numbers from the list, separated by commas",
                ))?,
            }
        }
    }
}

/// Parse a 1-based choice number into a 0-based index.
pub fn parse_choice(answer: &str, count: usize) -> Option<usize> {
    match answer.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}

/// Parse a comma/space separated list of 1-based choices.
///
/// Empty input selects nothing. Any invalid token rejects the whole answer.
pub fn parse_choices(answer: &str, count: usize) -> Option<Vec<usize>> {
    let mut indices = answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| parse_choice(t, count))
        .collect::<Option<Vec<_>>>()?;
    indices.sort_unstable();
    indices.dedup();
    Some(indices)
}

/// One interactive run.
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            prompter: Prompter::new(input, output),
        }
    }

    /// Drive the full prompt flow against `backend`.
    pub fn run(
        &mut self,
        backend: &impl ImageBackend,
        config: &AppConfig,
    ) -> Result<SessionOutcome, SessionError> {
        let p = &mut self.prompter;
        p.say(output::LOADING)?;
        if !p.confirm(&output::welcome(&config.img_dir), true)? {
            info!("user declined to start");
            return Ok(SessionOutcome::Declined);
        }

        let input_name = p.input(output::ASK_INPUT, Some(config.default_input.as_str()))?;
        let labels = WatermarkKind::ALL.map(WatermarkKind::label);
        let kind = WatermarkKind::ALL[p.select(output::ASK_WATERMARK_TYPE, &labels)?];
        let wants_edit = p.confirm(output::ASK_EDIT, true)?;

        let input_path = config.image_path(&input_name);
        let quality = config.watermark_settings().quality;

        let edited = if wants_edit {
            let labels = EditOption::ALL.map(EditOption::label);
            let edits: EditOptions = p
                .checkbox(output::ASK_EDIT_OPTIONS, &labels)?
                .into_iter()
                .map(|i| EditOption::ALL[i])
                .collect();
            let result = ensure_exists(&[input_path.as_path()])
                .and_then(|()| edit_image_file(backend, &input_path, &edits, quality));
            Some(self.report(result, output::EDITED, "edit")?)
        } else {
            None
        };

        let p = &mut self.prompter;
        let spec = match kind {
            WatermarkKind::Text => WatermarkSpec::Text(p.input(output::ASK_TEXT, None)?),
            WatermarkKind::Image => {
                let name = p.input(
                    output::ASK_WATERMARK_FILE,
                    Some(config.default_watermark.as_str()),
                )?;
                WatermarkSpec::Image(config.image_path(&name))
            }
        };

        let output_path = self.output_path(config, &input_name);
        let preflight = match &spec {
            WatermarkSpec::Text(_) => ensure_exists(&[input_path.as_path()]),
            WatermarkSpec::Image(mark) => {
                ensure_exists(&[input_path.as_path(), mark.as_path()])
            }
        };
        let result = preflight.and_then(|()| {
            add_watermark(
                backend,
                &input_path,
                &output_path,
                &spec,
                &config.watermark_settings(),
            )
        });
        let watermarked = self.report(result, output::WATERMARK_ADDED, "watermark")?;

        Ok(SessionOutcome::Finished {
            edited,
            watermarked,
        })
    }

    fn output_path(&self, config: &AppConfig, input_name: &str) -> PathBuf {
        config.image_path(&derive_output_filename_with(
            input_name,
            &config.output_suffix,
        ))
    }

    /// Print the success line or the fixed failure line; true on success.
    fn report(
        &mut self,
        result: Result<(), WatermarkError>,
        success: &str,
        step: &str,
    ) -> Result<bool, SessionError> {
        match result {
            Ok(()) => {
                self.prompter.say(success)?;
                Ok(true)
            }
            Err(e) => {
                warn!(step, error = %e, "step failed");
                self.prompter.say(output::FAILURE)?;
                Ok(false)
            }
        }
    }
}
