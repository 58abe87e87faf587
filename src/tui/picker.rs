//! Line-based pickers and text input.
//!
//! Options are printed as a numbered list on stderr and the answer is read as
//! one line, so the pickers work the same in a terminal, over a pipe, and in
//! tests.

use std::io::{self, BufRead, Stderr, StdinLock, Write};

use crossterm::style::Stylize;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::block_in_place;

use crate::tui::settings;
use crate::ui::prompt::{PickOption, Prompter};

/// Parse a selection such as `1, 3-5 7` or `all` into sorted, de-duplicated
/// zero-based indices.
pub fn parse_selection(input: &str, count: usize) -> Result<Vec<usize>, String> {
    let mut picked = Vec::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        if settings::PICK_ALL_KEYWORDS.contains(&token.to_ascii_lowercase().as_str()) {
            picked.extend(0..count);
            continue;
        }
        let (first, last) = match token.split_once('-') {
            Some((a, b)) => (parse_index(a, count)?, parse_index(b, count)?),
            None => {
                let idx = parse_index(token, count)?;
                (idx, idx)
            }
        };
        if first > last {
            return Err(format!("range `{token}` is backwards"));
        }
        picked.extend(first..=last);
    }
    if picked.is_empty() {
        return Err("nothing selected".to_string());
    }
    picked.sort_unstable();
    picked.dedup();
    Ok(picked)
}

fn parse_index(raw: &str, count: usize) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
        _ => Err(format!("`{raw}` is not a number between 1 and {count}")),
    }
}

/// Run a blocking read. On a multi-thread tokio runtime the worker hands its
/// other tasks off first so timers keep firing while the user types.
fn off_worker<T>(read: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            block_in_place(read)
        }
        _ => read(),
    }
}

/// Prompter that reads answers line by line from `input` and writes prompts
/// to `output`.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl LinePrompter<StdinLock<'static>, Stderr> {
    /// Prompter over the process stdin/stderr.
    pub fn stdio(color: bool) -> Self {
        Self::new(io::stdin().lock(), io::stderr(), color)
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    /// Read one line without its terminator. `None` on end of input.
    fn read_answer(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let input = &mut self.input;
        if off_worker(|| input.read_line(&mut line))? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn write_title(&mut self, title: &str) -> io::Result<()> {
        if self.color {
            writeln!(
                self.output,
                "{} {}",
                settings::GLYPH_SECTION_BULLET.with(settings::COLOR_SECTION_BULLET),
                title.with(settings::COLOR_SECTION_TITLE).bold()
            )
        } else {
            writeln!(self.output, "{} {title}", settings::GLYPH_SECTION_BULLET)
        }
    }

    fn write_options(&mut self, options: &[PickOption]) -> io::Result<()> {
        for (idx, option) in options.iter().enumerate() {
            let number = format!("{:>2}.", idx + 1);
            let description = option.description.as_deref().unwrap_or_default();
            if self.color {
                writeln!(
                    self.output,
                    "{}{} {}  {}",
                    settings::INDENT_1,
                    number.with(settings::COLOR_PICK_INDEX),
                    option.label.as_str().with(settings::COLOR_PICK_LABEL),
                    description.with(settings::COLOR_PICK_DESCRIPTION)
                )?;
            } else {
                writeln!(
                    self.output,
                    "{}{number} {}  {description}",
                    settings::INDENT_1,
                    option.label
                )?;
            }
        }
        Ok(())
    }

    fn write_prompt(&mut self, prompt: &str) -> io::Result<()> {
        if self.color {
            write!(
                self.output,
                "{}{}",
                settings::INDENT_1,
                prompt.with(settings::COLOR_PROMPT)
            )?;
        } else {
            write!(self.output, "{}{prompt}", settings::INDENT_1)?;
        }
        self.output.flush()
    }

    fn write_retry(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.output, "{}{msg}", settings::INDENT_2)
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn pick_many(&mut self, title: &str, options: &[PickOption]) -> io::Result<Option<Vec<usize>>> {
        if options.is_empty() {
            return Ok(None);
        }
        self.write_title(title)?;
        self.write_options(options)?;
        loop {
            self.write_prompt(settings::PROMPT_PICK_MANY)?;
            let Some(answer) = self.read_answer()? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(None);
            }
            match parse_selection(&answer, options.len()) {
                Ok(picked) => return Ok(Some(picked)),
                Err(msg) => self.write_retry(&msg)?,
            }
        }
    }

    fn pick_one(&mut self, title: &str, options: &[PickOption]) -> io::Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }
        self.write_title(title)?;
        self.write_options(options)?;
        loop {
            self.write_prompt(settings::PROMPT_PICK_ONE)?;
            let Some(answer) = self.read_answer()? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(None);
            }
            match parse_index(&answer, options.len()) {
                Ok(idx) => return Ok(Some(idx)),
                Err(msg) => self.write_retry(&msg)?,
            }
        }
    }

    fn input(&mut self, title: &str, default: Option<&str>) -> io::Result<Option<String>> {
        let prompt = match default {
            Some(value) => format!(
                "{title}{}{value}{}{}",
                settings::PROMPT_INPUT_DEFAULT_OPEN,
                settings::PROMPT_INPUT_DEFAULT_CLOSE,
                settings::PROMPT_INPUT_SUFFIX
            ),
            None => format!("{title}{}", settings::PROMPT_INPUT_SUFFIX),
        };
        self.write_prompt(&prompt)?;
        let Some(answer) = self.read_answer()? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(default.map(str::to_string));
        }
        Ok(Some(answer))
    }
}
