/*!
Command line file arguments, where `-` means stdin or stdout.
*/

use anyhow::Context;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// A tag dump to read.
#[derive(Debug, Clone)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    pub fn read_all(&self) -> anyhow::Result<Vec<u8>> {
        match self {
            Input::Stdin => {
                let mut buffer = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut buffer)
                    .context("Failed to read stdin")?;
                Ok(buffer)
            }
            Input::File(path) => std::fs::read(path)
                .with_context(|| format!("Failed to read '{}'", path.display())),
        }
    }
}

impl FromStr for Input {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(Input::Stdin)
        } else {
            Ok(Input::File(PathBuf::from(s)))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum Output {
    #[default]
    Stdout,
    File(PathBuf),
}

impl Output {
    /// Write `text`, adding a trailing newline if it lacks one.
    pub fn write_text(&self, text: &str) -> anyhow::Result<()> {
        let mut text = text.to_string();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        match self {
            Output::Stdout => std::io::stdout()
                .write_all(text.as_bytes())
                .context("Failed to write stdout"),
            Output::File(path) => std::fs::write(path, text)
                .with_context(|| format!("Failed to write '{}'", path.display())),
        }
    }
}

impl FromStr for Output {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "-" {
            Ok(Output::Stdout)
        } else {
            Ok(Output::File(PathBuf::from(s)))
        }
    }
}
