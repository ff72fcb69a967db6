use super::*;
use io::{Input, Output};
use settings::{Format, Settings};

#[derive(clap::Parser, Debug)]
#[command(about = "Decode a tag dump into a filament descriptor", long_about = None)]
pub struct Command {
    /// Output format, overriding the configured one
    #[arg(short, long)]
    format: Option<Format>,

    /// UID of the card the dump was read from, in hex
    #[arg(short, long, value_name = "HEX")]
    uid: Option<CardUid>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<Output>,

    /// Raw tag dump (use '-' for stdin)
    input: Input,
}

impl Command {
    pub fn exec(self, settings: &Settings) -> anyhow::Result<ExitCode> {
        let data = self.input.read_all()?;

        let mut parser = spooltag::Parser::new(settings.parser.clone());
        if let Some(CardUid(uid)) = self.uid {
            parser = parser.with_card_uid(uid);
        }

        let descriptor = match parser.parse(&data) {
            Ok(descriptor) => descriptor,
            Err(e) => return Ok(failure(&e)),
        };

        let text = match self.format.unwrap_or(settings.format) {
            Format::Text => descriptor.to_string(),
            Format::Json => serde_json::to_string_pretty(&descriptor)
                .context("Failed to serialize descriptor")?,
        };
        self.output.unwrap_or_default().write_text(&text)?;
        Ok(ExitCode::SUCCESS)
    }
}
