use super::*;
use io::{Input, Output};

#[derive(clap::Parser, Debug)]
#[command(about = "Show an xxd style hex dump of a tag", long_about = None)]
pub struct Command {
    /// Maximum number of 16 byte lines to show
    #[arg(short = 'n', long)]
    lines: Option<usize>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<Output>,

    /// Raw tag dump (use '-' for stdin)
    input: Input,
}

impl Command {
    pub fn exec(self) -> anyhow::Result<ExitCode> {
        let data = self.input.read_all()?;
        let text = spooltag::hexdump::xxd(&data, self.lines.unwrap_or(usize::MAX));
        self.output.unwrap_or_default().write_text(&text)?;
        Ok(ExitCode::SUCCESS)
    }
}
