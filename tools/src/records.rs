use super::*;
use io::Input;
use settings::Settings;

#[derive(clap::Parser, Debug)]
#[command(about = "List the MIME records on a tag", long_about = None)]
pub struct Command {
    /// Also show a hex dump of each payload
    #[arg(short, long)]
    payload: bool,

    /// Raw tag dump (use '-' for stdin)
    input: Input,
}

impl Command {
    pub fn exec(self, settings: &Settings) -> anyhow::Result<ExitCode> {
        let data = self.input.read_all()?;

        let records = match spooltag::ndef::parse_with_config(&data, &settings.parser) {
            Ok(records) => records,
            Err(e) => return Ok(failure(&e)),
        };

        for (index, record) in records.iter().enumerate() {
            println!(
                "{index}: '{}' ({}), {} bytes",
                record.mime_type,
                record.mime().format_name(),
                record.payload.len()
            );
            if self.payload && !record.payload.is_empty() {
                println!("{}", spooltag::hexdump::xxd(&record.payload, usize::MAX));
            }
        }
        Ok(ExitCode::SUCCESS)
    }
}
