//! Export command - a built-in dataset as JSON, in the format `validate` reads

use super::DatasetArgs;
use clap::Args;

#[derive(Args, Debug)]
pub struct ExportCommand {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

impl ExportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let dataset = self.dataset.load()?;
        let json = if self.compact {
            serde_json::to_string(dataset.input())?
        } else {
            serde_json::to_string_pretty(dataset.input())?
        };
        println!("{}", json);
        eprintln!(
            "tax year {} fingerprint {}",
            dataset.year,
            dataset.fingerprint()?
        );
        Ok(())
    }
}
