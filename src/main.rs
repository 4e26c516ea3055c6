mod cmd;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fedtax", version, about = "US federal income tax calculator")]
struct Opts {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the liability of a single return
    Liability(cmd::liability::LiabilityCommand),
    /// Calculate liabilities for a CSV of returns
    Batch(cmd::batch::BatchCommand),
    /// Show a rate schedule with the tax due at each bracket
    Brackets(cmd::brackets::BracketsCommand),
    /// Evaluate the earned income credit
    Eic(cmd::eic::EicCommand),
    /// Show the year's single-value limits and thresholds
    Limits(cmd::limits::LimitsCommand),
    /// Validate a dataset JSON file
    Validate(cmd::validate::ValidateCommand),
    /// Print a built-in dataset as JSON
    Export(cmd::export::ExportCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    match opts.cmd {
        Command::Liability(liability) => liability.exec(),
        Command::Batch(batch) => batch.exec(),
        Command::Brackets(brackets) => brackets.exec(),
        Command::Eic(eic) => eic.exec(),
        Command::Limits(limits) => limits.exec(),
        Command::Validate(validate) => validate.exec(),
        Command::Export(export) => export.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
