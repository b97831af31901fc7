use crate::cli::commands::{load::load, transform::transform};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Run {
        input,
        output,
        year,
        replace,
    } = cmd
    {
        let (artifact, _) = transform(cfg, input.as_deref(), output.as_deref(), *year)?;
        println!();
        load(cfg, &artifact, *replace)?;
    }
    Ok(())
}
