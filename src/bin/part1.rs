use anyhow::{Context, Result};
use clap::Parser;
use day5::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    let polymer = day5::read_polymer(&args.input_path).with_context(|| {
        format!(
            "Failed to read polymer from given file({}).",
            args.input_path.display()
        )
    })?;

    let reduced = polymer.reduce();
    println!(
        "After fully reacting, the given polymer has {} unit(s) left.",
        reduced.len()
    );

    Ok(())
}
