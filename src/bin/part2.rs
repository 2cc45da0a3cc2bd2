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

    let exclusion_lens = polymer.exclusion_lens();
    for (base_type, len) in &exclusion_lens {
        println!(
            "Removing all {} units leaves {} unit(s) after fully reacting.",
            base_type, len
        );
    }

    match exclusion_lens.iter().map(|(_, len)| *len).min() {
        Some(min_len) => println!(
            "The shortest polymer producible by removing one unit type has {} unit(s).",
            min_len
        ),
        None => println!("The given polymer is empty, no unit type can be removed."),
    }

    Ok(())
}
