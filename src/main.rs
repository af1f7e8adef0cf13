use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod icon_gen;
mod mask;
mod wave;

#[derive(Debug, Parser)]
#[clap(
    name = "glass-icon",
    version,
    about = "Render the 1024x1024 glass wave app icon"
)]
struct Args {
    /// Output PNG path. Defaults to build/icon_1024.png in the crate directory.
    #[clap(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let output = args.output.unwrap_or_else(icon_gen::default_output_path);

    icon_gen::generate_icon(&output)
}
