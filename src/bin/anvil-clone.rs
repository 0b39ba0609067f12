// Copyright 2026 driedpampas@proton.me
// SPDX-License-Identifier: GPL-3.0-or-later

use anvil_clone::anvil::cloner::clone_region_file;
use anvil_clone::anvil::reader::RegionReader;
use anvil_clone::nbt::rewrite::Displacement;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "anvil-clone")]
#[command(about = "Clone a Minecraft Anvil region file to a new region-grid position", long_about = None)]
struct Cli {
    /// Path to the source .mca file
    source: PathBuf,
    /// Path to write the cloned .mca file
    dest: PathBuf,
    /// Source region X coordinate
    #[arg(long = "from-x")]
    from_rx: i32,
    /// Source region Z coordinate
    #[arg(long = "from-z")]
    from_rz: i32,
    /// Destination region X coordinate
    #[arg(long = "to-x")]
    to_rx: i32,
    /// Destination region Z coordinate
    #[arg(long = "to-z")]
    to_rz: i32,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let displacement = Displacement::new(cli.from_rx, cli.from_rz, cli.to_rx, cli.to_rz);

    let mut reader = RegionReader::open(&cli.source)?;
    clone_region_file(&mut reader, &cli.dest, displacement)?;

    println!(
        "Cloned {} -> {} ({}, {}) -> ({}, {})",
        cli.source.display(),
        cli.dest.display(),
        cli.from_rx,
        cli.from_rz,
        cli.to_rx,
        cli.to_rz
    );
    Ok(())
}
