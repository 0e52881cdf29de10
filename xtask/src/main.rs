//! Build tasks for cefr-lens: man pages and shell completions.
//!
//! ```text
//! cargo xtask man [--out-dir target/man]
//! cargo xtask completions [--out-dir target/completions]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for cefr-lens")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for the CLI and each subcommand
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out_dir: PathBuf,
    },
}

fn main() -> io::Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => generate_man(&out_dir),
        Task::Completions { out_dir } => generate_completions(&out_dir),
    }
}

fn generate_man(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let cmd = cefr_lens::command();
    clap_mangen::generate_to(cmd, out_dir)?;
    println!("man pages written to {}", out_dir.display());
    Ok(())
}

fn generate_completions(out_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(out_dir)?;
    let mut cmd = cefr_lens::command();
    for shell in [
        Shell::Bash,
        Shell::Zsh,
        Shell::Fish,
        Shell::PowerShell,
        Shell::Elvish,
    ] {
        let path = clap_complete::generate_to(shell, &mut cmd, "cefr-lens", out_dir)?;
        println!("{shell} completions written to {}", path.display());
    }
    Ok(())
}
