use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for camroute")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests, and doc in order
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Build the entire workspace
    Build,
}

const FMT: (&str, &[&str]) = ("fmt", &["fmt", "--all", "--", "--check"]);
const CLIPPY: (&str, &[&str]) = (
    "clippy",
    &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
);
const TEST: (&str, &[&str]) = ("test", &["test", "--workspace"]);
const DOC: (&str, &[&str]) = ("doc", &["doc", "--workspace", "--no-deps"]);
const BUILD: (&str, &[&str]) = ("build", &["build", "--workspace"]);

fn main() -> Result<()> {
    let cli = Cli::parse();

    let steps: &[(&str, &[&str])] = match cli.command {
        Commands::Check => &[FMT, CLIPPY, TEST, DOC],
        Commands::Fmt => &[FMT],
        Commands::Clippy => &[CLIPPY],
        Commands::Test => &[TEST],
        Commands::Doc => &[DOC],
        Commands::Build => &[BUILD],
    };

    for (name, args) in steps {
        println!("==> Running cargo {name}");
        let status = Command::new("cargo").args(*args).status()?;
        if !status.success() {
            anyhow::bail!("cargo {name} failed");
        }
    }

    Ok(())
}
