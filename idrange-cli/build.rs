//! Build script for idrange-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

fn file_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).help(help).value_name("FILE")
}

fn number_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(id).help(help).value_name("N")
}

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("idrange")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan collision-free ID ranges for directory-service tests")
        .long_about(
            "Plans ID ranges above the ones recorded from a directory server and \
             prints the add/modify form fixtures integration tests submit",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read an explicit configuration file")
                .value_name("PATH")
                .global(true)
                .env("IDRANGE_CONFIG"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Output format")
                .value_parser(["json", "yaml", "human"])
                .global(true),
        )
        .subcommand(
            Command::new("plan")
                .about("Plan new ranges above the existing ones and print their fixtures")
                .arg(file_arg("ranges", "Recorded idrange_find response").required(true))
                .arg(file_arg("trusts", "Recorded trust_find response"))
                .arg(
                    number_arg("count", "Number of ranges to plan (at most 10000)")
                        .default_value("1"),
                )
                .arg(number_arg("size", "Range size"))
                .arg(
                    Arg::new("trust-backed")
                        .long("trust-backed")
                        .help("Plan trust-backed ranges instead of local ones")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("trust-domain")
                        .long("trust-domain")
                        .help("Trusted domain (defaults to the first recorded trust)")
                        .value_name("NAME"),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .help("Range name (only with --count 1)")
                        .value_name("NAME"),
                )
                .arg(number_arg("base-id", "Force the base ID"))
                .arg(number_arg("base-rid", "Force the primary RID"))
                .arg(number_arg("secondary-base-rid", "Force the secondary RID"))
                .arg(number_arg(
                    "modify-size",
                    "Size submitted by the modify step (defaults to size + 1)",
                )),
        )
        .subcommand(
            Command::new("watermark")
                .about("Print the high-water marks of recorded ranges")
                .arg(file_arg("ranges", "Recorded idrange_find response").required(true))
                .arg(file_arg("trusts", "Recorded trust_find response")),
        )
        .subcommand(
            Command::new("overlap-messages")
                .about("Print the server messages overlap tests expect")
                .arg(
                    Arg::new("kind")
                        .help("Only print this kind")
                        .value_name("KIND"),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a configuration file")
                .arg(
                    Arg::new("config-path")
                        .help("Configuration file to validate")
                        .value_name("CONFIG_PATH")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .required(true),
                ),
        )
}

fn main() -> std::io::Result<()> {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;

    fs::write(man_dir.join("idrange.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
