// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # pixsteg
//!
//! Command-line front end for hiding an encrypted message in an image.
//!
//! ```bash
//! pixsteg encode -f cover.png -o out.png -k key.bin -v iv.bin -i message.txt
//! pixsteg decode -f out.png -k key.bin -v iv.bin
//! ```
//!
//! Logs go to stderr so a decoded message on stdout stays clean.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;

use pixsteg_core::config::{DecodeJob, EncodeJob, JobConfig, JobKind, MessageSource, OutputSink};
use pixsteg_core::{job, Diagnostics, OutputFormat, StegoError, TextSafe};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log per-stage detail
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Embed a message into a carrier image
    Encode(EncodeArgs),
    /// Recover a message from an encoded image
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
struct KeyArgs {
    /// File holding the 16-byte AES key
    #[arg(short = 'k', long = "key")]
    key: PathBuf,

    /// File holding the 16-byte initialization vector
    #[arg(short = 'v', long = "iv")]
    iv: PathBuf,

    /// Base64-wrap the ciphertext before embedding
    #[arg(short = 'b', long = "base64")]
    base64: bool,
}

#[derive(Args, Debug)]
struct EncodeArgs {
    /// Carrier image to embed into
    #[arg(short = 'f', long = "file")]
    carrier: PathBuf,

    /// Encoded image to write
    #[arg(short = 'o', long = "output")]
    output: PathBuf,

    /// Output format: png, bmp or tga
    #[arg(short = 't', long = "type", default_value = "png")]
    format: String,

    /// Message file (stdin when omitted)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    #[command(flatten)]
    keys: KeyArgs,
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Encoded image to read
    #[arg(short = 'f', long = "file")]
    carrier: PathBuf,

    /// File to write the message to (stdout when omitted)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    #[command(flatten)]
    keys: KeyArgs,
}

fn init_logger(level: LevelFilter) {
    Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] [{}] {}", record.level(), record.target(), record.args()))
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn job_config(command: Command) -> Result<JobConfig, StegoError> {
    match command {
        Command::Encode(args) => {
            let format: OutputFormat = args.format.parse().map_err(StegoError::from)?;
            Ok(JobConfig {
                key_file: args.keys.key,
                iv_file: args.keys.iv,
                text_safe: TextSafe::from_flag(args.keys.base64),
                job: JobKind::Encode(EncodeJob {
                    carrier: args.carrier,
                    output: args.output,
                    format,
                    message: args.input.map_or(MessageSource::Stdin, MessageSource::File),
                }),
            })
        }
        Command::Decode(args) => Ok(JobConfig {
            key_file: args.keys.key,
            iv_file: args.keys.iv,
            text_safe: TextSafe::from_flag(args.keys.base64),
            job: JobKind::Decode(DecodeJob {
                carrier: args.carrier,
                output: args.output.map_or(OutputSink::Stdout, OutputSink::File),
            }),
        }),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_logger(level);

    let diag = Diagnostics::new("cli");
    let result = job_config(cli.command).and_then(|config| job::run(&config, &diag));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            diag.report(&err);
            ExitCode::FAILURE
        }
    }
}
