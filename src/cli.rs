//! CLI argument definitions using clap derive macros.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use converter_download::artifact::{DEFAULT_ARTIFACT_NAME, DEFAULT_DECLARED_SIZE, DEFAULT_MEDIA_TYPE};
use converter_download::convert::Domain;

/// Default TCP port for the download API.
pub const DEFAULT_PORT: u16 = 3000;

/// Serve the Unit Converter package with HTTP range support.
///
/// Also exposes the converter's length and temperature arithmetic.
#[derive(Parser, Debug)]
#[command(name = "converter-download")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the download API server
    Serve(ServeArgs),
    /// Convert a value between units
    Convert(ConvertArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Path to the package file (default: ./public/<name>)
    #[arg(short, long, env = "ARTIFACT_PATH")]
    pub artifact: Option<PathBuf>,

    /// Filename advertised to clients
    #[arg(long, default_value = DEFAULT_ARTIFACT_NAME)]
    pub name: String,

    /// MIME type advertised to clients
    #[arg(long, default_value = DEFAULT_MEDIA_TYPE)]
    pub media_type: String,

    /// Advertised package size in bytes (informational)
    #[arg(long, default_value_t = DEFAULT_DECLARED_SIZE)]
    pub declared_size: u64,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Value to convert
    #[arg(allow_negative_numbers = true)]
    pub value: f64,

    /// Source unit (m, km, cm, mm, ft, in, yd, mi | c, f, k)
    pub from: String,

    /// Target unit
    pub to: String,

    /// Unit family: length or temperature
    #[arg(short, long, default_value = "length")]
    pub domain: Domain,
}
