use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for blagent
#[derive(Parser, Debug)]
#[command(name = "blagent")]
#[command(about = "Chat front-end relaying to the Bailian completion API")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Port to listen on (falls back to $PORT, then 3000)
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Directory of prebuilt static assets, served under /static
    #[arg(long, value_name = "PATH")]
    pub web_dir: Option<PathBuf>,

    /// Print upstream request/response debug output
    #[arg(short, long)]
    pub verbose: bool,
}
