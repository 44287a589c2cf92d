use clap::Parser;
use std::path::PathBuf;
use wine_quality_api::config::ServerConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Wine quality prediction API", long_about = None)]
struct Args {
    #[arg(
        long,
        default_value = "127.0.0.1",
        help = "Host address to bind the server to"
    )]
    host: String,

    #[arg(long, default_value_t = 8000, help = "Port number to listen on")]
    port: u16,

    #[arg(
        long,
        default_value = "artifacts",
        help = "Directory containing tuned_random_forest.json and standard_scaler.json"
    )]
    artifact_dir: PathBuf,

    #[arg(
        long,
        default_value = "static",
        help = "Directory served under /static, holding index.html"
    )]
    static_dir: PathBuf,

    #[arg(long, help = "Number of HTTP worker threads (default: one per CPU)")]
    workers: Option<usize>,

    #[arg(
        long,
        default_value = "info",
        help = "Log level: off, error, warn, info, debug or trace"
    )]
    log_level: String,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            artifact_dir: self.artifact_dir,
            static_dir: self.static_dir,
            workers: self.workers,
            log_level: self.log_level,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    wine_quality_api::launch(args.into_config())
}
