use clap::Parser;

/// Uplink: a terminal console for a hosted chat model and image model.
#[derive(Parser, Debug)]
#[command(name = "uplink", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory for generated images (overrides `[image] output_dir`).
    #[arg(long)]
    pub image_dir: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
