//! CLI entry point for photomosaic generation

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicApp, init_logging};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());
    let app = MosaicApp::new(cli);
    app.run()
}
