//! razermon binary.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use razermon_gui::GuiOptions;

/// razermon - battery charge history for your selected peripheral
#[derive(Parser, Debug)]
#[command(name = "razermon", version, about)]
struct Args {
    /// Base URL of the host bridge (overrides the config file)
    #[arg(long, value_name = "URL")]
    host_url: Option<String>,

    /// Run in demo mode with mock data (for screenshots and testing)
    #[arg(long)]
    demo: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    razermon_gui::run(GuiOptions {
        demo: args.demo,
        host_url: args.host_url,
        config_path: args.config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_are_consistent() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_host_url_and_demo() {
        let args = Args::parse_from(["razermon", "--host-url", "http://127.0.0.1:9000", "--demo"]);
        assert_eq!(args.host_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert!(args.demo);
        assert!(args.config.is_none());
    }
}
