use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use tea::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "tea", about = "Terminal course reader for Contentful learning content")]
struct Args {
    /// Open this course instead of the course list
    #[arg(short, long)]
    course: Option<String>,

    /// Open this lesson of --course directly
    #[arg(short, long, requires = "course")]
    lesson: Option<String>,

    /// Read courses from a local JSON file instead of Contentful
    #[arg(long, value_name = "PATH")]
    content_file: Option<PathBuf>,

    /// Contentful space to read from
    #[arg(long, value_name = "SPACE_ID")]
    space: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to tea.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("tea.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("{}, using defaults", e);
            eprintln!("Warning: {e}, using defaults");
            config::TeaConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            course: args.course,
            lesson: args.lesson,
            content_file: args.content_file,
            space_id: args.space,
        },
    );
    log::info!("TEA starting up with source: {:?}", resolved.source);

    let provider = match config::build_provider(&resolved) {
        Ok(p) => p,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    tea::tui::run(resolved, provider)
}
