use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use wallgal::pipeline::Pipeline;
use wallgal::publish::GitCli;
use wallgal::watch::WatchSession;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "wallgal")]
#[command(about = "Self-publishing static gallery for a wallpaper directory")]
#[command(long_about = "\
Self-publishing static gallery for a wallpaper directory

Drop an image into the watched directory and wallgal regenerates the gallery
page and pushes it to your git remote. The directory is the data source:
every jpg/jpeg/png/gif directly inside it becomes a gallery tile, in filename
order, captioned by position.

The directory is expected to be the working tree of an already-configured git
repository; wallgal runs plain `git add` / `git commit` / `git push` in it.
A rejected push is only a warning — commit locally now, push manually later.")]
#[command(version = version_string())]
struct Cli {
    /// Directory to scan and watch
    #[arg(long, default_value = ".", global = true)]
    dir: PathBuf,

    /// Name of the generated gallery page
    #[arg(long, default_value = "index.html", global = true)]
    output: String,

    /// Commit message for published changes
    #[arg(long, default_value = "Photo added", global = true)]
    message: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate the gallery page once, without publishing
    Build,
    /// Regenerate once, then watch for new images and publish each change
    Watch,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let cli = Cli::parse();
    let dir = cli.dir.canonicalize()?;

    let pipeline = Pipeline::new(
        dir.clone(),
        cli.output,
        cli.message,
        GitCli::new(dir.clone()),
    );

    match cli.command {
        Command::Build => {
            pipeline.regenerate()?;
        }
        Command::Watch => {
            // Startup one-shot: bring the page up to date before any event.
            pipeline.regenerate()?;
            let session = WatchSession::start(dir)?;
            session.run(&pipeline)?;
        }
    }

    Ok(())
}
