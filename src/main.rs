//! CLI entry point for stanza

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stanza")]
#[command(version)]
#[command(about = "Static blog content engine for a personal site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the build artifacts
    #[command(alias = "g")]
    Generate,

    /// List site content
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Validate frontmatter across the content directory
    Check,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// Clean the public folder
    Clean,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "stanza=debug,info"
    } else {
        "stanza=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Generate => {
            let site = stanza::Site::new(&base_dir)?;
            tracing::info!("Generating build artifacts...");
            site.generate()?;
            println!("Generated successfully!");
        }

        Commands::List { r#type } => {
            let site = stanza::Site::new(&base_dir)?;
            stanza::commands::list::run(&site, &r#type)?;
        }

        Commands::Check => {
            let site = stanza::Site::new(&base_dir)?;
            tracing::info!("Checking content in {:?}", site.content_dir);
            stanza::commands::check::run(&site)?;
        }

        Commands::New { title } => {
            let site = stanza::Site::new(&base_dir)?;
            tracing::info!("Creating new post: {}", title);
            stanza::commands::new::run(&site, &title)?;
        }

        Commands::Clean => {
            let site = stanza::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
