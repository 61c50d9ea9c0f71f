//! Grid Tactics - Development Tools

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tactics_tools::loader;
use tactics_tools::render::{self, RenderConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tactics-tools")]
#[command(about = "Development tools for Grid Tactics scenarios")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ChapterArgs {
    /// Scenario data root
    root: PathBuf,
    /// Scenario name (directory under the root)
    scenario: String,
    /// Chapter number
    chapter: u32,
    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,
}

impl ChapterArgs {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            use_color: !self.no_color,
            ..RenderConfig::default()
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario chapters
    Validate {
        /// Scenario data root
        root: PathBuf,
        /// Scenario name (directory under the root)
        scenario: String,
        /// Chapter number (all chapters when omitted)
        chapter: Option<u32>,
    },
    /// Print a chapter's opening map
    Show {
        #[command(flatten)]
        chapter: ChapterArgs,
    },
    /// Print the tiles a deployed fighter can reach and attack
    Reach {
        #[command(flatten)]
        chapter: ChapterArgs,
        /// Fighter name as deployed in the chapter
        fighter: String,
    },
}

fn validate(root: &std::path::Path, scenario: &str, chapter: Option<u32>) -> bool {
    let chapters = match chapter {
        Some(chapter) => vec![chapter],
        None => match loader::list_chapters(root, scenario) {
            Ok(chapters) => chapters,
            Err(e) => {
                tracing::error!("Validation failed: {e}");
                return false;
            }
        },
    };

    let mut passed = true;
    for chapter in chapters {
        match loader::load_battle(root, scenario, chapter) {
            Ok(_) => tracing::info!("{scenario} chapter {chapter}: ok"),
            Err(e) => {
                tracing::error!("{scenario} chapter {chapter}: {e}");
                passed = false;
            }
        }
    }
    passed
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            root,
            scenario,
            chapter,
        } => {
            tracing::info!("Validating {scenario} in: {}", root.display());
            if validate(&root, &scenario, chapter) {
                tracing::info!("Validation passed");
            } else {
                std::process::exit(1);
            }
        }
        Commands::Show { chapter: args } => {
            match loader::load_battle(&args.root, &args.scenario, args.chapter) {
                Ok(battle) => print!("{}", render::render_battle(&battle, &args.render_config())),
                Err(e) => {
                    tracing::error!("Failed to load chapter: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Reach {
            chapter: args,
            fighter,
        } => {
            let battle = match loader::load_battle(&args.root, &args.scenario, args.chapter) {
                Ok(battle) => battle,
                Err(e) => {
                    tracing::error!("Failed to load chapter: {e}");
                    std::process::exit(1);
                }
            };
            let Some(id) = battle.roster().find_by_name(&fighter).map(|f| f.id()) else {
                tracing::error!("No fighter named '{fighter}' in this chapter");
                std::process::exit(1);
            };
            match battle.reachable_tiles(id) {
                Ok(tiles) => print!(
                    "{}",
                    render::render_reach(&battle, &tiles, &args.render_config())
                ),
                Err(e) => {
                    tracing::error!("Reachability failed: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}
