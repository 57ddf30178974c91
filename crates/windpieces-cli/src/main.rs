//! windpieces CLI - Project scaffolding for Express/TypeScript backends

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;
use windpieces_core::tui::CreateArgs;
use windpieces_core::{Answers, ExitStatus, OrmDatabase, PackageManager, ProductConfig};

/// windpieces product configuration
#[derive(Clone)]
pub struct WindpiecesConfig;

impl ProductConfig for WindpiecesConfig {
    fn name(&self) -> &'static str {
        "windpieces"
    }

    fn display_name(&self) -> &'static str {
        "windpieces backend"
    }

    fn default_template_url(&self) -> &'static str {
        "https://github.com/Kyoudan/windpieces-backend-starter.git"
    }

    fn template_url_env(&self) -> &'static str {
        "WINDPIECES_TEMPLATE_URL"
    }

    fn support_url(&self) -> &'static str {
        "https://github.com/Kyoudan/windpieces-backend-cli"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding windpieces backend projects"
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-windpieces-backend")]
#[command(about = "CLI for scaffolding windpieces backend projects")]
#[command(version)]
pub struct Args {
    /// Project name, also the directory that gets created
    pub name: Option<String>,

    /// Directory to create the project in (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// YAML file with answers to some or all questions
    #[arg(long)]
    pub answers: Option<PathBuf>,

    /// Package manager: npm, yarn or pnpm
    #[arg(short, long)]
    pub package_manager: Option<PackageManager>,

    /// Add Docker files
    #[arg(long)]
    pub docker: bool,

    /// Add MongoDB through Mongoose
    #[arg(long, conflicts_with = "prisma")]
    pub mongo: bool,

    /// Add Prisma for the given database: postgresql, mysql, mongodb or sqlite
    #[arg(long, value_name = "DATABASE")]
    pub prisma: Option<OrmDatabase>,

    /// Extra libraries to install (comma-separated)
    #[arg(long = "lib", value_delimiter = ',')]
    pub libraries: Vec<String>,

    /// Allowed CORS origins (comma-separated)
    #[arg(long = "cors-origin", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Open the project in VSCode when done
    #[arg(long)]
    pub open_editor: bool,

    /// Skip the git/Node.js/package manager check
    #[arg(long)]
    pub skip_tool_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Answers given on the command line; unset flags stay unanswered
    fn flag_answers(&self) -> Answers {
        let non_empty = |values: &Vec<String>| (!values.is_empty()).then(|| values.clone());

        Answers {
            project_name: self.name.clone(),
            package_manager: self.package_manager,
            use_container: self.docker.then_some(true),
            use_document_database: self.mongo.then_some(true),
            use_orm: self.prisma.map(|_| true),
            orm_database: self.prisma,
            extra_libraries: non_empty(&self.libraries),
            cors_origins: non_empty(&self.cors_origins),
            open_editor_afterward: self.open_editor.then_some(true),
        }
    }

    /// Merge flags over the answers file
    fn into_create_args(self) -> Result<CreateArgs> {
        let mut answers = self.flag_answers();
        if let Some(path) = &self.answers {
            answers = answers.or(Answers::load(path)?);
        }

        Ok(CreateArgs {
            answers,
            directory: self.directory,
            skip_tool_check: self.skip_tool_check,
            yes: self.yes,
        })
    }
}

fn log_level_from_verbose(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(log_level_from_verbose(args.verbose))
        .parse_default_env()
        .init();

    let config = WindpiecesConfig;
    let result = match args.into_create_args() {
        Ok(create_args) => windpieces_core::run(&config, create_args).await,
        Err(e) => Err(e),
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }
    ExitCode::from(ExitStatus::from(&result).code())
}
