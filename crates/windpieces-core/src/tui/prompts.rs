//! Charm-style CLI prompts using cliclack

use crate::config::answers::split_words;
use crate::config::{validate_project_name, Answers, Configuration, OrmDatabase, PackageManager};
use crate::product::ProductConfig;
use crate::runtime::{check, ShellRunner};
use crate::scaffold::Scaffolder;
use crate::tui::ClackReporter;
use anyhow::Result;
use std::path::PathBuf;

/// Default project name offered by the prompter
const DEFAULT_PROJECT_NAME: &str = "my-app";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Answers already given through flags or an answers file
    pub answers: Answers,

    /// Directory the project folder is created in
    pub directory: Option<PathBuf>,

    /// Skip the git/Node.js/package manager check
    pub skip_tool_check: bool,

    /// Accept defaults for every unanswered question (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(product: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(product.display_name())?;

    // Step 1: Collect answers and validate them into a configuration
    let answers = collect_answers(args.answers.clone(), args.yes)?;
    let configuration = Configuration::try_from(answers)?;

    // Step 2: Check tools (advisory only)
    if args.skip_tool_check {
        cliclack::log::info("Skipping tool check")?;
    } else {
        check_tools(configuration.package_manager())?;
    }

    // Step 3: Resolve where the project goes
    let base_dir = select_base_dir(&args, configuration.project_name())?;

    // Step 4: Confirm
    show_summary(&configuration)?;
    if !args.yes {
        let proceed: bool = cliclack::confirm("Create the project?")
            .initial_value(true)
            .interact()?;
        if !proceed {
            cliclack::outro_cancel("Setup cancelled.")?;
            return Ok(());
        }
    }

    // Step 5: Run the pipeline
    let mut scaffolder = Scaffolder::from_product(product.clone(), ShellRunner, base_dir)?;
    log::debug!("Starter repository: {}", scaffolder.template_url());

    if let Err(e) = scaffolder.run(&configuration, &mut ClackReporter).await {
        cliclack::log::error(format!("{}", e))?;
        anyhow::bail!("Project creation failed. The partially created project was left in place.");
    }

    Ok(())
}

/// Ask every question the flags and answers file left open
fn collect_answers(given: Answers, yes: bool) -> Result<Answers> {
    if yes {
        return Ok(accept_defaults(given));
    }

    let mut answers = given;
    exclude_conflicting_database(&mut answers);

    if answers.project_name.is_none() {
        let name: String = cliclack::input("What is the name of your project?")
            .placeholder(DEFAULT_PROJECT_NAME)
            .default_input(DEFAULT_PROJECT_NAME)
            .validate(|input: &String| match validate_project_name(Some(input.as_str())) {
                Ok(_) => Ok(()),
                Err(_) => Err("Please enter a single directory name."),
            })
            .interact()?;
        answers.project_name = Some(name);
    }

    if answers.package_manager.is_none() {
        let mut select = cliclack::select("What package manager do you use?");
        for pm in PackageManager::ALL {
            select = select.item(pm, pm.binary(), "");
        }
        answers.package_manager = Some(select.initial_value(PackageManager::Npm).interact()?);
    }

    if answers.use_container.is_none() {
        answers.use_container = Some(
            cliclack::confirm("Would you like to add Docker to your project?")
                .initial_value(false)
                .interact()?,
        );
    }

    if answers.use_orm.is_none() {
        answers.use_orm = Some(
            cliclack::confirm("Would you like to add Prisma to your project?")
                .initial_value(false)
                .interact()?,
        );
    }

    if answers.use_orm == Some(true) && answers.orm_database.is_none() {
        let mut select = cliclack::select("What database would you like to use?");
        for db in OrmDatabase::ALL {
            select = select.item(db, db.display_name(), "");
        }
        answers.orm_database = Some(select.initial_value(OrmDatabase::Postgresql).interact()?);
    }

    exclude_conflicting_database(&mut answers);

    if answers.use_document_database.is_none() {
        answers.use_document_database = Some(
            cliclack::confirm("Would you like to add MongoDB to your project (Mongoose)?")
                .initial_value(false)
                .interact()?,
        );
    }

    if answers.extra_libraries.is_none() {
        let input: String = cliclack::input("Any other libraries to install? (space-separated)")
            .placeholder("zod axios")
            .required(false)
            .interact()?;
        answers.extra_libraries = Some(split_words(&input));
    }

    if answers.cors_origins.is_none() {
        let input: String = cliclack::input("Allowed CORS origins? (space-separated, empty to skip)")
            .placeholder("http://localhost:5173")
            .required(false)
            .interact()?;
        answers.cors_origins = Some(split_words(&input));
    }

    if answers.open_editor_afterward.is_none() {
        answers.open_editor_afterward = Some(
            cliclack::confirm("Would you like to open VSCode?")
                .initial_value(false)
                .interact()?,
        );
    }

    Ok(answers)
}

/// Answer every open question with its default
fn accept_defaults(given: Answers) -> Answers {
    let mut answers = given.or(Answers {
        project_name: Some(DEFAULT_PROJECT_NAME.to_string()),
        ..Answers::default()
    });
    if answers.use_orm == Some(true) && answers.orm_database.is_none() {
        answers.orm_database = Some(OrmDatabase::Postgresql);
    }
    answers
}

/// MongoDB and Prisma are exclusive: a yes to one answers the other with no
fn exclude_conflicting_database(answers: &mut Answers) {
    if answers.use_document_database == Some(true) && answers.use_orm.is_none() {
        answers.use_orm = Some(false);
    }
    if answers.use_orm == Some(true) && answers.use_document_database.is_none() {
        answers.use_document_database = Some(false);
    }
}

fn check_tools(package_manager: PackageManager) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    let (tools, warnings) = check::check_tools(package_manager);
    let tool_info: Vec<String> = tools
        .iter()
        .map(|t| {
            if t.available {
                format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown"))
            } else {
                format!("{} (not installed)", t.name)
            }
        })
        .collect();
    spinner.stop(format!("Detected tools: {}", tool_info.join(", ")));

    for warning in warnings {
        cliclack::log::warning(warning)?;
    }

    Ok(())
}

fn select_base_dir(args: &CreateArgs, project_name: &str) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let base_dir = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !base_dir.is_dir() {
        anyhow::bail!("Directory does not exist: {}", base_dir.display());
    }

    let target = base_dir.join(project_name);
    if target.exists() {
        cliclack::log::warning(format!(
            "{} already exists, cloning into it will fail",
            target.display()
        ))?;
    }

    Ok(base_dir)
}

fn show_summary(configuration: &Configuration) -> Result<()> {
    let yes_no = |value: bool| if value { "yes" } else { "no" };

    let mut lines = vec![
        format!("Project:          {}", configuration.project_name()),
        format!("Package manager:  {}", configuration.package_manager()),
        format!("Docker:           {}", yes_no(configuration.use_container())),
        format!("MongoDB:          {}", yes_no(configuration.use_document_database())),
    ];

    lines.push(match configuration.orm_database() {
        Some(db) => format!("Prisma:           yes ({})", db),
        None => "Prisma:           no".to_string(),
    });

    if let Some(libraries) = configuration.extra_libraries() {
        let names: Vec<&str> = libraries.iter().map(String::as_str).collect();
        lines.push(format!("Libraries:        {}", names.join(" ")));
    }

    if let Some(origins) = configuration.cors_origins() {
        lines.push(format!("CORS origins:     {}", origins.join(", ")));
    }

    cliclack::note("Summary", lines.join("\n"))?;
    Ok(())
}
