//! Runs a scaffold from checkout to the final report

use super::{Degradation, Reporter, ScaffoldError, ScaffoldReport};
use crate::config::Configuration;
use crate::modules::{Module, StepContext};
use crate::product::{self, ProductConfig};
use crate::runtime::{CommandRunner, ShellCommand};
use crate::template::{TemplateContext, TemplateError};
use crate::workspace::{self, Workspace};
use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// `package.json` script the starter uses to format its sources
pub const TEMPLATE_FORMAT_SCRIPT: &str = "prettier:fix";

type RemoveGitMetadata = fn(&Path) -> io::Result<bool>;
type OpenFolder = fn(&Path) -> io::Result<()>;

fn open_with_system_handler(path: &Path) -> io::Result<()> {
    open::that(path)
}

/// Drives one scaffold run.
///
/// Steps run strictly one after another. Checkout, dependency installation and
/// module commands are fatal. Removing `.git`, formatting and opening the
/// editor only degrade the result.
pub struct Scaffolder<P, R> {
    product: P,
    runner: R,
    base_dir: PathBuf,
    template_url: Url,
    remove_git_metadata: RemoveGitMetadata,
    open_folder: OpenFolder,
}

impl<P: ProductConfig, R: CommandRunner> Scaffolder<P, R> {
    /// Create a scaffolder that creates projects inside `base_dir`
    pub fn from_product(product: P, runner: R, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let template_url = product::template_url(&product)?;
        Ok(Self {
            product,
            runner,
            base_dir: base_dir.into(),
            template_url,
            remove_git_metadata: workspace::remove_git_metadata,
            open_folder: open_with_system_handler,
        })
    }

    pub fn with_git_metadata_remover(mut self, remover: RemoveGitMetadata) -> Self {
        self.remove_git_metadata = remover;
        self
    }

    /// Fallback used when the editor command fails
    pub fn with_folder_opener(mut self, opener: OpenFolder) -> Self {
        self.open_folder = opener;
        self
    }

    pub fn template_url(&self) -> &Url {
        &self.template_url
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run the whole pipeline for `config`
    pub async fn run(
        &mut self,
        config: &Configuration,
        reporter: &mut impl Reporter,
    ) -> Result<ScaffoldReport, ScaffoldError> {
        let mut workspace = Workspace::new(&self.base_dir, config.project_name());
        let mut degraded = Vec::new();

        reporter.step("Creating new project...");
        let checkout = ShellCommand::new("git")
            .args(["clone", "--depth", "1", self.template_url.as_str()])
            .arg(config.project_name())
            .current_dir(&self.base_dir);
        if !self.runner.execute(&checkout).await {
            return Err(ScaffoldError::Checkout {
                command: checkout.to_string(),
            });
        }

        let remover = self.remove_git_metadata;
        let root = workspace.root().to_path_buf();
        let removal = tokio::task::spawn_blocking(move || remover(&root))
            .await
            .unwrap_or_else(|e| Err(io::Error::other(e)));
        match removal {
            Ok(removed) => log::debug!("Removed .git from the clone: {}", removed),
            Err(e) => {
                let degradation = Degradation::GitMetadata(e.to_string());
                reporter.warn(&degradation.to_string());
                degraded.push(degradation);
            }
        }

        reporter.step("Installing dependencies...");
        let install = config.package_manager().install_all(workspace.root());
        if !self.runner.execute(&install).await {
            return Err(ScaffoldError::Install {
                command: install.to_string(),
            });
        }

        let mut template = TemplateContext::default();
        let mut applied = Vec::new();
        let mut skipped = Vec::new();

        for module in Module::ORDER {
            if !module.applies(config) {
                log::debug!("Skipping {}", module);
                skipped.push(module);
                continue;
            }

            reporter.step(&format!("Adding {}...", module));
            let mut step = StepContext {
                config,
                workspace: &mut workspace,
                template: &mut template,
                runner: &mut self.runner,
            };
            module
                .apply(&mut step)
                .await
                .map_err(|source| ScaffoldError::Module { module, source })?;
            applied.push(module);
        }

        reporter.step("Organizing files...");
        materialize(&mut workspace, &template).await?;

        let format = config
            .package_manager()
            .run_script(workspace.root(), TEMPLATE_FORMAT_SCRIPT);
        if !self.runner.execute(&format).await {
            reporter.warn(&Degradation::Formatter.to_string());
            degraded.push(Degradation::Formatter);
        }

        let mut report = ScaffoldReport {
            project_dir: workspace.root().to_path_buf(),
            applied,
            skipped,
            files: workspace.written().to_vec(),
            degraded,
            next_steps: self
                .product
                .next_steps(config.project_name(), config.package_manager()),
            support_url: self.product.support_url().to_string(),
        };
        reporter.finish(&report);

        if config.open_editor_afterward() {
            if let Err(degradation) = self.open_editor(workspace.root()).await {
                reporter.warn(&degradation.to_string());
                report.degraded.push(degradation);
            }
        }

        Ok(report)
    }

    async fn open_editor(&mut self, root: &Path) -> Result<(), Degradation> {
        let editor = ShellCommand::new(self.product.editor_command())
            .arg(".")
            .current_dir(root);
        if self.runner.execute(&editor).await {
            return Ok(());
        }

        log::debug!("`{}` failed, opening the folder instead", editor);
        (self.open_folder)(root).map_err(|e| Degradation::Editor(e.to_string()))
    }
}

/// Write the buffers to their files, replacing whatever is there
async fn materialize(workspace: &mut Workspace, template: &TemplateContext) -> Result<(), ScaffoldError> {
    let server = template
        .server_source()
        .ok_or(TemplateError::MissingServerEntry)?;

    workspace
        .write_file(workspace::ENV_FILE, template.env_source())
        .await?;
    workspace
        .write_file(workspace::APP_ENTRY, template.app_source())
        .await?;
    workspace
        .write_file(workspace::SERVER_ENTRY, server)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::tests::TestProduct;
    use crate::scaffold::ExitStatus;
    use crate::template::{sources, Token};
    use crate::testing::{config_with, FakeRunner, RecordingReporter};
    use std::collections::BTreeMap;

    const CLONE: &str = "git clone --depth 1 https://example.com/starter.git api";

    fn scaffolder(base: &Path, runner: FakeRunner) -> Scaffolder<TestProduct, FakeRunner> {
        Scaffolder::from_product(TestProduct, runner, base)
            .unwrap()
            .with_folder_opener(|_| Err(io::Error::new(io::ErrorKind::Other, "no opener")))
    }

    fn read(base: &Path, relative: &str) -> String {
        std::fs::read_to_string(base.join("api").join(relative)).unwrap()
    }

    /// Every file under the project, keyed by relative path
    fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
        walkdir::WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                let relative = entry
                    .path()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");
                (relative, std::fs::read(entry.path()).unwrap())
            })
            .collect()
    }

    #[tokio::test]
    async fn test_minimal_run() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|_| {});
        let mut scaffolder = scaffolder(base.path(), FakeRunner::new());
        let mut reporter = RecordingReporter::default();

        let report = scaffolder.run(&config, &mut reporter).await.unwrap();

        assert_eq!(
            scaffolder.runner().lines(),
            vec![CLONE, "npm install", "npm run prettier:fix"]
        );
        assert_eq!(scaffolder.runner().executed[0].get_current_dir(), Some(base.path()));
        assert_eq!(report.applied, vec![Module::EntryPoint]);
        assert_eq!(report.skipped.len(), 5);
        assert_eq!(
            report.files,
            vec![
                PathBuf::from(".env"),
                PathBuf::from("src/app.ts"),
                PathBuf::from("src/server.ts"),
            ]
        );
        assert!(!base.path().join("api/.git").exists());
        assert_eq!(read(base.path(), "src/server.ts"), sources::SERVER_SOURCE);
        assert!(reporter.finished);
        assert!(reporter.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_cors_origins_are_materialized_once() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|a| {
            a.cors_origins = Some(vec!["a.com".to_string(), "b.com".to_string()])
        });
        let mut scaffolder = scaffolder(base.path(), FakeRunner::new());

        scaffolder
            .run(&config, &mut RecordingReporter::default())
            .await
            .unwrap();

        let app = read(base.path(), "src/app.ts");
        let env = read(base.path(), ".env");
        assert_eq!(app.matches(sources::CORS_MIDDLEWARE).count(), 1);
        assert!(!app.contains(Token::CorsMiddleware.literal()));
        assert_eq!(env.matches("CORS_ORIGIN=a.com,b.com").count(), 1);
        assert!(!env.contains(Token::CorsEnv.literal()));
        assert!(scaffolder
            .runner()
            .lines()
            .contains(&"npm install cors".to_string()));
    }

    #[tokio::test]
    async fn test_tokens_stay_without_cors() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|_| {});
        let mut scaffolder = scaffolder(base.path(), FakeRunner::new());

        scaffolder
            .run(&config, &mut RecordingReporter::default())
            .await
            .unwrap();

        assert_eq!(read(base.path(), "src/app.ts"), sources::APP_SOURCE);
        assert_eq!(read(base.path(), ".env"), sources::ENV_SOURCE);
        assert!(read(base.path(), "src/app.ts").contains("/*CORSCONFIG*/"));
        assert!(read(base.path(), ".env").contains("#CORS_CONFIG"));
    }

    #[tokio::test]
    async fn test_checkout_failure_stops_everything() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|a| a.use_container = Some(true));
        let mut scaffolder = scaffolder(base.path(), FakeRunner::new().failing_on(CLONE));

        let result = scaffolder
            .run(&config, &mut RecordingReporter::default())
            .await;

        assert!(matches!(result, Err(ScaffoldError::Checkout { .. })));
        assert_eq!(ExitStatus::from(&result), ExitStatus::Failure);
        assert_eq!(scaffolder.runner().lines(), vec![CLONE]);
    }

    #[tokio::test]
    async fn test_install_failure_prevents_modules() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|a| {
            a.use_container = Some(true);
            a.extra_libraries = Some(vec!["zod".to_string()]);
        });
        let mut scaffolder =
            scaffolder(base.path(), FakeRunner::new().failing_on("npm install"));
        let mut reporter = RecordingReporter::default();

        let result = scaffolder.run(&config, &mut reporter).await;

        assert!(matches!(result, Err(ScaffoldError::Install { .. })));
        assert_eq!(ExitStatus::from(&result).code(), 1);
        assert_eq!(scaffolder.runner().lines(), vec![CLONE, "npm install"]);
        assert!(!base.path().join("api/dockerfile").exists());
        assert!(!base.path().join("api/.env").exists());
        assert!(!reporter.finished);
    }

    #[tokio::test]
    async fn test_git_metadata_failure_is_not_fatal() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|a| a.use_container = Some(true));
        let mut scaffolder = scaffolder(base.path(), FakeRunner::new())
            .with_git_metadata_remover(|_| {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
            });
        let mut reporter = RecordingReporter::default();

        let result = scaffolder.run(&config, &mut reporter).await;

        assert_eq!(ExitStatus::from(&result), ExitStatus::Success);
        let report = result.unwrap();
        assert_eq!(report.applied, vec![Module::Container, Module::EntryPoint]);
        assert_eq!(
            report.degraded,
            vec![Degradation::GitMetadata("locked".to_string())]
        );
        assert_eq!(reporter.warnings.len(), 1);
        assert!(base.path().join("api/dockerfile").exists());
    }

    #[tokio::test]
    async fn test_container_document_database_and_libraries() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|a| {
            a.use_container = Some(true);
            a.use_document_database = Some(true);
            a.extra_libraries = Some(vec!["zod".to_string()]);
        });
        let mut scaffolder = scaffolder(base.path(), FakeRunner::new());

        let report = scaffolder
            .run(&config, &mut RecordingReporter::default())
            .await
            .unwrap();

        let root = base.path().join("api");
        for file in ["dockerfile", ".dockerignore", "docker-compose.yml"] {
            assert!(root.join(file).is_file(), "{} missing", file);
        }
        assert!(root.join("src/database").is_dir());
        assert!(root.join("src/models").is_dir());
        assert_eq!(
            read(base.path(), "src/server.ts"),
            sources::SERVER_SOURCE_DOCUMENT_DATABASE
        );

        let libraries: Vec<&ShellCommand> = scaffolder
            .runner()
            .executed
            .iter()
            .filter(|c| c.get_args().last().map(String::as_str) == Some("zod"))
            .collect();
        assert_eq!(libraries.len(), 1);
        assert_eq!(libraries[0].get_args(), &["install".to_string(), "zod".to_string()]);

        assert_eq!(
            report.applied,
            vec![
                Module::Container,
                Module::DocumentDatabase,
                Module::EntryPoint,
                Module::ExtraLibraries,
            ]
        );
    }

    #[tokio::test]
    async fn test_orm_commands_run_in_order() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|a| {
            a.use_orm = Some(true);
            a.orm_database = Some(crate::config::OrmDatabase::Postgresql);
            a.package_manager = Some(crate::config::PackageManager::Yarn);
        });
        let mut scaffolder = scaffolder(base.path(), FakeRunner::new());

        scaffolder
            .run(&config, &mut RecordingReporter::default())
            .await
            .unwrap();

        assert_eq!(
            scaffolder.runner().lines(),
            vec![
                CLONE,
                "yarn",
                "yarn add @prisma/client",
                "yarn add -D prisma",
                "yarn prisma init --datasource-provider postgresql",
                "yarn prettier:fix",
            ]
        );
        assert!(base.path().join("api/src/database/prismaClient.ts").is_file());
        assert_eq!(read(base.path(), "src/server.ts"), sources::SERVER_SOURCE);
    }

    #[tokio::test]
    async fn test_module_failure_skips_materialization() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|a| {
            a.use_container = Some(true);
            a.cors_origins = Some(vec!["a.com".to_string()]);
        });
        let mut scaffolder =
            scaffolder(base.path(), FakeRunner::new().failing_on("npm install cors"));

        let result = scaffolder
            .run(&config, &mut RecordingReporter::default())
            .await;

        match result {
            Err(ScaffoldError::Module { module, .. }) => assert_eq!(module, Module::CrossOrigin),
            other => panic!("unexpected result: {:?}", other),
        }
        // earlier modules are left in place
        assert!(base.path().join("api/dockerfile").exists());
        assert!(!base.path().join("api/.env").exists());
        assert!(!scaffolder
            .runner()
            .lines()
            .contains(&"npm run prettier:fix".to_string()));
    }

    #[tokio::test]
    async fn test_formatter_failure_degrades() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|_| {});
        let mut scaffolder = scaffolder(
            base.path(),
            FakeRunner::new().failing_on("npm run prettier:fix"),
        );

        let report = scaffolder
            .run(&config, &mut RecordingReporter::default())
            .await
            .unwrap();

        assert_eq!(report.degraded, vec![Degradation::Formatter]);
    }

    #[tokio::test]
    async fn test_editor_runs_in_workspace() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|a| a.open_editor_afterward = Some(true));
        let mut scaffolder = scaffolder(base.path(), FakeRunner::new());

        let report = scaffolder
            .run(&config, &mut RecordingReporter::default())
            .await
            .unwrap();

        let editor = scaffolder.runner().executed.last().unwrap().clone();
        assert_eq!(editor.command_line(), "code .");
        assert_eq!(editor.get_current_dir(), Some(base.path().join("api").as_path()));
        assert!(!report.is_degraded());
    }

    #[tokio::test]
    async fn test_editor_failure_degrades_after_fallback() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|a| a.open_editor_afterward = Some(true));
        let mut scaffolder = scaffolder(base.path(), FakeRunner::new().failing_on("code ."));

        let result = scaffolder
            .run(&config, &mut RecordingReporter::default())
            .await;

        assert_eq!(ExitStatus::from(&result), ExitStatus::Success);
        assert_eq!(
            result.unwrap().degraded,
            vec![Degradation::Editor("no opener".to_string())]
        );
    }

    #[tokio::test]
    async fn test_same_configuration_generates_identical_files() {
        let config = config_with(|a| {
            a.use_container = Some(true);
            a.use_document_database = Some(true);
            a.extra_libraries = Some(vec!["zod".to_string(), "axios".to_string()]);
            a.cors_origins = Some(vec!["a.com b.com".to_string()]);
        });

        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        for base in [&first, &second] {
            scaffolder(base.path(), FakeRunner::new())
                .run(&config, &mut RecordingReporter::default())
                .await
                .unwrap();
        }

        let a = snapshot(&first.path().join("api"));
        let b = snapshot(&second.path().join("api"));
        assert!(a.contains_key("src/models/example.ts"));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_rerun_into_existing_workspace_fails() {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|a| a.use_document_database = Some(true));

        scaffolder(base.path(), FakeRunner::new())
            .run(&config, &mut RecordingReporter::default())
            .await
            .unwrap();
        let second = scaffolder(base.path(), FakeRunner::new())
            .run(&config, &mut RecordingReporter::default())
            .await;

        assert!(matches!(second, Err(ScaffoldError::Checkout { .. })));
        assert!(base.path().join("api/src/models/example.ts").exists());
    }
}
