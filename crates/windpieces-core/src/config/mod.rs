//! User choices for a scaffold run
//!
//! A [`Configuration`] is built exactly once, either by the interactive
//! prompter or from raw [`Answers`] (answers file, CLI flags), and is read-only
//! afterwards. Every module precondition is a pure function of it.

pub(crate) mod answers;

pub use answers::Answers;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while turning raw answers into a [`Configuration`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Project name is required")]
    MissingProjectName,

    #[error("Invalid project name '{0}': it must be a single directory name not starting with '-'")]
    InvalidProjectName(String),

    #[error("MongoDB (Mongoose) and Prisma cannot be selected together")]
    ConflictingDatabases,

    #[error("Prisma was selected without a database")]
    MissingOrmDatabase,

    #[error("A Prisma database was given but Prisma was not selected")]
    OrmDatabaseWithoutOrm,

    #[error("Unknown package manager '{0}' (expected npm, yarn or pnpm)")]
    UnknownPackageManager(String),

    #[error("Unknown database '{0}' (expected postgresql, mysql, mongodb or sqlite)")]
    UnknownOrmDatabase(String),
}

/// Package manager used for every install and script invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] = [PackageManager::Npm, PackageManager::Yarn, PackageManager::Pnpm];

    /// Name of the executable
    pub fn binary(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.binary())
    }
}

impl FromStr for PackageManager {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            "pnpm" => Ok(PackageManager::Pnpm),
            other => Err(ConfigError::UnknownPackageManager(other.to_string())),
        }
    }
}

/// Database provider handed to `prisma init`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrmDatabase {
    #[default]
    Postgresql,
    Mysql,
    Mongodb,
    Sqlite,
}

impl OrmDatabase {
    pub const ALL: [OrmDatabase; 4] = [
        OrmDatabase::Postgresql,
        OrmDatabase::Mysql,
        OrmDatabase::Mongodb,
        OrmDatabase::Sqlite,
    ];

    /// Value for `--datasource-provider`
    pub fn provider(&self) -> &'static str {
        match self {
            OrmDatabase::Postgresql => "postgresql",
            OrmDatabase::Mysql => "mysql",
            OrmDatabase::Mongodb => "mongodb",
            OrmDatabase::Sqlite => "sqlite",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrmDatabase::Postgresql => "PostgreSQL",
            OrmDatabase::Mysql => "MySQL",
            OrmDatabase::Mongodb => "MongoDB",
            OrmDatabase::Sqlite => "SQLite",
        }
    }
}

impl fmt::Display for OrmDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for OrmDatabase {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrmDatabase::ALL
            .into_iter()
            .find(|db| db.provider().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownOrmDatabase(s.trim().to_string()))
    }
}

/// The validated, immutable set of choices for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    project_name: String,
    package_manager: PackageManager,
    use_container: bool,
    use_document_database: bool,
    orm_database: Option<OrmDatabase>,
    extra_libraries: Option<BTreeSet<String>>,
    cors_origins: Option<Vec<String>>,
    open_editor_afterward: bool,
}

impl Configuration {
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    pub fn use_container(&self) -> bool {
        self.use_container
    }

    pub fn use_document_database(&self) -> bool {
        self.use_document_database
    }

    pub fn use_orm(&self) -> bool {
        self.orm_database.is_some()
    }

    /// Database for the ORM; present if and only if the ORM is selected
    pub fn orm_database(&self) -> Option<OrmDatabase> {
        self.orm_database
    }

    /// Extra libraries, never an empty set
    pub fn extra_libraries(&self) -> Option<&BTreeSet<String>> {
        self.extra_libraries.as_ref()
    }

    /// Allowed origins in input order, never empty
    pub fn cors_origins(&self) -> Option<&[String]> {
        self.cors_origins.as_deref()
    }

    pub fn open_editor_afterward(&self) -> bool {
        self.open_editor_afterward
    }
}

impl TryFrom<Answers> for Configuration {
    type Error = ConfigError;

    fn try_from(answers: Answers) -> Result<Self, Self::Error> {
        let project_name = validate_project_name(answers.project_name.as_deref())?;

        let use_document_database = answers.use_document_database.unwrap_or(false);
        let use_orm = answers.use_orm.unwrap_or(false);

        if use_document_database && use_orm {
            return Err(ConfigError::ConflictingDatabases);
        }

        let orm_database = match (use_orm, answers.orm_database) {
            (true, Some(db)) => Some(db),
            (true, None) => return Err(ConfigError::MissingOrmDatabase),
            (false, Some(_)) => return Err(ConfigError::OrmDatabaseWithoutOrm),
            (false, None) => None,
        };

        let extra_libraries: BTreeSet<String> = answers
            .extra_libraries
            .unwrap_or_default()
            .iter()
            .flat_map(|entry| entry.split_whitespace())
            .map(str::to_string)
            .collect();

        let cors_origins: Vec<String> = answers
            .cors_origins
            .unwrap_or_default()
            .iter()
            .flat_map(|entry| entry.split_whitespace())
            .map(str::to_string)
            .collect();

        Ok(Configuration {
            project_name,
            package_manager: answers.package_manager.unwrap_or_default(),
            use_container: answers.use_container.unwrap_or(false),
            use_document_database,
            orm_database,
            extra_libraries: (!extra_libraries.is_empty()).then_some(extra_libraries),
            cors_origins: (!cors_origins.is_empty()).then_some(cors_origins),
            open_editor_afterward: answers.open_editor_afterward.unwrap_or(false),
        })
    }
}

/// Check a project name can be used as a single directory under the base directory
pub fn validate_project_name(name: Option<&str>) -> Result<String, ConfigError> {
    let name = name.map(str::trim).unwrap_or_default();

    if name.is_empty() {
        return Err(ConfigError::MissingProjectName);
    }

    // A leading dash would reach `git clone` as an option
    if name == "." || name == ".." || name.starts_with('-') || name.contains(['/', '\\']) {
        return Err(ConfigError::InvalidProjectName(name.to_string()));
    }

    Ok(name.to_string())
}
