//! Prisma toolchain

use super::{StepContext, StepError};
use crate::runtime::CommandRunner;
use crate::template::sources;

pub const CLIENT_PACKAGE: &str = "@prisma/client";
pub const CLI_PACKAGE: &str = "prisma";
pub const DATABASE_DIR: &str = "src/database";
pub const CLIENT_FILE: &str = "src/database/prismaClient.ts";

pub(super) async fn apply<R: CommandRunner>(step: &mut StepContext<'_, R>) -> Result<(), StepError> {
    let Some(database) = step.config.orm_database() else {
        return Ok(());
    };
    let package_manager = step.config.package_manager();
    let root = step.workspace.root().to_path_buf();

    step.run_fatal(package_manager.add(&root, [CLIENT_PACKAGE])).await?;
    step.run_fatal(package_manager.add_dev(&root, [CLI_PACKAGE])).await?;

    let init = package_manager.exec(
        &root,
        CLI_PACKAGE,
        ["init", "--datasource-provider", database.provider()],
    );
    step.run_fatal(init).await?;

    step.workspace.create_dir(DATABASE_DIR).await?;
    step.workspace
        .write_file(CLIENT_FILE, sources::PRISMA_CLIENT)
        .await?;
    Ok(())
}
