//! MongoDB through Mongoose

use super::{StepContext, StepError};
use crate::runtime::CommandRunner;
use crate::template::sources;

pub const DRIVER_PACKAGE: &str = "mongoose";
pub const DATABASE_DIR: &str = "src/database";
pub const MODELS_DIR: &str = "src/models";
pub const CONNECTION_FILE: &str = "src/database/connection_mongodb.ts";
pub const EXAMPLE_MODEL_FILE: &str = "src/models/example.ts";

pub(super) async fn apply<R: CommandRunner>(step: &mut StepContext<'_, R>) -> Result<(), StepError> {
    let install = step
        .config
        .package_manager()
        .add(step.workspace.root(), [DRIVER_PACKAGE]);
    step.run_fatal(install).await?;

    step.workspace.create_dir(DATABASE_DIR).await?;
    step.workspace.create_dir(MODELS_DIR).await?;

    step.workspace
        .write_file(CONNECTION_FILE, sources::MONGO_CONNECTION)
        .await?;
    step.workspace
        .write_file(EXAMPLE_MODEL_FILE, sources::MONGO_EXAMPLE_MODEL)
        .await?;
    Ok(())
}
