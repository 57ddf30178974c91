//! Docker support

use super::{StepContext, StepError};
use crate::template::sources;

pub const DOCKERFILE: &str = "dockerfile";
pub const DOCKERIGNORE: &str = ".dockerignore";
pub const COMPOSE_FILE: &str = "docker-compose.yml";

pub(super) async fn apply<R>(step: &mut StepContext<'_, R>) -> Result<(), StepError> {
    step.workspace.write_file(DOCKERFILE, sources::DOCKERFILE).await?;
    step.workspace.write_file(DOCKERIGNORE, sources::DOCKERIGNORE).await?;
    step.workspace.write_file(COMPOSE_FILE, sources::DOCKER_COMPOSE).await?;
    Ok(())
}
