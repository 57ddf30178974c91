//! Additional user-chosen dependencies

use super::{StepContext, StepError};
use crate::runtime::CommandRunner;

/// Install every extra library in a single command
pub(super) async fn apply<R: CommandRunner>(step: &mut StepContext<'_, R>) -> Result<(), StepError> {
    let Some(libraries) = step.config.extra_libraries() else {
        return Ok(());
    };
    let install = step
        .config
        .package_manager()
        .add(step.workspace.root(), libraries.iter().cloned());
    step.run_fatal(install).await
}
