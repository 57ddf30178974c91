//! Cross-origin policy

use super::{StepContext, StepError};
use crate::runtime::CommandRunner;
use crate::template::{sources, Token};

pub const CORS_PACKAGE: &str = "cors";

/// Install `cors`, then point both placeholders at `CORS_ORIGIN`
pub(super) async fn apply<R: CommandRunner>(step: &mut StepContext<'_, R>) -> Result<(), StepError> {
    let config = step.config;
    let Some(origins) = config.cors_origins() else {
        return Ok(());
    };

    let install = config
        .package_manager()
        .add(step.workspace.root(), [CORS_PACKAGE]);
    step.run_fatal(install).await?;

    step.template
        .substitute(Token::CorsMiddleware, sources::CORS_MIDDLEWARE)?;
    step.template
        .substitute(Token::CorsEnv, &sources::cors_env_assignment(origins))?;
    Ok(())
}
