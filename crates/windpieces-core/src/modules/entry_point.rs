//! Server entry point selection

use super::{StepContext, StepError};
use crate::template::sources;

pub(super) fn apply<R>(step: &mut StepContext<'_, R>) -> Result<(), StepError> {
    let source = if step.config.use_document_database() {
        sources::SERVER_SOURCE_DOCUMENT_DATABASE
    } else {
        sources::SERVER_SOURCE
    };
    step.template.set_server_source(source);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateContext;
    use crate::testing::{checked_out_workspace, config_with, FakeRunner};

    fn selected(use_document_database: bool) -> String {
        let base = tempfile::tempdir().unwrap();
        let config = config_with(|a| a.use_document_database = Some(use_document_database));
        let mut workspace = checked_out_workspace(base.path());
        let mut template = TemplateContext::default();
        let mut runner = FakeRunner::new();

        let mut step = StepContext {
            config: &config,
            workspace: &mut workspace,
            template: &mut template,
            runner: &mut runner,
        };
        apply(&mut step).unwrap();

        assert!(workspace.written().is_empty());
        template.server_source().unwrap().to_string()
    }

    #[test]
    fn test_document_database_server_connects_first() {
        let server = selected(true);
        assert_eq!(server, sources::SERVER_SOURCE_DOCUMENT_DATABASE);
        assert!(server.contains("await ConnectionMongoDB()"));
    }

    #[test]
    fn test_plain_server_without_document_database() {
        let server = selected(false);
        assert_eq!(server, sources::SERVER_SOURCE);
        assert!(!server.contains("mongodb"));
    }
}
