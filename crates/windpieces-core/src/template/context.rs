//! In-memory buffers for files that several modules contribute to

use super::sources;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Errors raised when a buffer does not look the way its owner expects
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Placeholder {token} is missing from the {buffer} buffer")]
    MissingToken { token: Token, buffer: Buffer },

    #[error("No server entry point was selected")]
    MissingServerEntry,
}

/// Which buffer a token lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Buffer {
    App,
    Env,
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Buffer::App => write!(f, "app"),
            Buffer::Env => write!(f, "env"),
        }
    }
}

/// Placeholder tokens a module may replace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Cross-origin middleware in `src/app.ts`
    CorsMiddleware,
    /// `CORS_ORIGIN` assignment in `.env`
    CorsEnv,
}

impl Token {
    pub const ALL: [Token; 2] = [Token::CorsMiddleware, Token::CorsEnv];

    /// Literal text of the placeholder
    pub fn literal(&self) -> &'static str {
        match self {
            Token::CorsMiddleware => "/*CORSCONFIG*/",
            Token::CorsEnv => "#CORS_CONFIG",
        }
    }

    pub fn buffer(&self) -> Buffer {
        match self {
            Token::CorsMiddleware => Buffer::App,
            Token::CorsEnv => Buffer::Env,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal())
    }
}

/// Outcome of [`TemplateContext::substitute`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    Replaced,
    /// The token had already been replaced; nothing changed
    AlreadyApplied,
}

/// Text of `src/app.ts`, `.env` and `src/server.ts` while modules run.
///
/// Nothing here touches the disk. The orchestrator writes the buffers once,
/// after every module step has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    app_source: String,
    env_source: String,
    server_source: Option<String>,
    replaced: HashSet<Token>,
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::new(sources::APP_SOURCE, sources::ENV_SOURCE)
    }
}

impl TemplateContext {
    pub fn new(app_source: impl Into<String>, env_source: impl Into<String>) -> Self {
        Self {
            app_source: app_source.into(),
            env_source: env_source.into(),
            server_source: None,
            replaced: HashSet::new(),
        }
    }

    pub fn app_source(&self) -> &str {
        &self.app_source
    }

    pub fn env_source(&self) -> &str {
        &self.env_source
    }

    pub fn server_source(&self) -> Option<&str> {
        self.server_source.as_deref()
    }

    pub fn set_server_source(&mut self, source: impl Into<String>) {
        self.server_source = Some(source.into());
    }

    /// Whether the placeholder is still present in its buffer
    pub fn contains(&self, token: Token) -> bool {
        self.buffer(token.buffer()).contains(token.literal())
    }

    /// Replace the first occurrence of `token` with `fragment`.
    ///
    /// A token this context already replaced is a no-op. A token that was never
    /// present is an error.
    pub fn substitute(&mut self, token: Token, fragment: &str) -> Result<Substitution, TemplateError> {
        if self.replaced.contains(&token) {
            return Ok(Substitution::AlreadyApplied);
        }

        let buffer = match token.buffer() {
            Buffer::App => &mut self.app_source,
            Buffer::Env => &mut self.env_source,
        };

        if !buffer.contains(token.literal()) {
            return Err(TemplateError::MissingToken {
                token,
                buffer: token.buffer(),
            });
        }

        *buffer = buffer.replacen(token.literal(), fragment, 1);
        self.replaced.insert(token);
        Ok(Substitution::Replaced)
    }

    fn buffer(&self, buffer: Buffer) -> &str {
        match buffer {
            Buffer::App => &self.app_source,
            Buffer::Env => &self.env_source,
        }
    }
}
