use std::path::{Path, PathBuf};

use handlebars::Handlebars;

use crate::params::TemplateParams;

const TEMPLATE_NAME: &str = "dockerfile";

/// Renders a Dockerfile template file with `{{NAME}}` placeholders.
///
/// Output is not HTML-escaped. Strict mode is on, so a placeholder with no
/// matching parameter is an error rather than an empty string.
pub fn render_file(path: &Path, params: &TemplateParams) -> Result<String, TemplateError> {
    let source = std::fs::read_to_string(path).map_err(|e| TemplateError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    render_str(&source, params).map_err(|e| e.at(path))
}

/// Renders template text; errors carry an empty path until [`render_file`]
/// attaches one.
pub fn render_str(source: &str, params: &TemplateParams) -> Result<String, TemplateError> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(handlebars::no_escape);

    registry
        .register_template_string(TEMPLATE_NAME, source)
        .map_err(|e| TemplateError::Parse {
            path: PathBuf::new(),
            source: Box::new(e),
        })?;

    registry
        .render(TEMPLATE_NAME, params)
        .map_err(|e| TemplateError::Render {
            path: PathBuf::new(),
            source: Box::new(e),
        })
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to read template {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse template {path}")]
    Parse {
        path: PathBuf,
        source: Box<handlebars::TemplateError>,
    },
    #[error("failed to render template {path}")]
    Render {
        path: PathBuf,
        source: Box<handlebars::RenderError>,
    },
}

impl TemplateError {
    fn at(self, at: &Path) -> Self {
        match self {
            Self::Read { source, .. } => Self::Read {
                path: at.to_path_buf(),
                source,
            },
            Self::Parse { source, .. } => Self::Parse {
                path: at.to_path_buf(),
                source,
            },
            Self::Render { source, .. } => Self::Render {
                path: at.to_path_buf(),
                source,
            },
        }
    }
}
