//! Email template rendering with Tera

use std::collections::HashMap;
use tera::{Context, Tera};
use tracing::debug;

use crate::InfrastructureError;

/// Renders `{template_id}.html` templates
pub struct EmailTemplates {
    tera: Tera,
}

impl EmailTemplates {
    /// Load every `*.html` file under `template_dir`
    pub fn from_dir(template_dir: &str) -> Result<Self, InfrastructureError> {
        let pattern = format!("{}/**/*.html", template_dir.trim_end_matches('/'));
        let tera = Tera::new(&pattern).map_err(|e| {
            InfrastructureError::Template(format!("Failed to load email templates: {}", e))
        })?;

        debug!(
            template_dir = %template_dir,
            templates = tera.get_template_names().count(),
            "Email templates loaded"
        );

        Ok(Self { tera })
    }

    /// Build from in-memory template sources keyed by template id
    pub fn from_strings(templates: HashMap<String, String>) -> Result<Self, InfrastructureError> {
        let mut tera = Tera::default();

        for (id, content) in templates {
            tera.add_raw_template(&file_name(&id), &content).map_err(|e| {
                InfrastructureError::Template(format!("Failed to add template {}: {}", id, e))
            })?;
        }

        Ok(Self { tera })
    }

    pub fn contains(&self, template_id: &str) -> bool {
        let name = file_name(template_id);
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Render a template with string variables
    pub fn render(
        &self,
        template_id: &str,
        variables: &HashMap<String, String>,
    ) -> Result<String, InfrastructureError> {
        let mut context = Context::new();
        for (key, value) in variables {
            context.insert(key.as_str(), value);
        }

        self.tera.render(&file_name(template_id), &context).map_err(|e| {
            InfrastructureError::Template(format!(
                "Failed to render template {}: {}",
                template_id, e
            ))
        })
    }
}

fn file_name(template_id: &str) -> String {
    format!("{}.html", template_id)
}
