//! Template rendering
//!
//! Templates are Jinja style (`minijinja`). The context holds `releases`, the
//! list of [`ReleaseChanges`], and the filters/functions `wrap(width, indent)`
//! and `capitalize`:
//!
//! ```text
//! {% for release in releases %}
//! Changelog for {{ release.version }} ({{ release.date }})
//! {% for entry in release.entries %}
//!  * {{ entry.type_short }} {% if entry.primary_id %}#{{ entry.primary_id }}{% endif %}: {{ entry.title }}
//! {%- endfor %}
//! {% endfor %}
//! ```
//!
//! `primary_id` and `primary_url` are none for an entry without issue or pull
//! request links, and print as the literal text `none`. Guard them with
//! `{% if entry.primary_id %}`.

use std::path::Path;

use calens_core::{CalensError, RenderError, Result};
use minijinja::{context, Environment, UndefinedBehavior};
use tracing::{debug, info, instrument};

use crate::fs::ChangelogFs;
use crate::generator::ReleaseChanges;
use crate::text::{capitalize, wrap_text};

const TEMPLATE_NAME: &str = "changelog";

/// Read the template file at `path`
pub fn load_template(fs: &dyn ChangelogFs, path: &Path) -> Result<String> {
    debug!(path = %path.display(), "loading template");
    fs.read_to_string(path).map_err(|source| {
        RenderError::TemplateRead {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Write rendered output to `path`
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| RenderError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = contents.len(), "changelog written");
    Ok(())
}

/// A compiled changelog template
pub struct TemplateRenderer<'source> {
    env: Environment<'source>,
}

impl<'source> TemplateRenderer<'source> {
    /// Compile `source`, failing on syntax errors
    pub fn new(source: &'source str) -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("wrap", wrap_filter);
        env.add_function("wrap", wrap_filter);
        env.add_filter("capitalize", capitalize_filter);
        env.add_function("capitalize", capitalize_filter);
        env.add_template(TEMPLATE_NAME, source)
            .map_err(template_error)?;
        Ok(Self { env })
    }

    /// Render the changelog for `releases`
    #[instrument(skip(self, releases), fields(release_count = releases.len()))]
    pub fn render(&self, releases: &[ReleaseChanges]) -> Result<String> {
        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(template_error)?;
        let output = template
            .render(context! { releases => releases })
            .map_err(template_error)?;
        debug!(output_len = output.len(), "changelog rendered");
        Ok(output)
    }
}

fn wrap_filter(text: String, width: usize, indent: usize) -> String {
    wrap_text(&text, width, indent)
}

fn capitalize_filter(text: String) -> String {
    capitalize(&text)
}

fn template_error(err: minijinja::Error) -> CalensError {
    RenderError::Template(format!("{err:#}")).into()
}
