//! The `render` management command.
//!
//! Prints the HTML of a freshly created form, optionally wrapped in a page
//! with a heading (`--page`).

use async_trait::async_trait;
use formkit_core::{FormkitError, Settings};
use formkit_forms::{FormRenderer, RenderOptions, Schema};

use crate::command::ManagementCommand;
use crate::commands::{emit, resolve_schema, schema_arg};

/// Renders a schema's initial form as HTML.
pub struct RenderCommand;

/// Renders `schema` in its initial state with the presentation settings.
pub fn render_form(schema: Schema, settings: &Settings, page: bool) -> String {
    let form = FormRenderer::with_options(schema, RenderOptions::from_settings(settings));
    if page {
        form.render_page()
    } else {
        form.render()
    }
}

#[async_trait]
impl ManagementCommand for RenderCommand {
    fn name(&self) -> &'static str {
        "render"
    }

    fn help(&self) -> &'static str {
        "Print the HTML of the form in its initial state"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(schema_arg()).arg(
            clap::Arg::new("page")
                .long("page")
                .action(clap::ArgAction::SetTrue)
                .help("Wrap the form in a page with the configured heading"),
        )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), FormkitError> {
        let schema = resolve_schema(matches, settings)?;
        emit(&render_form(schema, settings, matches.get_flag("page")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_forms::example_schema;

    #[test]
    fn test_render_form_uses_settings() {
        let settings = Settings {
            submit_label: "Go".to_string(),
            form_id: "demo".to_string(),
            ..Settings::default()
        };
        let html = render_form(example_schema(), &settings, false);
        assert!(html.starts_with(r#"<form id="demo">"#));
        assert!(html.contains(r#"<button type="submit">Go</button>"#));
        assert!(html.contains(r#"<p class="result"></p>"#));
    }

    #[test]
    fn test_render_page_uses_heading_setting() {
        let settings = Settings {
            page_heading: "Sign up".to_string(),
            ..Settings::default()
        };
        let page = render_form(example_schema(), &settings, true);
        assert!(page.starts_with("<div>\n<h1>Sign up</h1>\n<form"));
        assert!(page.ends_with("</div>"));
        assert!(!render_form(example_schema(), &settings, false).contains("<h1>"));
    }
}
