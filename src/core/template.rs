use crate::domain::model::PageContext;
use crate::utils::error::Result;
use tera::{Context, Tera};

/// A single page template loaded from its source text.
///
/// Autoescaping follows the template name: `*.html` escapes `title` and
/// `date`, so fragments in `pages` must be emitted with `| safe`.
pub struct TemplateRenderer {
    tera: Tera,
    name: String,
}

impl TemplateRenderer {
    pub fn from_source(name: &str, source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(name, source)?;
        tracing::debug!("Loaded template {}", name);

        Ok(Self {
            tera,
            name: name.to_string(),
        })
    }

    pub fn render(&self, page: &PageContext) -> Result<String> {
        let context = Context::from_serialize(page)?;
        Ok(self.tera.render(&self.name, &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PdfError;

    const TEMPLATE: &str = r#"<title>{{ title }}</title><p>{{ date }}</p>{% for page in pages %}<section>{{ page | safe }}</section>{% endfor %}"#;

    fn context(pages: &[&str]) -> PageContext {
        PageContext {
            title: "pdf-2024-03.pdf".to_string(),
            date: "2024-03".to_string(),
            pages: pages.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_pages_rendered_in_order() {
        let renderer = TemplateRenderer::from_source("pdf.html", TEMPLATE).unwrap();
        let html = renderer
            .render(&context(&["<h1>One</h1>", "<h1>Two</h1>"]))
            .unwrap();

        assert_eq!(
            html,
            "<title>pdf-2024-03.pdf</title><p>2024-03</p>\
             <section><h1>One</h1></section><section><h1>Two</h1></section>"
        );
    }

    #[test]
    fn test_title_is_escaped() {
        let renderer = TemplateRenderer::from_source("pdf.html", TEMPLATE).unwrap();
        let mut page = context(&[]);
        page.title = "a<b".to_string();

        let html = renderer.render(&page).unwrap();
        assert!(html.contains("<title>a&lt;b</title>"));
    }

    #[test]
    fn test_syntax_error() {
        let result = TemplateRenderer::from_source("pdf.html", "{% for page in pages %}");
        assert!(matches!(result, Err(PdfError::TemplateError(_))));
    }

    #[test]
    fn test_unknown_variable_fails() {
        let renderer = TemplateRenderer::from_source("pdf.html", "{{ author }}").unwrap();
        assert!(renderer.render(&context(&[])).is_err());
    }
}
