use pulldown_cmark::{html, Options, Parser};
use quick_xml::escape::escape;

pub trait NotesRenderer: Send + Sync {
    fn to_html(&self, markdown: &str) -> String;
}

/// CommonMark plus the GitHub extensions release notes tend to use.
#[derive(Debug, Default, Clone, Copy)]
pub struct PulldownNotesRenderer;

impl NotesRenderer for PulldownNotesRenderer {
    fn to_html(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let parser = Parser::new_ext(markdown, options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

const NOTES_STYLE: &str = "    body {
      font-family: -apple-system, BlinkMacSystemFont, \"Helvetica Neue\", Helvetica, Arial, sans-serif;
      font-size: 13px;
      line-height: 1.5;
      color: #1d1d1f;
      margin: 16px 20px;
    }
    h1 { font-size: 18px; margin: 0 0 12px; }
    h2 { font-size: 15px; margin: 16px 0 6px; }
    h3 { font-size: 13px; margin: 12px 0 4px; }
    ul, ol { padding-left: 20px; }
    code { font-family: Menlo, monospace; background: #f2f2f2; padding: 0 3px; border-radius: 3px; }
    a { color: #0066cc; }
    @media (prefers-color-scheme: dark) {
      body { color: #f5f5f7; background: #1e1e1e; }
      code { background: #333; }
      a { color: #4da3ff; }
    }";

/// Standalone release notes page: fixed stylesheet, a `Version <version>` heading,
/// then the rendered Markdown.
pub fn render_notes_document(
    renderer: &dyn NotesRenderer,
    markdown: &str,
    version: &str,
) -> String {
    let body = renderer.to_html(markdown);
    let version = escape(version);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         \x20 <meta charset=\"utf-8\">\n\
         \x20 <title>Version {version}</title>\n\
         \x20 <style>\n{NOTES_STYLE}\n  </style>\n\
         </head>\n\
         <body>\n\
         \x20 <h1>Version {version}</h1>\n\
         {body}\
         </body>\n\
         </html>\n"
    )
}
