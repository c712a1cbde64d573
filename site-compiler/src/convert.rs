use interfaces::defs::MarkdownConverter;
use pulldown_cmark::{html, Options, Parser};

/// CommonMark with the usual extensions. Inline HTML is passed through.
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownConverter;

impl PulldownConverter {
    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
    }
}

impl MarkdownConverter for PulldownConverter {
    fn convert(&self, markdown: &str) -> anyhow::Result<String> {
        let parser = Parser::new_ext(markdown, Self::options());
        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        Ok(output)
    }
}
