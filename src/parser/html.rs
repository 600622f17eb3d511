use scraper::{Html, Selector};

/// The parts of a fetched page the metadata extractor reads.
pub struct PageDocument {
    pub text: String,
    pub og_description: Option<String>,
}

impl PageDocument {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        PageDocument {
            text: document.root_element().text().collect::<String>(),
            og_description: og_description(&document),
        }
    }
}

fn og_description(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"meta[property="og:description"]"#).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
}
