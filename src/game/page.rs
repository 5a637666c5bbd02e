//! Start page scraping.

use scraper::{Html, Selector};

use crate::error::AkinatorError;
use crate::Result;

const QUESTION_SELECTOR: &str = "#question-label";
const SESSION_SELECTOR: &str = r#"form#askSoundlike input[name="session"]"#;
const SIGNATURE_SELECTOR: &str = r#"form#askSoundlike input[name="signature"]"#;

/// What a new game's HTML page hands out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartPage {
    pub question: String,
    pub session: String,
    pub signature: String,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| AkinatorError::Protocol(format!("bad selector {}: {}", css, e)))
}

fn input_value(document: &Html, css: &str, name: &str) -> Result<String> {
    document
        .select(&selector(css)?)
        .next()
        .map(|input| input.value().attr("value").unwrap_or_default().to_string())
        .ok_or_else(|| AkinatorError::Protocol(format!("start page has no {} field", name)))
}

/// Extract the first question and both tokens from the start page.
///
/// Fails if the question element or either token input is missing. Inputs
/// that exist with an empty value are returned as-is; the engine rejects them.
pub fn parse_start_page(html: &str) -> Result<StartPage> {
    let document = Html::parse_document(html);

    let question = document
        .select(&selector(QUESTION_SELECTOR)?)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .ok_or_else(|| AkinatorError::Protocol("start page has no question".into()))?;

    Ok(StartPage {
        question,
        session: input_value(&document, SESSION_SELECTOR, "session")?,
        signature: input_value(&document, SIGNATURE_SELECTOR, "signature")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_html(question: &str, session: &str, signature: &str) -> String {
        format!(
            r#"<html><body>
            <p id="question-label">
                {question}
            </p>
            <form id="askSoundlike" method="post">
                <input type="hidden" name="session" value="{session}">
                <input type="hidden" name="signature" value="{signature}">
            </form>
            </body></html>"#
        )
    }

    #[test]
    fn test_parse_complete_page() {
        let page = parse_start_page(&start_html("Does your character exist?", "S1", "G1")).unwrap();
        assert_eq!(page.question, "Does your character exist?");
        assert_eq!(page.session, "S1");
        assert_eq!(page.signature, "G1");
    }

    #[test]
    fn test_missing_question() {
        let html = r#"<form id="askSoundlike"><input name="session" value="S1"><input name="signature" value="G1"></form>"#;
        let err = parse_start_page(html).unwrap_err();
        assert!(matches!(err, AkinatorError::Protocol(_)));
    }

    #[test]
    fn test_missing_signature() {
        let html = r#"<p id="question-label">Q</p><form id="askSoundlike"><input name="session" value="S1"></form>"#;
        let err = parse_start_page(html).unwrap_err();
        assert!(err.to_string().contains("signature"));
    }

    #[test]
    fn test_inputs_outside_form_ignored() {
        let html = r#"<p id="question-label">Q</p><input name="session" value="S1"><input name="signature" value="G1">"#;
        assert!(parse_start_page(html).is_err());
    }

    #[test]
    fn test_empty_token_value_is_returned() {
        let page = parse_start_page(&start_html("Q", "", "G1")).unwrap();
        assert_eq!(page.session, "");
    }
}
