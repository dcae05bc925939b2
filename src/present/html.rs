// src/present/html.rs

use super::Presenter;
use crate::locale::Locale;
use crate::lookup::Outcome;
use crate::prefs::Theme;
use crate::record::{Record, Subject};
use std::fmt::Write as _;
use std::io::{self, Write};
use tracing::{debug, error};

/// Renders each outcome as a standalone HTML page.
pub struct HtmlPresenter<W: Write> {
    out: W,
    locale: Locale,
    theme: Theme,
    max_subtotal: u32,
}

impl<W: Write> HtmlPresenter<W> {
    pub fn new(out: W, locale: Locale, theme: Theme, max_subtotal: u32) -> Self {
        Self {
            out,
            locale,
            theme,
            max_subtotal,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&self, outcome: &Outcome) -> String {
        let body = match outcome {
            Outcome::Success(record) => self.result_panel(record),
            other => self.alert(other),
        };
        let dir = if self.locale.is_rtl() { "rtl" } else { "ltr" };
        let class = match self.theme {
            Theme::Dark => " class=\"dark-theme\"",
            Theme::Light => "",
        };
        format!(
            "<!DOCTYPE html>\n<html lang=\"{}\" dir=\"{}\">\n<head><meta charset=\"utf-8\"></head>\n<body{}>\n{}</body>\n</html>\n",
            self.locale.as_str(),
            dir,
            class,
            body
        )
    }

    fn alert(&self, outcome: &Outcome) -> String {
        let m = self.locale.messages();
        let (kind, message) = match outcome {
            Outcome::ValidationFailed => ("warning", escape(m.enter_seat)),
            Outcome::NotFound(key) => (
                "danger",
                escape(m.not_found).replacen("{}", &format!("<strong>{}</strong>", escape(key)), 1),
            ),
            Outcome::TransportError(e) => (
                "danger",
                escape(m.technical_error).replacen(
                    "{}",
                    &format!("<strong>{}</strong>", escape(&e.reason(m))),
                    1,
                ),
            ),
            Outcome::Success(_) => ("info", String::new()),
        };
        format!(
            "<div id=\"alertMessage\"><div class=\"alert alert-{}\" role=\"alert\">{}</div></div>\n",
            kind, message
        )
    }

    fn result_panel(&self, record: &Record) -> String {
        let m = self.locale.messages();
        let mut html = String::new();
        html.push_str("<div id=\"resultDisplay\">\n<div class=\"student-data-section\">\n");
        for (label, value, class) in [
            (m.name, record.name(), "name"),
            (m.seat, record.seat(), "seat"),
            (m.institution, record.institution(), "institution"),
        ] {
            let _ = writeln!(
                html,
                "<div class=\"info-row {}\"><span>{}</span><strong>{}</strong></div>",
                class,
                escape(label),
                escape(value)
            );
        }

        let _ = writeln!(
            html,
            "<table class=\"grades-table\">\n<thead><tr><th>{}</th><th>{}</th></tr></thead>\n<tbody>",
            escape(m.subject),
            escape(m.grade)
        );
        for subject in Subject::TABLE_ORDER {
            let score = record.score(subject);
            let row_class = if subject.is_non_additive() {
                " class=\"non-additive-subject\""
            } else {
                ""
            };
            let cell_class = if score.is_non_numeric() {
                " class=\"non-numeric\""
            } else {
                ""
            };
            let _ = writeln!(
                html,
                "<tr{}><td class=\"subject-name\">{}</td><td{}>{}</td></tr>",
                row_class,
                escape(m.subject(subject)),
                cell_class,
                escape(score.raw())
            );
        }
        html.push_str("</tbody>\n</table>\n</div>\n");

        let _ = writeln!(
            html,
            "<div class=\"total-score-row\"><span class=\"label\">{}</span><div class=\"fraction\"><span class=\"fraction-numerator\">{}</span><span class=\"fraction-denominator\">{}</span></div></div>",
            escape(m.total),
            escape(record.score(Subject::Subtotal).raw()),
            self.max_subtotal
        );
        html.push_str("</div>\n");
        html
    }
}

impl<W: Write> Presenter for HtmlPresenter<W> {
    fn set_loading(&mut self, loading: bool) {
        debug!(loading, "html presenter loading state");
    }

    fn present(&mut self, outcome: &Outcome) {
        let page = self.render(outcome);
        let written: io::Result<()> = self
            .out
            .write_all(page.as_bytes())
            .and_then(|_| self.out.flush());
        if let Err(e) = written {
            error!("failed to write HTML result: {}", e);
        }
    }
}

/// Escape text for element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::locate;
    use crate::lookup::FetchError;
    use reqwest::StatusCode;
    use scraper::{Html, Selector};

    const CSV: &str = "h\n101,<b>Alice</b>,North & Co,70,60,50,40,30,20,270,45,غ,33\n";

    fn presenter(theme: Theme) -> HtmlPresenter<Vec<u8>> {
        HtmlPresenter::new(Vec::new(), Locale::En, theme, 280)
    }

    fn texts(doc: &Html, css: &str) -> Vec<String> {
        let sel = Selector::parse(css).unwrap();
        doc.select(&sel)
            .map(|e| e.text().collect::<String>())
            .collect()
    }

    #[test]
    fn test_result_panel() {
        let outcome = Outcome::Success(locate(CSV, "101").unwrap());
        let doc = Html::parse_document(&presenter(Theme::Light).render(&outcome));

        assert_eq!(texts(&doc, ".info-row.name strong"), vec!["<b>Alice</b>"]);
        assert_eq!(texts(&doc, ".info-row.institution strong"), vec!["North & Co"]);
        assert_eq!(texts(&doc, "tbody tr").len(), 9);
        assert_eq!(
            texts(&doc, "tr.non-additive-subject td.subject-name"),
            vec!["Computer", "Religious education", "Art education"]
        );
        assert_eq!(texts(&doc, "td.non-numeric"), vec!["غ"]);
        assert_eq!(texts(&doc, ".fraction-numerator"), vec!["270"]);
        assert_eq!(texts(&doc, ".fraction-denominator"), vec!["280"]);
        assert!(texts(&doc, "body.dark-theme").is_empty());
    }

    #[test]
    fn test_alerts() {
        let p = presenter(Theme::Dark);
        let doc = Html::parse_document(&p.render(&Outcome::NotFound("<9>".into())));
        assert_eq!(texts(&doc, ".alert-danger strong"), vec!["<9>"]);
        assert_eq!(texts(&doc, "body.dark-theme").len(), 1);

        let doc = Html::parse_document(&p.render(&Outcome::TransportError(FetchError::Status(
            StatusCode::NOT_FOUND,
        ))));
        assert_eq!(
            texts(&doc, ".alert-danger strong"),
            vec!["Failed to connect to the server"]
        );

        let doc = Html::parse_document(&p.render(&Outcome::ValidationFailed));
        assert_eq!(texts(&doc, ".alert-warning"), vec!["Please enter a seat number."]);
    }

    #[test]
    fn test_present_writes_page() {
        let mut p = presenter(Theme::Light);
        p.set_loading(true);
        p.present(&Outcome::ValidationFailed);
        p.set_loading(false);
        let page = String::from_utf8(p.into_inner()).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("dir=\"ltr\""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#39;");
    }
}
