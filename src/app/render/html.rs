use super::{LINK_LABEL, PAGE_SUBTITLE, PAGE_TITLE, SUMMARY_HEADING};
use crate::domain::model::{ArticleCard, Page};
use crate::utils::validation::is_web_link;
use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 72rem; padding: 0 1rem; }
.notice { background: #fdecea; border-left: 4px solid #d93025; padding: .75rem 1rem; margin: 1rem 0; }
.card { display: grid; grid-template-columns: 2fr 3fr; gap: 2rem; border-top: 1px solid #ddd; padding: 1.5rem 0; }
.caption { color: #666; font-size: .9rem; }
.summary.error { color: #b3261e; }
footer { color: #999; font-size: .8rem; margin-top: 2rem; }
"#;

/// Standalone HTML page; every feed-provided string is escaped.
pub fn render_html(page: &Page, generated_at: DateTime<Utc>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", encode_text(PAGE_TITLE));
    let _ = writeln!(html, "<style>{}</style>\n</head>\n<body>", STYLE);
    let _ = writeln!(html, "<h1>{}</h1>", encode_text(PAGE_TITLE));
    let _ = writeln!(html, "<p>{}</p>", encode_text(PAGE_SUBTITLE));

    for notice in &page.notices {
        let _ = writeln!(
            html,
            "<div class=\"notice\">{}</div>",
            encode_text(&notice.message())
        );
    }

    for card in &page.articles {
        render_card(&mut html, card);
    }

    let _ = writeln!(
        html,
        "<footer>Generated {}</footer>\n</body>\n</html>",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    html
}

fn render_card(html: &mut String, card: &ArticleCard) {
    let entry = &card.entry;
    let href = if is_web_link(&entry.link) {
        entry.link.as_str()
    } else {
        "#"
    };

    html.push_str("<section class=\"card\">\n<div class=\"meta\">\n");
    let _ = writeln!(html, "<h2>{}</h2>", encode_text(&entry.title));
    let _ = writeln!(
        html,
        "<p class=\"caption\">Published: {}</p>",
        encode_text(entry.published_or_default())
    );
    let _ = writeln!(
        html,
        "<p><a href=\"{}\" rel=\"noopener\">{}</a></p>",
        encode_double_quoted_attribute(href),
        LINK_LABEL
    );
    html.push_str("</div>\n<div class=\"content\">\n");

    let class = if card.summary.is_failure() {
        "summary error"
    } else {
        "summary"
    };
    let _ = writeln!(html, "<h3>{}</h3>", SUMMARY_HEADING);
    let _ = writeln!(
        html,
        "<p class=\"{}\">{}</p>",
        class,
        encode_text(&card.summary.display_text())
    );
    html.push_str("</div>\n</section>\n");
}
