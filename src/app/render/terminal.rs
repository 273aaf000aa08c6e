use super::{LINK_LABEL, PAGE_SUBTITLE, PAGE_TITLE, SUMMARY_HEADING};
use crate::domain::model::{ArticleCard, Page, SummaryResult};
use crate::utils::error::Result;
use std::io::Write;

const SEPARATOR: &str = "────────────────────────────────────────────────────────────";

pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render(&mut self, page: &Page) -> Result<()> {
        writeln!(self.out, "{}", PAGE_TITLE)?;
        writeln!(self.out, "{}", PAGE_SUBTITLE)?;

        for notice in &page.notices {
            writeln!(self.out)?;
            writeln!(self.out, "❌ {}", notice.message())?;
        }

        for card in &page.articles {
            self.render_card(card)?;
        }

        self.out.flush()?;
        Ok(())
    }

    fn render_card(&mut self, card: &ArticleCard) -> Result<()> {
        let entry = &card.entry;

        writeln!(self.out)?;
        writeln!(self.out, "{}", SEPARATOR)?;
        writeln!(self.out, "{}", plain(&entry.title))?;
        writeln!(self.out, "Published: {}", entry.published_or_default())?;
        writeln!(self.out, "{}: {}", LINK_LABEL, entry.link)?;
        writeln!(self.out)?;
        writeln!(self.out, "  {}", SUMMARY_HEADING)?;

        let text = plain(&card.summary.display_text());
        let marker = match card.summary {
            SummaryResult::Summary(_) => "",
            SummaryResult::Failed(_) => "⚠️  ",
        };
        for (i, line) in text.lines().enumerate() {
            let prefix = if i == 0 { marker } else { "" };
            writeln!(self.out, "  {}{}", prefix, line)?;
        }

        Ok(())
    }
}

fn plain(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
