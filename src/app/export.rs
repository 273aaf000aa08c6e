use crate::app::render::render_html;
use crate::config::settings::ExportFormat;
use crate::domain::model::Page;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::Utc;

/// Writes a rendered page to storage in each requested format.
pub struct Exporter<S: Storage> {
    storage: S,
    formats: Vec<ExportFormat>,
}

impl<S: Storage> Exporter<S> {
    pub fn new(storage: S, formats: Vec<ExportFormat>) -> Self {
        Self { storage, formats }
    }

    /// Returns the file names written, in the order they were requested.
    pub async fn export(&self, page: &Page) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in &self.formats {
            let data = match format {
                ExportFormat::Html => render_html(page, Utc::now()).into_bytes(),
                ExportFormat::Json => serde_json::to_vec_pretty(page)?,
                ExportFormat::Csv => to_csv(page)?,
            };

            let name = format.file_name();
            tracing::debug!("Writing {} export ({} bytes)", format, data.len());
            self.storage.write_file(name, &data).await?;
            written.push(name.to_string());
        }

        Ok(written)
    }
}

fn to_csv(page: &Page) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["title", "published", "link", "status", "summary"])?;

    for card in &page.articles {
        let status = if card.summary.is_failure() {
            "failed"
        } else {
            "ok"
        };
        let summary = card.summary.display_text();
        writer.write_record([
            card.entry.title.as_str(),
            card.entry.published.as_deref().unwrap_or(""),
            card.entry.link.as_str(),
            status,
            summary.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| e.into_error().into())
}
