//! Plain-text rendering of catalog listings and previews.

use catalog_index_core::entry::CatalogEntry;
use catalog_index_core::format::{format_date, size_cell, DateLocale, PLACEHOLDER};
use catalog_index_core::view::{CatalogPreview, CatalogStatus};

pub const LOADING: &str = "Chargement...";
pub const NO_MATCHES: &str = "Aucun fichier trouvé.";
pub const NO_PREVIEW_ITEMS: &str = "Aucun élément disponible";

/// One card per entry, or the "no matches" line for an empty result.
pub fn render_listing(title: &str, entries: &[&CatalogEntry], locale: DateLocale) -> String {
    let mut out = format!("{title}\n");
    if entries.is_empty() {
        out.push_str(NO_MATCHES);
        out.push('\n');
        return out;
    }
    for entry in entries {
        let ext = if entry.ext().is_empty() {
            String::new()
        } else {
            format!("  [{}]", entry.ext().to_uppercase())
        };
        let year = if entry.year().is_empty() {
            PLACEHOLDER.to_string()
        } else {
            entry.year().to_uppercase()
        };
        out.push_str(&format!(
            "{}{}\n  Année: {}  Ajouté: {}  Taille: {}\n  {}\n",
            entry.name(),
            ext,
            year,
            format_date(entry.uploaded_at(), locale),
            size_cell(entry.size()),
            entry.url(),
        ));
    }
    out
}

/// Status line for a catalog that is not ready.
pub fn render_status(status: &CatalogStatus) -> Option<String> {
    match status {
        CatalogStatus::Loading => Some(LOADING.to_string()),
        CatalogStatus::Error(message) => Some(message.clone()),
        CatalogStatus::Ready(_) => None,
    }
}

/// Landing-page style summary: name and date of the newest entries per catalog.
pub fn render_previews(previews: &[CatalogPreview], locale: DateLocale) -> String {
    let mut out = String::new();
    for preview in previews {
        out.push_str(&format!("{}\n", preview.label));
        match &preview.status {
            CatalogStatus::Ready(entries) if entries.is_empty() => {
                out.push_str(&format!("  {NO_PREVIEW_ITEMS}\n"));
            }
            CatalogStatus::Ready(entries) => {
                for entry in entries {
                    out.push_str(&format!(
                        "  {}  {}\n",
                        entry.name(),
                        format_date(entry.uploaded_at(), locale)
                    ));
                }
            }
            other => {
                if let Some(line) = render_status(other) {
                    out.push_str(&format!("  {line}\n"));
                }
            }
        }
    }
    out
}
