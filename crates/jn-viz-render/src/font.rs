use std::sync::{Arc, OnceLock};

use ab_glyph::FontVec;
use usvg::fontdb;

use crate::primitives::{FontStyle, FontWeight};

/// Families tried in order before the generic sans-serif fallback.
const PREFERRED_FAMILIES: &[&str] =
    &["TeX Gyre Heros", "Helvetica", "Arial", "Liberation Sans", "DejaVu Sans", "Noto Sans"];

static FONT_DB: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
static FONTS: OnceLock<FontHandle> = OnceLock::new();

/// System font database, loaded once per process.
pub fn font_db() -> Arc<fontdb::Database> {
    FONT_DB
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system fonts");
            Arc::new(db)
        })
        .clone()
}

/// Faces used for text measurement. Any face may be missing on hosts
/// without fonts; callers fall back to estimated metrics.
pub struct FontHandle {
    pub family: Option<String>,
    pub regular: Option<FontVec>,
    pub bold: Option<FontVec>,
    pub italic: Option<FontVec>,
}

impl FontHandle {
    /// Process-wide handle backed by [`font_db`].
    pub fn shared() -> &'static FontHandle {
        FONTS.get_or_init(|| FontHandle::from_db(&font_db()))
    }

    pub fn from_db(db: &fontdb::Database) -> Self {
        let mut families: Vec<fontdb::Family<'_>> =
            PREFERRED_FAMILIES.iter().map(|f| fontdb::Family::Name(*f)).collect();
        families.push(fontdb::Family::SansSerif);

        let load = |weight: fontdb::Weight, style: fontdb::Style| -> Option<FontVec> {
            let query = fontdb::Query {
                families: &families,
                weight,
                stretch: fontdb::Stretch::Normal,
                style,
            };
            let id = db.query(&query)?;
            db.with_face_data(id, |data, index| {
                FontVec::try_from_vec_and_index(data.to_vec(), index).ok()
            })
            .flatten()
        };

        let family = db
            .query(&fontdb::Query {
                families: &families,
                weight: fontdb::Weight::NORMAL,
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            })
            .and_then(|id| db.face(id))
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()));

        let regular = load(fontdb::Weight::NORMAL, fontdb::Style::Normal);
        if regular.is_none() {
            tracing::warn!("no sans-serif system font found; text metrics are estimated");
        }

        Self {
            family,
            regular,
            bold: load(fontdb::Weight::BOLD, fontdb::Style::Normal),
            italic: load(fontdb::Weight::NORMAL, fontdb::Style::Italic),
        }
    }

    /// Handle with no faces at all.
    pub fn empty() -> Self {
        Self { family: None, regular: None, bold: None, italic: None }
    }

    pub fn select(&self, weight: FontWeight, style: FontStyle) -> Option<&FontVec> {
        let preferred = match (weight, style) {
            (FontWeight::Bold, _) => self.bold.as_ref(),
            (_, FontStyle::Italic) => self.italic.as_ref(),
            _ => None,
        };
        preferred.or(self.regular.as_ref())
    }

    /// CSS `font-family` value for SVG text.
    pub fn css_family(&self) -> String {
        match &self.family {
            Some(name) => format!("'{name}', sans-serif"),
            None => "sans-serif".into(),
        }
    }
}
