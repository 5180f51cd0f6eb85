#[cfg(feature = "pdf")]
pub mod pdf;
#[cfg(feature = "png")]
pub mod png;

/// usvg options resolving text against the system font database.
pub(crate) fn usvg_options() -> usvg::Options<'static> {
    usvg::Options { fontdb: crate::font::font_db(), ..Default::default() }
}
