use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Backend-agnostic font configuration.
///
/// This struct only uses standard library types. It is turned into a
/// [`fontdb::Database`] by [`font_config_to_fontdb`], or resolved once into a
/// [`ResolvedFontConfig`] that many canvases can share.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Custom font data to register.
    pub custom_fonts: Vec<CustomFont>,
    /// Mappings from generic CSS family names to concrete font family names.
    pub generic_families: GenericFamilyMap,
    /// Whether to load system fonts (default: true).
    pub load_system_fonts: bool,
    /// Additional directories to scan for font files.
    pub font_dirs: Vec<PathBuf>,
    /// Whether font hinting is enabled for text rendering (default: false).
    pub hinting_enabled: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            custom_fonts: Vec::new(),
            generic_families: GenericFamilyMap::defaults(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
            hinting_enabled: false,
        }
    }
}

/// Raw font file data (TTF/OTF) to register. The family name is read from
/// the font's name table.
#[derive(Clone, Debug)]
pub struct CustomFont {
    /// Arc-wrapped for cheap cloning.
    pub data: Arc<Vec<u8>>,
}

/// Mappings from generic CSS family names to concrete font family names, in priority order.
#[derive(Clone, Debug, Default)]
pub struct GenericFamilyMap {
    /// Concrete fonts for CSS "serif" (priority order).
    pub serif: Vec<String>,
    /// Concrete fonts for CSS "sans-serif" (priority order).
    pub sans_serif: Vec<String>,
    /// Concrete fonts for CSS "monospace" (priority order).
    pub monospace: Vec<String>,
    /// Concrete fonts for CSS "cursive" (priority order).
    pub cursive: Vec<String>,
    /// Concrete fonts for CSS "fantasy" (priority order).
    pub fantasy: Vec<String>,
}

impl GenericFamilyMap {
    /// Returns the default generic family mappings.
    ///
    /// Japanese families come before the Latin-only fallbacks so kana and
    /// kanji resolve to a face that actually carries them.
    pub fn defaults() -> Self {
        Self {
            sans_serif: vec![
                "Noto Sans JP".into(),
                "Noto Sans CJK JP".into(),
                "Arial".into(),
                "Helvetica".into(),
                "Liberation Sans".into(),
                "DejaVu Sans".into(),
            ],
            monospace: vec![
                "Courier New".into(),
                "Courier".into(),
                "Liberation Mono".into(),
                "DejaVu Sans Mono".into(),
            ],
            serif: vec![
                "Noto Serif JP".into(),
                "Noto Serif CJK JP".into(),
                "Times New Roman".into(),
                "Times".into(),
                "Liberation Serif".into(),
                "DejaVu Serif".into(),
            ],
            cursive: vec!["Hachi Maru Pop".into(), "Comic Sans MS".into()],
            fantasy: vec!["Mochiy Pop One".into(), "Impact".into()],
        }
    }
}

impl FontConfig {
    /// Resolve this configuration into a concrete font database.
    ///
    /// System font scanning happens once here; the result is cloned into each
    /// canvas created with
    /// [`Canvas2dContext::with_resolved()`](crate::Canvas2dContext::with_resolved).
    pub fn resolve(&self) -> ResolvedFontConfig {
        ResolvedFontConfig::new(self)
    }
}

/// A [`FontConfig`] that has been resolved into a concrete font database.
pub struct ResolvedFontConfig {
    pub(crate) fontdb: fontdb::Database,
    pub(crate) hinting_enabled: bool,
}

impl ResolvedFontConfig {
    /// Resolve a [`FontConfig`] into a concrete font database.
    pub fn new(config: &FontConfig) -> Self {
        Self {
            fontdb: font_config_to_fontdb(config),
            hinting_enabled: config.hinting_enabled,
        }
    }

    /// Number of font faces available to text rendering.
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Whether a face with the given family name is loaded (case-insensitive).
    pub fn has_family(&self, family: &str) -> bool {
        has_family(&self.fontdb, family)
    }
}

pub(crate) fn has_family(db: &fontdb::Database, family: &str) -> bool {
    db.faces().any(|face| {
        face.families
            .iter()
            .any(|(name, _lang)| name.eq_ignore_ascii_case(family))
    })
}

/// Convert a [`FontConfig`] into a [`fontdb::Database`].
pub fn font_config_to_fontdb(config: &FontConfig) -> fontdb::Database {
    let mut db = fontdb::Database::new();

    if config.load_system_fonts {
        db.load_system_fonts();
    }

    for dir in &config.font_dirs {
        log::debug!(target: "canvas", "loading fonts from {}", dir.display());
        db.load_fonts_dir(dir);
    }

    for font in &config.custom_fonts {
        db.load_font_data(Vec::from(font.data.as_slice()));
    }

    apply_generic_families(&mut db, &config.generic_families);

    log::debug!(target: "canvas", "font database ready with {} faces", db.len());
    db
}

/// Apply generic family mappings to a fontdb database, choosing the first available
/// family from each priority list.
fn apply_generic_families(db: &mut fontdb::Database, families: &GenericFamilyMap) {
    let available: HashSet<String> = db
        .faces()
        .flat_map(|face| {
            face.families
                .iter()
                .map(|(fam, _lang)| fam.clone())
                .collect::<Vec<_>>()
        })
        .collect();

    let first_available =
        |list: &[String]| list.iter().find(|family| available.contains(*family)).cloned();

    if let Some(family) = first_available(&families.sans_serif) {
        db.set_sans_serif_family(family);
    }
    if let Some(family) = first_available(&families.monospace) {
        db.set_monospace_family(family);
    }
    if let Some(family) = first_available(&families.serif) {
        db.set_serif_family(family);
    }
    if let Some(family) = first_available(&families.cursive) {
        db.set_cursive_family(family);
    }
    if let Some(family) = first_available(&families.fantasy) {
        db.set_fantasy_family(family);
    }
}
