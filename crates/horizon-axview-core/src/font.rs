//! Font style resolution.
//!
//! Maps abstract style requests (family name, numeric weight, italic flag,
//! point size, optional external scale factor) to a concrete renderable
//! [`FontDescriptor`]. Resolution is total: an unknown family falls back to
//! the database's sans-serif default at the same weight and style, and an
//! empty database falls back to a generic descriptor, so callers always get
//! something usable.

use fontdb::Database;

/// The default point size used when the host specifies none.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Font weight, ranging from 100 (thin) to 900 (black).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Thin weight (100).
    pub const THIN: Self = Self(100);
    /// Light weight (300).
    pub const LIGHT: Self = Self(300);
    /// Normal/regular weight (400).
    pub const NORMAL: Self = Self(400);
    /// Medium weight (500).
    pub const MEDIUM: Self = Self(500);
    /// Semi-bold weight (600).
    pub const SEMI_BOLD: Self = Self(600);
    /// Bold weight (700).
    pub const BOLD: Self = Self(700);
    /// Black/heavy weight (900).
    pub const BLACK: Self = Self(900);

    /// Create a font weight from a numeric value, clamped to 100-900.
    pub fn new(weight: u16) -> Self {
        Self(weight.clamp(100, 900))
    }

    /// Get the numeric weight value.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Convert to fontdb Weight.
    pub fn to_fontdb(self) -> fontdb::Weight {
        fontdb::Weight(self.0)
    }

    /// Map to the native weight axis: -1.0 at 100, 0.0 at 400, 1.0 at 900.
    ///
    /// Piecewise linear with a steeper slope below normal, matching host
    /// platforms whose weight axes are asymmetric around the regular weight.
    pub fn to_native(self) -> f32 {
        let normalized = f32::from(self.0) - 400.0;
        if normalized < 0.0 {
            normalized / 300.0
        } else {
            normalized / 500.0
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<u16> for FontWeight {
    fn from(value: u16) -> Self {
        Self::new(value)
    }
}

/// Font style (normal, italic, or oblique).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    /// Normal upright style.
    #[default]
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

impl FontStyle {
    /// Convert to fontdb Style.
    pub fn to_fontdb(self) -> fontdb::Style {
        match self {
            FontStyle::Normal => fontdb::Style::Normal,
            FontStyle::Italic => fontdb::Style::Italic,
            FontStyle::Oblique => fontdb::Style::Oblique,
        }
    }
}

/// An abstract style request, as assembled from the host's option record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontRequest {
    /// Requested family name, or `None` for the platform default.
    pub family: Option<String>,
    /// Requested weight.
    pub weight: FontWeight,
    /// Whether an italic face is requested.
    pub italic: bool,
    /// Point size before scaling.
    pub size: f32,
    /// External scale factor applied by the host, if any.
    pub scale_factor: Option<f32>,
}

impl FontRequest {
    /// Create a request at the given point size.
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Set the requested family name.
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    /// Set the requested weight.
    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Request an italic face.
    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set the external scale factor.
    pub fn scale_factor(mut self, factor: f32) -> Self {
        self.scale_factor = Some(factor);
        self
    }
}

/// A concrete, renderable font description.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// The resolved family name.
    pub family: String,
    /// The requested weight on the 100-900 scale.
    pub weight: FontWeight,
    /// The weight mapped onto the native axis.
    pub native_weight: f32,
    /// The resolved style.
    pub style: FontStyle,
    /// The effective point size after scaling.
    pub size: f32,
}

/// Resolves style requests against a font database.
///
/// Pure per call: holds the database but no per-request state.
pub struct StyleResolver {
    db: Database,
}

impl StyleResolver {
    /// Create a resolver over the system font collection.
    ///
    /// Loading system fonts can take noticeable time on font-heavy systems;
    /// hosts embedding their own fonts should prefer [`StyleResolver::empty`]
    /// plus [`StyleResolver::register_font_data`].
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!(
            target: "horizon_axview_core::font",
            faces = db.len(),
            "loaded system fonts"
        );
        Self { db }
    }

    /// Create a resolver with an empty database.
    pub fn empty() -> Self {
        Self {
            db: Database::new(),
        }
    }

    /// Create a resolver over a prepared database.
    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Register a font from raw file data, the way hosts register fonts
    /// shipped in their asset bundles.
    pub fn register_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Override the family used when a requested family is unknown.
    pub fn set_default_family(&mut self, family: impl Into<String>) {
        self.db.set_sans_serif_family(family.into());
    }

    /// Access the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Resolve a style request to a concrete descriptor.
    ///
    /// Never fails: unknown families fall back to the sans-serif default,
    /// and an empty database falls back to the requested (or generic) family
    /// name unchanged.
    pub fn resolve(&self, request: &FontRequest) -> FontDescriptor {
        let style = if request.italic {
            FontStyle::Italic
        } else {
            FontStyle::Normal
        };

        let mut families = Vec::with_capacity(2);
        if let Some(name) = &request.family {
            families.push(fontdb::Family::Name(name));
        }
        families.push(fontdb::Family::SansSerif);

        let query = fontdb::Query {
            families: &families,
            weight: request.weight.to_fontdb(),
            stretch: fontdb::Stretch::Normal,
            style: style.to_fontdb(),
        };

        let family = self
            .db
            .query(&query)
            .and_then(|id| self.db.face(id))
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| {
                request
                    .family
                    .clone()
                    .unwrap_or_else(|| "sans-serif".to_string())
            });

        let size = request.size * request.scale_factor.unwrap_or(1.0);

        FontDescriptor {
            family,
            weight: request.weight,
            native_weight: request.weight.to_native(),
            style,
            size,
        }
    }
}

impl Default for StyleResolver {
    fn default() -> Self {
        Self::empty()
    }
}
