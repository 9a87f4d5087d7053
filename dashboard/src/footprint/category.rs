//! Canonical emission categories per subject type and the keyword normaliser
//! that maps free-text backend names onto them.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    #[default]
    Individual,
    Institution,
}

impl SubjectType {
    /// Lenient parse of a subject tag (`"individual"`, `"Institution"`, ...).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "individual" | "individu" => Some(Self::Individual),
            "institution" | "institusi" => Some(Self::Institution),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Institution => "institution",
        }
    }

    /// The fixed, ordered category template for this subject type.
    pub fn template(self) -> &'static [CategoryDef] {
        match self {
            Self::Individual => &INDIVIDUAL_TEMPLATE,
            Self::Institution => &INSTITUTION_TEMPLATE,
        }
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalId {
    Transport,
    Listrik,
    Makanan,
    Sampah,
}

impl CanonicalId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Listrik => "listrik",
            Self::Makanan => "makanan",
            Self::Sampah => "sampah",
        }
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one template slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDef {
    pub id: CanonicalId,
    /// Localisation key for the slot's label.
    pub display_key: &'static str,
    pub color: &'static str,
}

const TRANSPORT: CategoryDef = CategoryDef {
    id: CanonicalId::Transport,
    display_key: "category-transport",
    color: "#2563EB",
};
const LISTRIK: CategoryDef = CategoryDef {
    id: CanonicalId::Listrik,
    display_key: "category-listrik",
    color: "#F59E0B",
};
const MAKANAN: CategoryDef = CategoryDef {
    id: CanonicalId::Makanan,
    display_key: "category-makanan",
    color: "#16A34A",
};
const SAMPAH: CategoryDef = CategoryDef {
    id: CanonicalId::Sampah,
    display_key: "category-sampah",
    color: "#92400E",
};

pub const INDIVIDUAL_TEMPLATE: [CategoryDef; 3] = [TRANSPORT, LISTRIK, MAKANAN];
pub const INSTITUTION_TEMPLATE: [CategoryDef; 4] = [TRANSPORT, LISTRIK, SAMPAH, MAKANAN];

/// Colours handed out, in order, to slices that match no template slot.
pub const EXTRA_PALETTE: [&str; 4] = ["#7C3AED", "#DB2777", "#0891B2", "#64748B"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceOrigin {
    /// One of the subject type's template slots.
    Canonical,
    /// A backend category that matched no template slot.
    Extra,
}

/// One slice of the breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalCategory {
    pub id: String,
    /// Localisation key for canonical slices, the raw backend name for extras.
    pub display_key: String,
    pub color: String,
    /// kg CO2e.
    pub value: f64,
    pub percentage: Option<f64>,
    pub origin: SliceOrigin,
}

impl CanonicalCategory {
    pub fn from_def(def: &CategoryDef) -> Self {
        Self {
            id: def.id.as_str().to_string(),
            display_key: def.display_key.to_string(),
            color: def.color.to_string(),
            value: 0.0,
            percentage: None,
            origin: SliceOrigin::Canonical,
        }
    }

    pub fn is_extra(&self) -> bool {
        self.origin == SliceOrigin::Extra
    }
}

/// Map a backend category name onto a canonical id.
///
/// Case-insensitive substring match, first hit wins, in this order:
/// `transport`, `listrik`, `limbah`/`sampah`, `food`. Returns `None` when no
/// keyword matches; callers keep such records as extra slices.
///
/// For individuals, `limbah`/`sampah` land in `makanan`. This mirrors what the
/// reporting app has always shown and is kept until product decides otherwise.
pub fn normalize_category_name(raw_name: &str, subject: SubjectType) -> Option<CanonicalId> {
    let name = raw_name.to_lowercase();

    if name.contains("transport") {
        Some(CanonicalId::Transport)
    } else if name.contains("listrik") {
        Some(CanonicalId::Listrik)
    } else if name.contains("limbah") || name.contains("sampah") {
        match subject {
            SubjectType::Institution => Some(CanonicalId::Sampah),
            SubjectType::Individual => Some(CanonicalId::Makanan),
        }
    } else if name.contains("food") {
        Some(CanonicalId::Makanan)
    } else {
        None
    }
}
