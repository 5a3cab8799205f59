//! Name-based material classification
//!
//! Surfaces are grouped by the name their material carries in the asset. Names
//! are matched case-insensitively against English and Turkish keyword groups; a
//! keyword counts as a hit anywhere inside the name. Groups are checked in a
//! fixed order and the first hit wins: `"glass_metal_trim"` is glass, not chrome.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ShadingProfile, DEFAULT_PROFILE};

/// Surface category derived from a material name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaterialCategory {
    /// Glass and windows
    Glass,
    /// Painted body panels
    Paint,
    /// Chrome and bare metal trim
    Chrome,
    /// Tires and wheels
    Rubber,
    /// Anything without a recognized keyword
    Default,
}

impl MaterialCategory {
    /// All categories in classification priority order
    pub const ALL: [Self; 5] = [
        Self::Glass,
        Self::Paint,
        Self::Chrome,
        Self::Rubber,
        Self::Default,
    ];

    /// Shading profile assigned to this category
    pub fn profile(self) -> ShadingProfile {
        MATERIAL_RULES
            .iter()
            .find(|rule| rule.category == self)
            .map_or(DEFAULT_PROFILE, |rule| rule.profile)
    }

    /// Lowercase label used in logs and reports
    pub fn label(self) -> &'static str {
        match self {
            Self::Glass => "glass",
            Self::Paint => "paint",
            Self::Chrome => "chrome",
            Self::Rubber => "rubber",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the ordered keyword table
#[derive(Debug, Clone, Copy)]
pub struct MaterialRule {
    /// Category assigned when any keyword matches
    pub category: MaterialCategory,
    /// Lowercase keywords, English and Turkish
    pub keywords: &'static [&'static str],
    /// Shading parameters applied on a match
    pub profile: ShadingProfile,
}

impl MaterialRule {
    /// Whether an already lower-cased name contains one of this rule's keywords
    pub fn matches(&self, normalized_name: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_name.contains(keyword))
    }
}

/// Keyword groups in priority order. [`MaterialCategory::Default`] has no
/// entry; it is the fallthrough and gets [`DEFAULT_PROFILE`].
pub const MATERIAL_RULES: [MaterialRule; 4] = [
    MaterialRule {
        category: MaterialCategory::Glass,
        keywords: &["glass", "window", "pencere", "cam"],
        profile: ShadingProfile::translucent(0.1, 0.9, 0.3, 1.5),
    },
    MaterialRule {
        category: MaterialCategory::Paint,
        keywords: &["paint", "boya", "body", "karoseri"],
        profile: ShadingProfile::opaque(0.2, 0.7, 1.0),
    },
    MaterialRule {
        category: MaterialCategory::Chrome,
        keywords: &["chrome", "krom", "metal", "metalic"],
        profile: ShadingProfile::opaque(0.05, 1.0, 1.8),
    },
    MaterialRule {
        category: MaterialCategory::Rubber,
        keywords: &["tire", "lastik", "wheel", "tekerlek"],
        profile: ShadingProfile::opaque(0.9, 0.1, 0.3),
    },
];

/// Result of classifying one material name
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    /// Matched category
    pub category: MaterialCategory,
    /// Shading parameters for the category
    pub profile: ShadingProfile,
}

/// Stateless classifier over [`MATERIAL_RULES`]
pub struct MaterialClassifier;

impl MaterialClassifier {
    /// Classify a material name
    ///
    /// Total over all strings: names without a recognized keyword, including
    /// the empty string, classify as [`MaterialCategory::Default`].
    pub fn classify(material_name: &str) -> Classification {
        let normalized = material_name.to_lowercase();
        MATERIAL_RULES
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map_or(
                Classification {
                    category: MaterialCategory::Default,
                    profile: DEFAULT_PROFILE,
                },
                |rule| Classification {
                    category: rule.category,
                    profile: rule.profile,
                },
            )
    }

    /// Category for a material name
    pub fn category_of(material_name: &str) -> MaterialCategory {
        Self::classify(material_name).category
    }

    /// The keyword table in evaluation order
    pub fn rules() -> &'static [MaterialRule] {
        &MATERIAL_RULES
    }
}
