//! Production-element categories used to tag screenplay text.

use serde::{Deserialize, Serialize};

use crate::geometry::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementCategory {
    Cast,
    Stunts,
    Extras,
    Props,
    Wardrobe,
    MakeupHair,
    SetDressing,
    SpecialEffects,
    VisualEffects,
    Animals,
    Vehicles,
    SpecialEquipment,
    Sound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMetadata {
    pub name: &'static str,
    pub icon: &'static str,
    pub color: Color,
}

const ALL_CATEGORIES: [ElementCategory; 13] = [
    ElementCategory::Cast,
    ElementCategory::Stunts,
    ElementCategory::Extras,
    ElementCategory::Props,
    ElementCategory::Wardrobe,
    ElementCategory::MakeupHair,
    ElementCategory::SetDressing,
    ElementCategory::SpecialEffects,
    ElementCategory::VisualEffects,
    ElementCategory::Animals,
    ElementCategory::Vehicles,
    ElementCategory::SpecialEquipment,
    ElementCategory::Sound,
];

/// Every category in canonical display order.
pub const fn all_categories() -> &'static [ElementCategory] {
    &ALL_CATEGORIES
}

pub const fn metadata(category: ElementCategory) -> CategoryMetadata {
    category.metadata()
}

impl ElementCategory {
    pub const fn metadata(self) -> CategoryMetadata {
        match self {
            Self::Cast => CategoryMetadata {
                name: "Cast",
                icon: "users",
                color: Color::new(229, 57, 53),
            },
            Self::Stunts => CategoryMetadata {
                name: "Stunts",
                icon: "zap",
                color: Color::new(251, 140, 0),
            },
            Self::Extras => CategoryMetadata {
                name: "Extras",
                icon: "users-round",
                color: Color::new(67, 160, 71),
            },
            Self::Props => CategoryMetadata {
                name: "Props",
                icon: "package",
                color: Color::new(142, 36, 170),
            },
            Self::Wardrobe => CategoryMetadata {
                name: "Wardrobe",
                icon: "shirt",
                color: Color::new(30, 136, 229),
            },
            Self::MakeupHair => CategoryMetadata {
                name: "Makeup/Hair",
                icon: "brush",
                color: Color::new(216, 27, 96),
            },
            Self::SetDressing => CategoryMetadata {
                name: "Set Dressing",
                icon: "sofa",
                color: Color::new(109, 76, 65),
            },
            Self::SpecialEffects => CategoryMetadata {
                name: "Special Effects",
                icon: "flame",
                color: Color::new(0, 137, 123),
            },
            Self::VisualEffects => CategoryMetadata {
                name: "Visual Effects",
                icon: "sparkles",
                color: Color::new(57, 73, 171),
            },
            Self::Animals => CategoryMetadata {
                name: "Animals",
                icon: "paw-print",
                color: Color::new(124, 179, 66),
            },
            Self::Vehicles => CategoryMetadata {
                name: "Vehicles",
                icon: "car",
                color: Color::new(84, 110, 122),
            },
            Self::SpecialEquipment => CategoryMetadata {
                name: "Special Equipment",
                icon: "wrench",
                color: Color::new(253, 216, 53),
            },
            Self::Sound => CategoryMetadata {
                name: "Sound",
                icon: "volume-2",
                color: Color::new(0, 172, 193),
            },
        }
    }

    pub const fn display_name(self) -> &'static str {
        self.metadata().name
    }

    pub const fn color(self) -> Color {
        self.metadata().color
    }

    /// Persisted string tag, identical to the serde representation.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Cast => "cast",
            Self::Stunts => "stunts",
            Self::Extras => "extras",
            Self::Props => "props",
            Self::Wardrobe => "wardrobe",
            Self::MakeupHair => "makeupHair",
            Self::SetDressing => "setDressing",
            Self::SpecialEffects => "specialEffects",
            Self::VisualEffects => "visualEffects",
            Self::Animals => "animals",
            Self::Vehicles => "vehicles",
            Self::SpecialEquipment => "specialEquipment",
            Self::Sound => "sound",
        }
    }

    /// Looks a category up by tag or display name, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        all_categories().iter().copied().find(|category| {
            category.tag().eq_ignore_ascii_case(value)
                || category.display_name().eq_ignore_ascii_case(value)
        })
    }
}

impl std::fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
