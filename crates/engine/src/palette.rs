//! Stable per-category colors.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use serde::{Serialize, Serializer};

/// RGB color rendered as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Colors of the dashboard charts.
pub const DEFAULT_COLORS: [Color; 18] = [
    Color::rgb(0xa1, 0x58, 0x2b),
    Color::rgb(0xd4, 0x9b, 0xe0),
    Color::rgb(0x5b, 0xa0, 0xe0),
    Color::rgb(0xac, 0x9c, 0x20),
    Color::rgb(0x21, 0xab, 0x8b),
    Color::rgb(0x18, 0x4e, 0x81),
    Color::rgb(0x69, 0xe2, 0xc6),
    Color::rgb(0x7e, 0x76, 0x1b),
    Color::rgb(0x18, 0x81, 0x68),
    Color::rgb(0xca, 0x4e, 0x63),
    Color::rgb(0xa9, 0xc4, 0x3b),
    Color::rgb(0x18, 0xb4, 0x18),
    Color::rgb(0x80, 0x3a, 0xc5),
    Color::rgb(0xb3, 0x32, 0x3d),
    Color::rgb(0xb0, 0x36, 0xa1),
    Color::rgb(0xf6, 0x09, 0x19),
    Color::rgb(0x08, 0xdd, 0x28),
    Color::rgb(0x78, 0x65, 0x9a),
];

/// Fixed list of colors with a name-keyed assignment.
///
/// A category's preferred slot is a hash of its name, so the same name gets
/// the same color on every render and across reloads. When two categories of
/// one set collide, the later one (by name order) probes forward to the next
/// free slot; colors only repeat once the palette is exhausted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

impl Palette {
    /// Palette over `colors`; an empty list falls back to the default colors.
    pub fn new(colors: Vec<Color>) -> Self {
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Color at `index`, wrapping around.
    pub fn indexed(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// Preferred color of a single category, ignoring collisions.
    pub fn color_of(&self, category: &str) -> Color {
        self.indexed(self.slot(category))
    }

    /// Assigns a color to every category of the set.
    pub fn assign<'a>(&self, categories: &BTreeSet<&'a str>) -> BTreeMap<&'a str, Color> {
        let mut assigned = BTreeMap::new();
        self.assign_missing(&mut assigned, categories.iter().copied());
        assigned
    }

    /// Colors the categories not yet in `assigned`, keeping every color
    /// already handed out. Slots of the existing colors count as taken.
    pub fn assign_missing<'a>(
        &self,
        assigned: &mut BTreeMap<&'a str, Color>,
        categories: impl IntoIterator<Item = &'a str>,
    ) {
        let mut taken = vec![false; self.colors.len()];
        for color in assigned.values() {
            if let Some(slot) = self.colors.iter().position(|c| c == color) {
                taken[slot] = true;
            }
        }
        let mut free = taken.iter().filter(|slot| !**slot).count();

        let missing: BTreeSet<&'a str> = categories
            .into_iter()
            .filter(|category| !assigned.contains_key(category))
            .collect();
        for category in missing {
            let preferred = self.slot(category);
            let slot = if free == 0 {
                preferred
            } else {
                let slot = (0..self.colors.len())
                    .map(|offset| (preferred + offset) % self.colors.len())
                    .find(|&slot| !taken[slot])
                    .unwrap_or(preferred);
                taken[slot] = true;
                free -= 1;
                slot
            };
            assigned.insert(category, self.colors[slot]);
        }
    }

    fn slot(&self, category: &str) -> usize {
        let digest = blake3::hash(category.as_bytes());
        let bytes = digest.as_bytes();
        let value = u64::from_le_bytes(std::array::from_fn(|i| bytes[i]));
        (value % self.colors.len() as u64) as usize
    }
}
