use crate::error::Error;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Food,
    Pets,
    Travel,
    Home,
    Transportation,
    Work,
    Healthcare,
    Fun,
    Misc,
}

impl Category {
    /// Every category in selector order.
    pub const ALL: [Category; 9] = [
        Category::Food,
        Category::Pets,
        Category::Travel,
        Category::Home,
        Category::Transportation,
        Category::Work,
        Category::Healthcare,
        Category::Fun,
        Category::Misc,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Pets => "Pets",
            Category::Travel => "Travel",
            Category::Home => "Home",
            Category::Transportation => "Transportation",
            Category::Work => "Work",
            Category::Healthcare => "Healthcare",
            Category::Fun => "Fun",
            Category::Misc => "Misc",
        }
    }

    fn position(self) -> usize {
        Category::ALL
            .iter()
            .position(|c| *c == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Category::ALL[(self.position() + 1) % Category::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let len = Category::ALL.len();
        Category::ALL[(self.position() + len - 1) % len]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}
