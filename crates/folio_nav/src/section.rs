//! Sections and the active index

use crate::error::{NavError, Result};

/// A navigable full-viewport section
///
/// Content is opaque to navigation; only the title is read, for nav links.
pub trait Section {
    fn title(&self) -> &str;
}

impl Section for String {
    fn title(&self) -> &str {
        self
    }
}

impl Section for &'static str {
    fn title(&self) -> &str {
        self
    }
}

/// The five sections of the portfolio page, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortfolioSection {
    Home,
    About,
    Projects,
    Experience,
    Contact,
}

impl PortfolioSection {
    pub const ALL: [PortfolioSection; 5] = [
        PortfolioSection::Home,
        PortfolioSection::About,
        PortfolioSection::Projects,
        PortfolioSection::Experience,
        PortfolioSection::Contact,
    ];
}

impl Section for PortfolioSection {
    fn title(&self) -> &str {
        match self {
            PortfolioSection::Home => "Home",
            PortfolioSection::About => "About",
            PortfolioSection::Projects => "Projects",
            PortfolioSection::Experience => "Experience",
            PortfolioSection::Contact => "Contact",
        }
    }
}

/// Ordered, fixed-length sequence of sections
#[derive(Debug, Clone)]
pub struct SectionCollection<S> {
    sections: Vec<S>,
}

impl<S> SectionCollection<S> {
    /// Fails with [`NavError::NoSections`] when `sections` is empty
    pub fn new(sections: Vec<S>) -> Result<Self> {
        if sections.is_empty() {
            return Err(NavError::NoSections);
        }
        Ok(Self { sections })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false; construction rejects empty collections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.sections.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.sections.iter()
    }
}

impl SectionCollection<PortfolioSection> {
    /// Home, About, Projects, Experience, Contact
    pub fn portfolio() -> Self {
        Self {
            sections: PortfolioSection::ALL.to_vec(),
        }
    }
}

impl<S: Section> SectionCollection<S> {
    /// Index of the first section with this title
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.title() == title)
    }
}

/// Navigation direction along the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the last section
    Forward,
    /// Toward the first section
    Backward,
}

/// Index of the section in view, always within `[0, count - 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveIndex {
    value: usize,
    last: usize,
}

impl ActiveIndex {
    /// Start at the first of `count` sections
    pub fn new(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(NavError::NoSections);
        }
        Ok(Self {
            value: 0,
            last: count - 1,
        })
    }

    pub fn get(&self) -> usize {
        self.value
    }

    /// Highest valid index
    pub fn last(&self) -> usize {
        self.last
    }

    pub fn count(&self) -> usize {
        self.last + 1
    }

    /// Clamp a requested index into range
    pub fn clamp(&self, target: usize) -> usize {
        target.min(self.last)
    }

    /// Index one step in `direction`, clamped at either end
    pub fn stepped(&self, direction: Direction) -> usize {
        match direction {
            Direction::Forward => self.value.saturating_add(1).min(self.last),
            Direction::Backward => self.value.saturating_sub(1),
        }
    }

    /// Move to `target` (clamped) and return the new index
    pub fn set(&mut self, target: usize) -> usize {
        self.value = self.clamp(target);
        self.value
    }
}
