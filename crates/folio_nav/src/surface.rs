//! Navigation surface: position indicators and navbar links
//!
//! Both are derived from the section collection and the active index on every
//! render. Choosing one issues a direct navigation request, which shares the
//! cooldown with gesture input.

use folio_core::modal::ModalGate;
use folio_core::time::Timestamp;

use crate::arbiter::{InputOutcome, NavState};
use crate::section::{Section, SectionCollection};

/// One position indicator dot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
    /// Accessible label, e.g. "Go to section 3"
    pub label: String,
}

/// One navbar link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub index: usize,
    pub title: String,
    pub active: bool,
}

/// Indicators, navbar links and the mobile menu
#[derive(Debug)]
pub struct NavigationSurface<S> {
    sections: SectionCollection<S>,
    modal: ModalGate,
    menu_open: bool,
}

impl<S> NavigationSurface<S> {
    pub fn new(sections: SectionCollection<S>, modal: ModalGate) -> Self {
        Self {
            sections,
            modal,
            menu_open: false,
        }
    }

    pub fn sections(&self) -> &SectionCollection<S> {
        &self.sections
    }

    /// One indicator per section; none while the modal is open
    pub fn indicators(&self, active: usize) -> Vec<Indicator> {
        if self.modal.is_open() {
            return Vec::new();
        }
        (0..self.sections.len())
            .map(|index| Indicator {
                index,
                active: index == active,
                label: format!("Go to section {}", index + 1),
            })
            .collect()
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Toggle the mobile menu and return its new state
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Direct navigation from an indicator or link
    ///
    /// The mobile menu closes whether or not the request is accepted.
    pub fn request(&mut self, target: usize, now: Timestamp, state: &mut NavState) -> InputOutcome {
        self.close_menu();
        if self.modal.is_open() {
            return InputOutcome::Ignored;
        }
        state.try_navigate(target, now)
    }
}

impl<S: Section> NavigationSurface<S> {
    /// One link per section, titled after it
    pub fn nav_links(&self, active: usize) -> Vec<NavLink> {
        self.sections
            .iter()
            .enumerate()
            .map(|(index, section)| NavLink {
                index,
                title: section.title().to_string(),
                active: index == active,
            })
            .collect()
    }
}
