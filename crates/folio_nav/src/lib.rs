//! Folio Navigation
//!
//! Horizontal section navigation for a single-page portfolio: full-viewport
//! sections sit side by side on one strip and exactly one is in view.
//!
//! # Features
//!
//! - **Input Arbitration**: Wheel, touch swipe and arrow keys feed one active
//!   index through a shared cooldown
//! - **Scroll Deference**: Wheel input scrolls a tall section before it navigates
//! - **Modal Gate**: Gesture input is ignored while an overlay is open
//! - **Strip Layout**: Spring or eased motion toward `-index * section_width`
//! - **Navigation Surface**: Position indicators, navbar links and mobile menu
//! - **Window Attachment**: Listeners registered on a shared dispatcher and
//!   removed when the [`Attachment`] is dropped
//!
//! # Example
//!
//! ```rust
//! use folio_core::events::{Event, KeyCode};
//! use folio_core::modal::ModalGate;
//! use folio_core::time::Timestamp;
//! use folio_nav::{InputOutcome, NavConfig, SectionCollection, SectionNavigator};
//!
//! let modal = ModalGate::new();
//! let mut nav = SectionNavigator::new(
//!     SectionCollection::portfolio(),
//!     &NavConfig::default(),
//!     modal.clone(),
//! )
//! .unwrap();
//! nav.on_resize(800.0, 600.0);
//!
//! let mut key = Event::key_down(KeyCode::RIGHT, Timestamp::from_millis(0));
//! assert_eq!(nav.handle_event(&mut key), InputOutcome::Navigated { from: 0, to: 1 });
//! assert_eq!(nav.target_offset(), -800.0);
//!
//! modal.set_open(true);
//! let mut key = Event::key_down(KeyCode::RIGHT, Timestamp::from_millis(1_000));
//! assert_eq!(nav.handle_event(&mut key), InputOutcome::Ignored);
//! ```

pub mod arbiter;
pub mod config;
pub mod controller;
pub mod error;
pub mod guard;
pub mod layout;
pub mod navigator;
pub mod scroll;
pub mod section;
pub mod surface;
pub mod viewport;

pub use arbiter::{InputArbiter, InputOutcome, NavState};
pub use config::{NavConfig, TransitionConfig, TransitionKind};
pub use controller::{Attachment, SectionController};
pub use error::{NavError, Result};
pub use guard::{GuardState, ScrollGuard};
pub use layout::{compute_offset, LayoutEngine, TransitionCurve};
pub use navigator::SectionNavigator;
pub use scroll::{NoScroll, ScrollMetrics, ScrollRegistry, SectionScroll};
pub use section::{ActiveIndex, Direction, PortfolioSection, Section, SectionCollection};
pub use surface::{Indicator, NavLink, NavigationSurface};
pub use viewport::{ViewportMetrics, ViewportTracker};
