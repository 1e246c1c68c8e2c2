//! Scripted input scenarios

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// A section strip, a starting viewport and the steps to replay against it
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub sections: SectionList,
    #[serde(default)]
    pub viewport: ViewportSize,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid scenario {}", path.display()))
    }
}

/// Either a section count or explicit titles
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SectionList {
    Count(usize),
    Titles(Vec<String>),
}

impl Default for SectionList {
    fn default() -> Self {
        SectionList::Titles(
            ["Home", "About", "Projects", "Experience", "Contact"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }
}

impl SectionList {
    /// Section titles; counted sections are named "Section 1", "Section 2", ...
    pub fn titles(&self) -> Vec<String> {
        match self {
            SectionList::Count(count) => (1..=*count).map(|n| format!("Section {n}")).collect(),
            SectionList::Titles(titles) => titles.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

fn default_offset_tolerance() -> f32 {
    0.5
}

/// One scripted action or expectation
///
/// Scenario time starts at zero and only moves during `wait`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Vertical wheel delta; positive scrolls down
    Wheel { delta_y: f32 },
    /// Touch start at `from_x`, touch end at `to_x`
    TouchSwipe { from_x: f32, to_x: f32 },
    /// Key press by DOM key name, e.g. "ArrowRight"
    Key { key: String },
    ClickIndicator { index: usize },
    /// Choose the navbar link with this title
    ClickLink { title: String },
    ToggleMenu,
    Resize { width: u32, height: u32 },
    Modal { open: bool },
    /// Publish a section's vertical scroll position
    Scroll {
        section: usize,
        scroll_top: f32,
        scroll_height: f32,
        client_height: f32,
    },
    /// Advance time, ticking the strip animation every frame
    Wait { ms: u64 },
    ExpectIndex { index: usize },
    /// Compare the rendered strip offset
    ExpectOffset {
        offset: f32,
        #[serde(default = "default_offset_tolerance")]
        tolerance: f32,
    },
    ExpectMenu { open: bool },
}

impl ScenarioStep {
    /// Step name as written in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Wheel { .. } => "wheel",
            ScenarioStep::TouchSwipe { .. } => "touch_swipe",
            ScenarioStep::Key { .. } => "key",
            ScenarioStep::ClickIndicator { .. } => "click_indicator",
            ScenarioStep::ClickLink { .. } => "click_link",
            ScenarioStep::ToggleMenu => "toggle_menu",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::Modal { .. } => "modal",
            ScenarioStep::Scroll { .. } => "scroll",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::ExpectIndex { .. } => "expect_index",
            ScenarioStep::ExpectOffset { .. } => "expect_offset",
            ScenarioStep::ExpectMenu { .. } => "expect_menu",
        }
    }
}
