//! Page setup
//!
//! Paper size and page margins, in points. Loadable from JSON so a caller
//! can switch paper size without code changes; missing fields keep their
//! A4 defaults.

use crate::{LayoutError, Result};
use serde::{Deserialize, Serialize};

/// A4 width in points
pub const A4_WIDTH: f64 = 595.28;
/// A4 height in points
pub const A4_HEIGHT: f64 = 841.89;

/// Paper size and margins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSetup {
    pub width: f64,
    pub height: f64,
    /// Margin on all four sides of the content area
    pub margin: f64,
    /// Distance from the bottom edge of the page to the bottom of the footer
    pub footer_offset: f64,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageSetup {
    /// A4 portrait with 40pt margins
    pub fn a4() -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin: 40.0,
            footer_offset: 40.0,
        }
    }

    /// Parse and validate a page setup from JSON
    ///
    /// # Example
    /// ```
    /// use layout::PageSetup;
    ///
    /// let setup = PageSetup::from_json(r#"{ "width": 612, "height": 792 }"#).unwrap();
    /// assert_eq!(setup.margin, 40.0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let setup: PageSetup = serde_json::from_str(json)?;
        setup.validate()?;
        Ok(setup)
    }

    /// Check that the content area is non-empty
    pub fn validate(&self) -> Result<()> {
        let values = [self.width, self.height, self.margin, self.footer_offset];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(LayoutError::Config(
                "page dimensions must be finite".to_string(),
            ));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(LayoutError::Config(format!(
                "page size must be positive, got {} x {}",
                self.width, self.height
            )));
        }
        if self.margin < 0.0 || self.footer_offset < 0.0 {
            return Err(LayoutError::Config(
                "margins must not be negative".to_string(),
            ));
        }
        if self.content_width() <= 0.0 || self.content_bottom() <= self.margin {
            return Err(LayoutError::Config(format!(
                "margin {} leaves no room on a {} x {} page",
                self.margin, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Width between the left and right margins
    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y (from the top) content may reach when there is no footer
    pub fn content_bottom(&self) -> f64 {
        self.height - self.margin
    }
}
