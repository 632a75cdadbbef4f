//! Abstract page driver.
//!
//! The harness is a thin contract over "navigate / find-one-element /
//! set-value / click / read-text / read-url / dispose", independent of any
//! specific browser implementation. [`MockDriver`] runs that contract
//! against an in-memory page model and backs the entire test suite; the
//! CDP implementation behind the `browser` feature drives real Chromium.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::locator::Locator;
use crate::result::{NavegarError, NavegarResult};

/// Contract between the session harness and a browser implementation.
///
/// Each operation is attempted exactly once; a bounded timeout is the only
/// abnormal termination. Implementations resolve locators strictly: zero
/// or multiple matches is [`NavegarError::ElementNotFound`].
#[async_trait]
pub trait PageDriver: Send {
    /// Load `url` as a full-page navigation
    async fn navigate(&mut self, url: &str) -> NavegarResult<()>;

    /// Resolve `locator` to one input element and write `value`
    async fn set_value(&mut self, locator: &Locator, value: &str) -> NavegarResult<()>;

    /// Resolve `locator` to one element and activate it
    async fn click(&mut self, locator: &Locator) -> NavegarResult<()>;

    /// Rendered text of the current page; pure read
    async fn page_text(&mut self) -> NavegarResult<String>;

    /// Current address; pure read
    async fn current_url(&mut self) -> NavegarResult<String>;

    /// Release the underlying browser handle
    async fn dispose(&mut self) -> NavegarResult<()>;
}

// ============================================================================
// In-memory page model
// ============================================================================

/// What activating an element does to the mock page state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickEffect {
    /// Navigate to another registered page (a redirecting submit)
    Goto(String),
    /// Replace the current page's rendered text (an in-place round-trip)
    RenderText(String),
}

/// One element in a mock page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockElement {
    id: Option<String>,
    name: Option<String>,
    path: Option<String>,
    enabled: bool,
    visible: bool,
    value: String,
    on_click: Option<ClickEffect>,
}

impl MockElement {
    fn empty() -> Self {
        Self {
            id: None,
            name: None,
            path: None,
            enabled: true,
            visible: true,
            value: String::new(),
            on_click: None,
        }
    }

    /// Element addressable by id
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::empty()
        }
    }

    /// Element addressable by name
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::empty()
        }
    }

    /// Element addressable by structural path
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::empty()
        }
    }

    /// Also give the element a name attribute
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Also make the element addressable by structural path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Mark the element as not enabled
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Mark the element as not visible
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Clicking navigates to `url`
    #[must_use]
    pub fn goto_on_click(mut self, url: impl Into<String>) -> Self {
        self.on_click = Some(ClickEffect::Goto(url.into()));
        self
    }

    /// Clicking replaces the page text with `text`
    #[must_use]
    pub fn render_on_click(mut self, text: impl Into<String>) -> Self {
        self.on_click = Some(ClickEffect::RenderText(text.into()));
        self
    }

    /// Current value of the element (written by `set_value`)
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn matches(&self, locator: &Locator) -> bool {
        use crate::locator::Strategy;
        let wanted = locator.value();
        match locator.strategy() {
            Strategy::Id => self.id.as_deref() == Some(wanted),
            Strategy::Name => self.name.as_deref() == Some(wanted),
            Strategy::XPath => self.path.as_deref() == Some(wanted),
        }
    }
}

/// One mock page: rendered text plus addressable elements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockPage {
    text: String,
    elements: Vec<MockElement>,
}

impl MockPage {
    /// Create a page with the given rendered text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            elements: Vec::new(),
        }
    }

    /// Add an element
    #[must_use]
    pub fn with_element(mut self, element: MockElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Rendered text of the page
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A set of mock pages keyed by absolute URL.
///
/// Cloned into each [`MockDriver`], so nothing a session does leaks into
/// the next session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageModel {
    pages: HashMap<String, MockPage>,
}

impl PageModel {
    /// Create an empty model
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page under an absolute URL
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, page: MockPage) -> Self {
        self.pages.insert(url.into(), page);
        self
    }

    /// Number of registered pages
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the model has no pages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

// ============================================================================
// Mock driver
// ============================================================================

/// In-memory [`PageDriver`] over a [`PageModel`]
#[derive(Debug)]
pub struct MockDriver {
    model: PageModel,
    current: Option<String>,
    disposed: bool,
}

impl MockDriver {
    /// Create a driver over an owned copy of the model
    #[must_use]
    pub fn new(model: PageModel) -> Self {
        Self {
            model,
            current: None,
            disposed: false,
        }
    }

    /// Whether `dispose` has run
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn page(&self, operation: &str) -> NavegarResult<&MockPage> {
        let url = self.current.as_ref().ok_or_else(|| NavegarError::NotOpen {
            operation: operation.to_string(),
        })?;
        self.model
            .pages
            .get(url)
            .ok_or_else(|| NavegarError::Page {
                message: format!("current page {url} vanished from the model"),
            })
    }

    fn resolve_one(page: &MockPage, locator: &Locator) -> NavegarResult<usize> {
        let matches: Vec<usize> = page
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.matches(locator))
            .map(|(i, _)| i)
            .collect();
        match matches.as_slice() {
            [index] => Ok(*index),
            other => Err(NavegarError::ElementNotFound {
                locator: locator.to_string(),
                matches: other.len(),
            }),
        }
    }

    fn check_interactable(element: &MockElement, locator: &Locator) -> NavegarResult<()> {
        if !element.visible {
            return Err(NavegarError::ElementNotInteractable {
                locator: locator.to_string(),
                reason: "not visible".to_string(),
            });
        }
        if !element.enabled {
            return Err(NavegarError::ElementNotInteractable {
                locator: locator.to_string(),
                reason: "disabled".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PageDriver for MockDriver {
    async fn navigate(&mut self, url: &str) -> NavegarResult<()> {
        if !self.model.pages.contains_key(url) {
            return Err(NavegarError::Navigation {
                url: url.to_string(),
                message: "no page registered at this address".to_string(),
            });
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn set_value(&mut self, locator: &Locator, value: &str) -> NavegarResult<()> {
        let url = self
            .current
            .clone()
            .ok_or_else(|| NavegarError::NotOpen {
                operation: "fill".to_string(),
            })?;
        let page = self.page("fill")?;
        let index = Self::resolve_one(page, locator)?;
        Self::check_interactable(&page.elements[index], locator)?;
        // Re-borrow mutably; the page existed above.
        if let Some(page) = self.model.pages.get_mut(&url) {
            page.elements[index].value = value.to_string();
        }
        Ok(())
    }

    async fn click(&mut self, locator: &Locator) -> NavegarResult<()> {
        let url = self
            .current
            .clone()
            .ok_or_else(|| NavegarError::NotOpen {
                operation: "click".to_string(),
            })?;
        let page = self.page("click")?;
        let index = Self::resolve_one(page, locator)?;
        Self::check_interactable(&page.elements[index], locator)?;
        let effect = page.elements[index].on_click.clone();
        match effect {
            Some(ClickEffect::Goto(target)) => self.navigate(&target).await,
            Some(ClickEffect::RenderText(text)) => {
                if let Some(page) = self.model.pages.get_mut(&url) {
                    page.text = text;
                }
                Ok(())
            }
            None => Ok(()),
        }
    }

    async fn page_text(&mut self) -> NavegarResult<String> {
        Ok(self.page("read page text")?.text.clone())
    }

    async fn current_url(&mut self) -> NavegarResult<String> {
        self.current
            .clone()
            .ok_or_else(|| NavegarError::NotOpen {
                operation: "read current URL".to_string(),
            })
    }

    async fn dispose(&mut self) -> NavegarResult<()> {
        self.disposed = true;
        self.current = None;
        Ok(())
    }
}
