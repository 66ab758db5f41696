//! The navigation state machine over home and the named categories.

use aac_store::KeyedStore;
use tracing::debug;

use crate::category::Category;
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::names::{validate_category_name, validate_image_loc};

/// An AAC board: a home page of category selectors, the categories they
/// open, and a cursor naming the category currently shown.
///
/// The cursor is empty while home is shown. Two invariants hold at all
/// times:
/// - Every home entry `selector image -> name` has `name` registered.
/// - A non-empty cursor names a registered category.
///
/// Both are established when a category is declared and when the cursor
/// moves; categories are never removed.
#[derive(Clone, Debug)]
pub struct BoardController {
    pub(crate) home: Category,
    pub(crate) categories: KeyedStore<String, Category>,
    cursor: String,
    pub(crate) config: BoardConfig,
}

impl BoardController {
    /// Create an empty board with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    /// Create an empty board with the given configuration.
    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            home: Category::with_capacity("", config.initial_capacity),
            categories: KeyedStore::with_capacity(config.initial_capacity),
            cursor: String::new(),
            config,
        }
    }

    // ---------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------

    /// Act on a tapped image.
    ///
    /// Inside a category, an image of that category returns its text and
    /// the cursor stays put. Otherwise the image is looked up on the home
    /// page: a selector moves the cursor into its category and returns an
    /// empty string (nothing to speak). This lets a category image be
    /// re-selected while another category is shown.
    ///
    /// Fails with [`BoardError::ImageNotFound`] if neither the active
    /// category nor home knows the image; the cursor is unchanged.
    pub fn select(&mut self, image: &str) -> Result<String> {
        if !self.cursor.is_empty() {
            let active = self.active()?;
            if active.has_image(image) {
                return Ok(active.select(image)?.to_string());
            }
        }

        let name = self.home.select(image)?.to_string();
        if !self.categories.has_key(name.as_str()) {
            return Err(BoardError::UnknownCategory { name });
        }
        debug!(image, category = %name, "entered category");
        self.cursor = name;
        Ok(String::new())
    }

    /// Return to the home page.
    pub fn reset(&mut self) {
        self.cursor.clear();
    }

    /// Name of the active category, or `""` on the home page.
    pub fn category(&self) -> &str {
        &self.cursor
    }

    pub fn is_home(&self) -> bool {
        self.cursor.is_empty()
    }

    // ---------------------------------------------------------------
    // Queries on the active page
    // ---------------------------------------------------------------

    /// Image locations shown on the active page, in insertion order.
    pub fn image_locs(&self) -> Vec<String> {
        self.active()
            .map(Category::image_locs)
            .unwrap_or_default()
    }

    /// Whether the active page shows `image`.
    pub fn has_image(&self, image: &str) -> bool {
        self.active().is_ok_and(|page| page.has_image(image))
    }

    // ---------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------

    /// Add an image to the active page.
    ///
    /// Inside a category this binds a leaf image to the text it speaks. On
    /// the home page every image is a selector, so `text` is taken as a
    /// category name and the call is a [`declare_category`].
    ///
    /// [`declare_category`]: Self::declare_category
    pub fn add_item(&mut self, image: &str, text: &str) -> Result<()> {
        if self.cursor.is_empty() {
            return self.declare_category(image, text);
        }
        let active = self
            .categories
            .get_mut(self.cursor.as_str())
            .map_err(|_| BoardError::UnknownCategory {
                name: self.cursor.clone(),
            })?;
        active.add_item(image, text)
    }

    /// Bind the home selector `image` to the category `name`, registering
    /// an empty category first if `name` is new.
    ///
    /// Declaring an already registered name keeps its items, so a category
    /// may be reached from more than one selector.
    pub fn declare_category(&mut self, image: &str, name: &str) -> Result<()> {
        validate_image_loc(image)?;
        validate_category_name(name)?;

        if !self.categories.has_key(name) {
            let category = Category::with_capacity(name, self.config.initial_capacity);
            self.categories.set(name.to_string(), category)?;
            debug!(category = name, "declared category");
        }
        self.home.add_item(image, name)
    }

    // ---------------------------------------------------------------
    // Read access
    // ---------------------------------------------------------------

    /// The home page.
    pub fn home(&self) -> &Category {
        &self.home
    }

    /// A registered category by name.
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.get(name).ok()
    }

    /// All registered categories, in declaration order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    fn active(&self) -> Result<&Category> {
        if self.cursor.is_empty() {
            return Ok(&self.home);
        }
        self.categories
            .get(self.cursor.as_str())
            .map_err(|_| BoardError::UnknownCategory {
                name: self.cursor.clone(),
            })
    }
}

impl Default for BoardController {
    fn default() -> Self {
        Self::new()
    }
}
