//! A single flat catalog of images and the text each one speaks.

use aac_store::{KeyedStore, DEFAULT_CAPACITY};

use crate::error::{BoardError, Result};
use crate::names::{validate_image_loc, validate_text};

/// One page of the board: image locations mapped to text, in the order the
/// images were added.
///
/// The home category has an empty name and maps selector images to category
/// names. Every other category maps leaf images to spoken text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    name: String,
    items: KeyedStore<String, String>,
}

impl Category {
    /// Create an empty category with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, DEFAULT_CAPACITY)
    }

    /// Create an empty category whose store starts with room for `capacity`
    /// images.
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            items: KeyedStore::with_capacity(capacity),
        }
    }

    /// Create the unnamed home category.
    pub fn home() -> Self {
        Self::new("")
    }

    /// The category's name; empty for home.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind `image` to `text`, replacing any text it already had.
    ///
    /// Fails with [`BoardError::InvalidName`] if either value could not be
    /// written to a mapping file.
    pub fn add_item(&mut self, image: &str, text: &str) -> Result<()> {
        validate_image_loc(image)?;
        validate_text(text)?;
        self.items.set(image.to_string(), text.to_string())?;
        Ok(())
    }

    /// The text bound to `image`.
    pub fn select(&self, image: &str) -> Result<&str> {
        self.items
            .get(image)
            .map(String::as_str)
            .map_err(|_| BoardError::ImageNotFound {
                image: image.to_string(),
            })
    }

    pub fn has_image(&self, image: &str) -> bool {
        self.items.has_key(image)
    }

    /// All image locations, in insertion order.
    pub fn image_locs(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    /// `(image, text)` pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
