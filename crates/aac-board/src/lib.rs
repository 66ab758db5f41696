//! Category navigation for an AAC (augmentative and alternative
//! communication) board.
//!
//! A board is a home page of selector images, each opening a named category
//! of images that speak a short text when tapped. The [`BoardController`]
//! keeps a cursor on the category being shown and answers taps with the text
//! to speak, or with an empty string when the tap navigated instead.
//!
//! # Architecture
//!
//! - **Home** is a [`Category`] with an empty name whose entries map selector
//!   images to category names.
//! - **Categories** are registered by name in a
//!   [`KeyedStore`](aac_store::KeyedStore) and map leaf images to text.
//! - **The cursor** is empty on the home page and otherwise names a
//!   registered category.
//! - **Mapping files** hold the whole board in a line-oriented text format
//!   (see [`mapping`]).
//!
//! # Modules
//!
//! - [`error`]: Error types for board operations
//! - [`category`]: A single page of image → text entries
//! - [`board`]: The [`BoardController`] state machine
//! - [`mapping`]: Parsing and formatting mapping-file lines
//! - [`names`]: Validation of image locations, names and text
//! - [`config`]: [`BoardConfig`] and the import/export [`ErrorPolicy`]

pub mod board;
pub mod category;
pub mod config;
pub mod error;
pub mod mapping;
pub mod names;
mod persist;

pub use board::BoardController;
pub use category::Category;
pub use config::{BoardConfig, ErrorPolicy};
pub use error::{BoardError, Result};
pub use mapping::{parse_line, MappingLine};
pub use names::{validate_category_name, validate_image_loc, validate_text};
