//! # qrbatch
//!
//! QR code generation for single URLs or whole spreadsheets, with custom
//! colors, centered logos and ZIP packaging of bulk output.
//!
//! ## Features
//!
//! - **Single URL**: encode at error correction level H, render with any
//!   foreground/background palette, optionally stamp a centered logo, get an
//!   image or PNG bytes back
//! - **Bulk**: feed an `.xlsx` sheet with `Name`, `URL` and `Category`
//!   columns and receive one deflate-compressed ZIP laid out as
//!   `<Category>/<Name>.png`
//! - **Logo stamping**: logos are scaled to 20% of the symbol width and
//!   alpha-blended; level H redundancy keeps the occluded symbol decodable
//!
//! ## Quick Start
//!
//! ### Single URL
//!
//! ```rust
//! use qrbatch::{Color, QrRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let png = QrRequest::new("https://example.com")
//!     .foreground("#0b3d91".parse::<Color>()?)
//!     .png()?;
//!
//! assert_eq!(&png[1..4], &b"PNG"[..]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Bulk run
//!
//! ```rust
//! use qrbatch::{bulk, BulkDataset, BulkOptions, BulkRow};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = BulkDataset::from_rows(vec![
//!     BulkRow::new("Coffee Shop", "https://example.com/coffee", "Food"),
//!     BulkRow::new("My Site", "https://example.com", "Tech"),
//! ]);
//!
//! let archive = bulk::run(&dataset, &BulkOptions::default())?;
//! assert_eq!(archive.count, 2);
//! # Ok(())
//! # }
//! ```
//!
//! Spreadsheets load with [`BulkDataset::from_xlsx_path`] or
//! [`BulkDataset::from_xlsx_bytes`]; datasets missing a required column are
//! rejected wholesale before any row is processed.

pub mod bulk;
pub mod color;
pub mod compose;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod render;

pub use bulk::{BulkArchive, BulkDataset, BulkOptions, BulkRow, REQUIRED_COLUMNS};
pub use color::Color;
pub use compose::overlay_logo;
pub use encode::{encode, Symbol};
pub use error::{Error, QrResult, Stage};
pub use pipeline::QrRequest;
pub use render::{DEFAULT_MODULE_SIZE, QUIET_ZONE};
