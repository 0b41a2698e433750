//! Path handling: normalization of search directories and the file locator.
//!
//! # Examples
//!
//! ```no_run
//! use strata::path::{FileLocator, SearchRequest};
//!
//! let config = FileLocator::locate(
//!     &SearchRequest::new("strata.conf").with_dirs(["~/.strata", "~", "/etc/strata", "/etc"]),
//! )
//! .unwrap();
//! println!("{}", config.display());
//! ```

pub mod locator;
pub mod normalize;

pub use locator::{EntryKind, FileLocator, SearchRequest};
