//! Turns a computed-style dump of a live site into an authored-looking
//! production stylesheet.
//!
//! Stage one extracts the visual properties of every element, drops browser
//! and viewport defaults and groups elements by selector. Stage two recovers
//! authored idioms from their computed signatures and tidies the result.

pub mod assets;
pub mod config;
pub mod error;
pub mod generate;
pub mod snapshot;

pub mod parser {
    pub mod declarations;
    pub mod rule_text;
}

pub mod style {
    pub mod assemble;
    pub mod clean;
    pub mod extract;
    pub mod idiom;
    pub mod properties;
    pub mod rule;
    pub mod selectors;
}

pub use assets::StaticBlocks;
pub use config::{BuildConfig, Thresholds};
pub use error::MintError;
pub use generate::{stylemint, BuildReport, Production};
pub use snapshot::ElementSnapshot;
