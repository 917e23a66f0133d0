/*!
 * Page Engine
 * Theme catalog, page document model, section rendering, document
 * composition and the heuristic copy/theme assistant.
 */

pub mod assistant;
pub mod compose;
pub mod error;
pub mod page;
pub mod render;
pub mod theme;

pub use error::EngineError;
