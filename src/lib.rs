//! Graphic Core - Composable 2D Pictures
//!
//! # The Algebra
//! 1. Primitives are filled shapes with a natural anchor
//! 2. `compose` joins two graphics on their anchors
//! 3. `pin` moves the anchor to a named point of the bounds
//! 4. `rotate` turns a graphic around its anchor
//! 5. Everything else (`beside`, `above`, `overlay`) is built from these
//!
//! Graphics are immutable and cheap to share. Equality compares pixels.

pub mod color;
pub mod config;
pub mod debug;
pub mod error;
pub mod export;
pub mod graphic;
pub mod hashing;
pub mod json;
pub mod operations;
pub mod outline;
pub mod point;
pub mod point_names;
pub mod primitives;
pub mod print;
pub mod render;
pub mod text;
pub mod validation;

pub use color::{hsl_color, hsv_color, rgb_color, rgba_color, Color};
pub use config::{Config, ConfigError};
pub use debug::add_debug_info;
pub use error::{GraphicError, Result};
pub use export::{data_uri, render_frames, render_png, save_png, ExportError, ExportedImage};
pub use graphic::{Graphic, Kind, Shape};
pub use hashing::{fingerprint, sha256_hex, PixelKey};
pub use json::{from_json_str, to_json_string, GraphicSpec, JsonError};
pub use operations::{
    above, beside, compose, graphic_height, graphic_size, graphic_width, is_zero_area, overlay,
    pin, pin_at, rotate,
};
pub use point::{point, translate, vector, Point, Vector};
pub use point_names::Anchor;
pub use primitives::{
    circular_sector, ellipse, empty_graphic, rectangle, text, text_with, triangle,
};
pub use print::{print_expression, Locale};
pub use render::{render, to_pixmap, CanvasError};
pub use text::{FontBook, GlyphSource};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
