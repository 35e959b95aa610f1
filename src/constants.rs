// DOM hooks and pointer tuning for the web front-end.

pub const CANVAS_ID: &str = "tree-canvas";
pub const GALLERY_ID: &str = "gallery";
pub const GALLERY_STRIP_ID: &str = "gallery-strip";
pub const GALLERY_CLOSE_ID: &str = "gallery-close";

pub const HIDDEN_CLASS: &str = "hidden";

// A press that moves further than this (CSS px) is a drag, not a click
pub const CLICK_SLOP_PX: f32 = 6.0;
