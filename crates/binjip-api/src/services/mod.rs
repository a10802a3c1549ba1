mod render;

pub use render::{extract_form, RenderService};
