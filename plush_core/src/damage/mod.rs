//! Damage resolution - tool activations and DoT ticks against the plush

mod resolution;
mod result;

pub use resolution::{
    apply_damage, apply_resolution, resolve_amount, resolve_tool, roll_tool_amount, Resolution,
};
pub use result::HitResult;
