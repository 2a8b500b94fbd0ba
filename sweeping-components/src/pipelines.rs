//! Draw pipelines backing the components.
//!
//! A pipeline turns component draw commands into calls on a host
//! [`Canvas`](sweeping_ui::Canvas), or into packed instance data for hosts that
//! rasterize arcs on the GPU.

pub mod progress_arc;
