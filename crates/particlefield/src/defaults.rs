/// Fixed window geometry and title from the original demo; `--size` can
/// override the geometry, the title is not configurable.
pub const SURFACE_WIDTH: u32 = 800;
pub const SURFACE_HEIGHT: u32 = 600;
pub const WINDOW_TITLE: &str = "Dynamic OpenGL Shader";
