pub mod clock;
pub mod event;
pub mod frame;
pub mod framebuffer;
pub mod geometry;
pub mod gpu_context;
pub mod gui_driver;
pub mod input;
pub mod keys;
pub mod readback;
pub mod session;
pub mod style;
pub mod translator;

pub use clock::{FrameClock, MIN_FRAME_DELTA};
pub use event::{
    KeyEvent, PointerButtonEvent, PointerMoveEvent, RemoteEvent, ResizeEvent, Touch,
};
pub use frame::Frame;
pub use framebuffer::{FramebufferManager, FramebufferTarget, Viewport};
pub use geometry::{sanitize_ratio, DisplayGeometry, RGB_BYTES_PER_PIXEL};
pub use gpu_context::{GpuContext, TargetConfig};
pub use gui_driver::{DrawList, GuiDriver};
pub use input::{InputState, ModifierFlags, RawInputBuilder, BUTTON_SLOTS};
pub use keys::NamedKey;
pub use readback::{
    flip_vertical, pack_rgb, padded_bytes_per_row, to_top_left, ChannelOrder, ReadbackOrigin,
    RGBA_BYTES_PER_PIXEL,
};
pub use session::{reallocation_size, GuiSession};
pub use style::{is_valid_scale, size_attributes, StyleScaler};
pub use translator::{resolve_pixel_ratio, translate, Transition};
