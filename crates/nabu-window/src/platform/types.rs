use std::fmt;

/// Opaque native window handle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NativeWindow(pub u64);

/// Opaque rendering-context handle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ContextHandle(pub u64);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ConfigId(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VisualId(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ColormapId(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CursorId(pub u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Atom(pub u32);

impl fmt::Display for NativeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Display for ContextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Windowing-protocol version. Orders by major, then minor.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct ProtocolVersion {
    pub major: u32,
    pub minor: u32,
}

impl ProtocolVersion {
    /// Surface configurations need protocol 1.3.
    pub const MINIMUM: ProtocolVersion = ProtocolVersion { major: 1, minor: 3 };

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

/// Buffer attributes a drawable surface must satisfy.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SurfaceAttributes {
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub alpha_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    pub double_buffered: bool,
    /// Sample buffers are requested only when `samples > 0`.
    pub sample_buffers: bool,
    pub samples: u32,
}

impl SurfaceAttributes {
    /// RGBA 8/8/8/8, depth 24, stencil 8, double-buffered, `msaa` samples.
    pub fn with_msaa(msaa: u32) -> Self {
        Self {
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 8,
            depth_bits: 24,
            stencil_bits: 8,
            double_buffered: true,
            sample_buffers: msaa > 0,
            samples: msaa,
        }
    }
}

/// Version and flags requested through the versioned context path.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ContextRequest {
    pub major: u32,
    pub minor: u32,
    pub debug: bool,
}

impl ContextRequest {
    pub const fn modern(debug: bool) -> Self {
        Self { major: 3, minor: 0, debug }
    }

    /// Lowest versioned request; implementations return their newest
    /// context compatible with it.
    pub const fn legacy(debug: bool) -> Self {
        Self { major: 1, minor: 0, debug }
    }
}

/// Parameters for native window creation.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub parent: NativeWindow,
    pub visual: VisualId,
    pub colormap: ColormapId,
    pub width: u32,
    pub height: u32,
}

/// Window position and size in pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Raw events as delivered by a display, before classification.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeEvent {
    /// Surface exposed or resized; carries the current surface extent.
    Expose { width: u32, height: u32 },

    KeyPress { keycode: u32, shift: bool },
    KeyRelease { keycode: u32, shift: bool },

    /// Button index: 1 = left, 2 = middle, 3 = right.
    ButtonPress { button: u32 },
    ButtonRelease { button: u32 },

    Motion { x: f32, y: f32 },
    Wheel { delta: f32 },

    FocusIn,
    FocusOut,

    ClientMessage { atom: Atom },

    /// Anything the core does not interpret, by native type code.
    Other(u32),
}
