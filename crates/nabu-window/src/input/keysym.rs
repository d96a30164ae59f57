//! Native key symbol values.
//!
//! Symbols use the X11 keysym numbering. Substrates without keysyms of their
//! own (winit) translate into this space so key tables stay platform-neutral.

/// Native key symbol code.
pub type Keysym = u32;

/// Returned when a key code has no symbol at the requested level.
pub const NO_SYMBOL: Keysym = 0;

pub const SPACE: Keysym = 0x0020;
pub const BACKSPACE: Keysym = 0xff08;
pub const TAB: Keysym = 0xff09;
pub const RETURN: Keysym = 0xff0d;
pub const PAUSE: Keysym = 0xff13;
pub const SCROLL_LOCK: Keysym = 0xff14;
pub const ESCAPE: Keysym = 0xff1b;

pub const HOME: Keysym = 0xff50;
pub const LEFT: Keysym = 0xff51;
pub const UP: Keysym = 0xff52;
pub const RIGHT: Keysym = 0xff53;
pub const DOWN: Keysym = 0xff54;
pub const PAGE_UP: Keysym = 0xff55;
pub const PAGE_DOWN: Keysym = 0xff56;
pub const END: Keysym = 0xff57;

pub const PRINT: Keysym = 0xff61;
pub const INSERT: Keysym = 0xff63;
pub const NUM_LOCK: Keysym = 0xff7f;
pub const KP_ENTER: Keysym = 0xff8d;
pub const KP_INSERT: Keysym = 0xff9e;

pub const F1: Keysym = 0xffbe;
pub const F2: Keysym = 0xffbf;
pub const F3: Keysym = 0xffc0;
pub const F4: Keysym = 0xffc1;
pub const F5: Keysym = 0xffc2;
pub const F6: Keysym = 0xffc3;
pub const F7: Keysym = 0xffc4;
pub const F8: Keysym = 0xffc5;
pub const F9: Keysym = 0xffc6;
pub const F10: Keysym = 0xffc7;
pub const F11: Keysym = 0xffc8;
pub const F12: Keysym = 0xffc9;

pub const SHIFT_L: Keysym = 0xffe1;
pub const SHIFT_R: Keysym = 0xffe2;
pub const CONTROL_L: Keysym = 0xffe3;
pub const CONTROL_R: Keysym = 0xffe4;
pub const CAPS_LOCK: Keysym = 0xffe5;
pub const ALT_L: Keysym = 0xffe9;
pub const ALT_R: Keysym = 0xffea;
pub const SUPER_L: Keysym = 0xffeb;
pub const SUPER_R: Keysym = 0xffec;
pub const DELETE: Keysym = 0xffff;
