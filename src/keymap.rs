//! Local key code to virtual-key translation.
//!
//! Local codes follow the GLFW scancode space the platform layer
//! reports; the output space is the fixed virtual-key table the remote
//! host expects. The mapping is total: function keys and numeric-keypad
//! digits translate as contiguous blocks, a table covers
//! punctuation/editing/navigation, and anything else passes through
//! unchanged as its own numeric value.

pub const KEY_SPACE: i32 = 32;
pub const KEY_APOSTROPHE: i32 = 39;
pub const KEY_COMMA: i32 = 44;
pub const KEY_MINUS: i32 = 45;
pub const KEY_PERIOD: i32 = 46;
pub const KEY_SLASH: i32 = 47;
pub const KEY_SEMICOLON: i32 = 59;
pub const KEY_EQUAL: i32 = 61;
pub const KEY_LEFT_BRACKET: i32 = 91;
pub const KEY_BACKSLASH: i32 = 92;
pub const KEY_RIGHT_BRACKET: i32 = 93;
pub const KEY_GRAVE_ACCENT: i32 = 96;
pub const KEY_WORLD_1: i32 = 161;
pub const KEY_ESCAPE: i32 = 256;
pub const KEY_ENTER: i32 = 257;
pub const KEY_TAB: i32 = 258;
pub const KEY_BACKSPACE: i32 = 259;
pub const KEY_INSERT: i32 = 260;
pub const KEY_DELETE: i32 = 261;
pub const KEY_RIGHT: i32 = 262;
pub const KEY_LEFT: i32 = 263;
pub const KEY_DOWN: i32 = 264;
pub const KEY_UP: i32 = 265;
pub const KEY_PAGE_UP: i32 = 266;
pub const KEY_PAGE_DOWN: i32 = 267;
pub const KEY_HOME: i32 = 268;
pub const KEY_END: i32 = 269;
pub const KEY_CAPS_LOCK: i32 = 280;
pub const KEY_SCROLL_LOCK: i32 = 281;
pub const KEY_NUM_LOCK: i32 = 282;
pub const KEY_PRINT_SCREEN: i32 = 283;
pub const KEY_F1: i32 = 290;
pub const KEY_F12: i32 = 301;
pub const KEY_KP_0: i32 = 320;
pub const KEY_KP_9: i32 = 329;
pub const KEY_KP_DECIMAL: i32 = 330;
pub const KEY_KP_DIVIDE: i32 = 331;
pub const KEY_KP_MULTIPLY: i32 = 332;
pub const KEY_KP_SUBTRACT: i32 = 333;
pub const KEY_KP_ADD: i32 = 334;
pub const KEY_KP_ENTER: i32 = 335;
pub const KEY_LEFT_SHIFT: i32 = 340;
pub const KEY_LEFT_CONTROL: i32 = 341;
pub const KEY_LEFT_ALT: i32 = 342;
pub const KEY_LEFT_SUPER: i32 = 343;
pub const KEY_RIGHT_SHIFT: i32 = 344;
pub const KEY_RIGHT_CONTROL: i32 = 345;
pub const KEY_RIGHT_ALT: i32 = 346;
pub const KEY_RIGHT_SUPER: i32 = 347;

/// One past the highest swept local key code. The quiescence pass
/// sweeps key-up events over `KEY_SPACE..KEY_LAST`.
pub const KEY_LAST: i32 = 348;

/// Translate a local key code into the remote virtual-key space.
///
/// Total function: unknown codes come back unchanged.
pub fn virtual_key(key: i32) -> i16 {
    if (KEY_F1..=KEY_F12).contains(&key) {
        return (key - KEY_F1) as i16 + 0x70;
    }

    if (KEY_KP_0..=KEY_KP_9).contains(&key) {
        return (key - KEY_KP_0) as i16 + 0x60;
    }

    match key {
        KEY_BACKSPACE => 0x08,
        KEY_TAB => 0x09,
        KEY_ENTER | KEY_KP_ENTER => 0x0D,
        KEY_CAPS_LOCK => 0x14,
        KEY_ESCAPE => 0x1B,
        KEY_PAGE_UP => 0x21,
        KEY_PAGE_DOWN => 0x22,
        KEY_END => 0x23,
        KEY_HOME => 0x24,
        KEY_LEFT => 0x25,
        KEY_UP => 0x26,
        KEY_RIGHT => 0x27,
        KEY_DOWN => 0x28,
        KEY_PRINT_SCREEN => 0x2C,
        KEY_INSERT => 0x2D,
        KEY_DELETE => 0x2E,
        KEY_LEFT_SUPER => 0x5B,
        KEY_RIGHT_SUPER => 0x5C,
        KEY_KP_MULTIPLY => 0x6A,
        KEY_KP_ADD => 0x6B,
        KEY_KP_SUBTRACT => 0x6D,
        KEY_KP_DECIMAL => 0x6E,
        KEY_KP_DIVIDE => 0x6F,
        KEY_NUM_LOCK => 0x90,
        KEY_SCROLL_LOCK => 0x91,
        KEY_LEFT_SHIFT => 0x00A0,
        KEY_RIGHT_SHIFT => 0x00A1,
        KEY_LEFT_CONTROL => 0x00A2,
        KEY_RIGHT_CONTROL => 0x00A3,
        KEY_LEFT_ALT => 0x00A4,
        KEY_RIGHT_ALT => 0x00A5,
        KEY_SEMICOLON => 0x00BA,
        KEY_EQUAL => 0x00BB,
        KEY_COMMA => 0x00BC,
        KEY_MINUS => 0x00BD,
        KEY_PERIOD => 0x00BE,
        KEY_SLASH => 0x00BF,
        KEY_GRAVE_ACCENT => 0x00C0,
        KEY_LEFT_BRACKET => 0x00DB,
        KEY_BACKSLASH => 0x00DC,
        KEY_RIGHT_BRACKET => 0x00DD,
        KEY_APOSTROPHE => 0x00DE,
        // OEM_102, the extra key on ISO layouts
        KEY_WORLD_1 => 0x00E2,
        other => other as i16,
    }
}
