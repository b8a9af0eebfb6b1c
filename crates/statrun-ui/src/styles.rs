//! Ayu color theme and styling functions for statrun CLI output.
//!
//! Uses the Ayu Dark color palette. Only results and errors get semantic
//! color; parameter types are muted and operation names use the accent.
//! Color source: <https://github.com/ayu-theme/ayu-colors>

use owo_colors::OwoColorize;
use statrun_core::{InvokeError, Operation, ParameterSpec, Value};

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

pub const ICON_FAIL: &str = "\u{2716}"; // ✖

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when color is supported
// ---------------------------------------------------------------------------

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Core semantic render helpers
// ---------------------------------------------------------------------------

/// Renders text with pass (green) styling.
pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

/// Renders text with warning (yellow) styling.
pub fn render_warn(s: &str) -> String {
    color_str(s, WARN)
}

/// Renders text with fail (red) styling.
pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

/// Renders text with muted (gray) styling.
pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

/// Renders a section header in uppercase with accent color and bold.
pub fn render_category(s: &str) -> String {
    color_bold_str(&s.to_uppercase(), ACCENT)
}

// ---------------------------------------------------------------------------
// Domain renderers
// ---------------------------------------------------------------------------

/// `x: int`, or `z_lower?: float` for an optional parameter, with the type muted.
pub fn render_parameter(spec: &ParameterSpec) -> String {
    let marker = if spec.optional { "?" } else { "" };
    format!("{}{marker}: {}", spec.name, render_muted(spec.kind.as_str()))
}

/// `name(a: int, b?: float)` with the operation name in the accent color.
pub fn render_signature(operation: &Operation) -> String {
    let params: Vec<String> = operation
        .schema()
        .params()
        .iter()
        .map(render_parameter)
        .collect();
    format!(
        "{}({})",
        color_bold_str(operation.name(), ACCENT),
        params.join(", ")
    )
}

/// A formula result, rounded to `precision` decimals when given.
pub fn render_value(value: &Value, precision: Option<usize>) -> String {
    render_pass(&value.format(precision))
}

/// `✖ <message> [kind]` for a failed invocation.
pub fn render_error(err: &InvokeError) -> String {
    format!(
        "{} {} {}",
        color_str(ICON_FAIL, FAIL),
        render_fail(&err.to_string()),
        render_muted(&format!("[{}]", err.kind()))
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
