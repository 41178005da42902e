//! Pure dialog geometry.
//!
//! Everything here is a function of the host surface size: no display tree,
//! no rendering. The dialog is designed against a 1280-wide reference
//! resolution and scaled by the width ratio; the vertical walk truncates to
//! whole pixels at each step so positions stay stable across frame-rate and
//! rounding differences.

use serde::{Deserialize, Serialize};

/// Width the metric constants below are expressed against.
pub const REFERENCE_WIDTH: f64 = 1280.0;

/// Minimum height/width ratio the dialog fits into. The dialog occupies
/// roughly 65% of the screen height at 16:9, i.e. about 37% of the width;
/// 0.4 leaves margin.
pub const MIN_ASPECT_RATIO: f64 = 0.4;

const TITLE_FONT_SIZE: f64 = 32.0;
const BODY_FONT_SIZE: f64 = 28.0;
const LINE_MARGIN_RATE: f64 = 0.3;
const LINE_HEIGHT_RATE: f64 = 1.0 + LINE_MARGIN_RATE;
const TITLE_TOP_MARGIN: f64 = 80.0;
const TITLE_BOTTOM_MARGIN: f64 = 32.0;
const BUTTON_TOP_MARGIN: f64 = 42.0;
const BUTTON_WIDTH: f64 = 360.0;
const BUTTON_HEIGHT: f64 = 82.0;
const BUTTON_BOTTOM_MARGIN: f64 = 72.0;
const DIALOG_WIDTH: f64 = 960.0;
const TEXT_X: f64 = 80.0;
const TEXT_WIDTH: f64 = 800.0;

/// Whether a surface of the given size can host the dialog at all.
pub fn fits_surface(width: u32, height: u32) -> bool {
    width > 0 && f64::from(height) / f64::from(width) >= MIN_ASPECT_RATIO
}

/// Resolved dialog metrics for one surface size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogLayout {
    /// Width ratio against the reference resolution.
    pub ratio: f64,
    pub dialog_width: u32,
    pub dialog_height: u32,
    pub title_font_size: u32,
    pub body_font_size: u32,
    /// Left edge of the text column, relative to the panel.
    pub text_x: u32,
    pub text_width: u32,
    /// Top positions of the two title lines and two body lines.
    pub line_ys: [u32; 4],
    /// Button center, relative to the panel.
    pub button_center_x: u32,
    pub button_center_y: u32,
    pub button_width: f64,
    pub button_height: f64,
    /// Label top inside the button.
    pub button_label_y: f64,
    /// Panel center on the surface.
    pub panel_center_x: u32,
    pub panel_center_y: u32,
}

impl DialogLayout {
    /// Compute metrics for a surface, or `None` when the surface is too
    /// shallow for the dialog.
    pub fn compute(width: u32, height: u32) -> Option<Self> {
        if !fits_surface(width, height) {
            return None;
        }
        let ratio = f64::from(width) / REFERENCE_WIDTH;
        let title_font = (TITLE_FONT_SIZE * ratio).round();
        let body_font = (BODY_FONT_SIZE * ratio).round();

        let dialog_width = (DIALOG_WIDTH * ratio).trunc() as u32;
        let dialog_height = (TITLE_TOP_MARGIN * ratio
            + title_font * LINE_HEIGHT_RATE * 2.0
            + TITLE_BOTTOM_MARGIN * ratio
            // The first body line's top margin is folded into the title
            // bottom margin.
            + (body_font + body_font * LINE_HEIGHT_RATE)
            + BUTTON_TOP_MARGIN * ratio
            + BUTTON_HEIGHT * ratio
            + BUTTON_BOTTOM_MARGIN * ratio)
            .trunc() as u32;

        let mut y = 0.0_f64;
        let mut line_ys = [0u32; 4];
        y += (TITLE_TOP_MARGIN * ratio + title_font * LINE_MARGIN_RATE).trunc();
        line_ys[0] = y as u32;
        y += (title_font * LINE_HEIGHT_RATE).trunc();
        line_ys[1] = y as u32;
        y += (title_font + TITLE_BOTTOM_MARGIN * ratio).trunc();
        line_ys[2] = y as u32;
        y += (body_font * LINE_HEIGHT_RATE).trunc();
        line_ys[3] = y as u32;
        y += (body_font + BUTTON_TOP_MARGIN * ratio).trunc();

        let button_height = BUTTON_HEIGHT * ratio;
        Some(Self {
            ratio,
            dialog_width,
            dialog_height,
            title_font_size: title_font as u32,
            body_font_size: body_font as u32,
            text_x: (TEXT_X * ratio).trunc() as u32,
            text_width: (TEXT_WIDTH * ratio).trunc() as u32,
            line_ys,
            button_center_x: dialog_width / 2,
            button_center_y: (y + button_height / 2.0) as u32,
            button_width: BUTTON_WIDTH * ratio,
            button_height,
            button_label_y: (button_height - title_font) / 2.0 - 5.0 * ratio,
            panel_center_x: width / 2,
            panel_center_y: height / 2,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
