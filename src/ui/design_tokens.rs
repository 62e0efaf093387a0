// SPDX-License-Identifier: MPL-2.0
//! Shared visual constants.
//!
//! Widgets pull colors, spacing and sizes from here instead of writing
//! literals, so the grid, the voice panel and the lightbox stay in step.
//!
//! ```
//! use voice_lens::ui::design_tokens::{opacity, palette, spacing};
//! use iced::Color;
//!
//! let scrim = Color { a: opacity::OVERLAY_MEDIUM, ..palette::BLACK };
//! assert!(scrim.a < 1.0 && spacing::MD > spacing::SM);
//! ```

use iced::Color;

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_400: Color = Color::from_rgb(0.42, 0.44, 0.47);
    pub const GRAY_200: Color = Color::from_rgb(0.78, 0.80, 0.82);

    // Teal accent, also used for the listening mic.
    pub const PRIMARY_400: Color = Color::from_rgb(0.27, 0.70, 0.68);
    pub const PRIMARY_500: Color = Color::from_rgb(0.10, 0.58, 0.56);
    pub const PRIMARY_600: Color = Color::from_rgb(0.05, 0.46, 0.45);

    pub const ERROR_500: Color = Color::from_rgb(0.86, 0.24, 0.22);
    pub const WARNING_500: Color = Color::from_rgb(0.93, 0.62, 0.15);
    pub const INFO_500: Color = Color::from_rgb(0.36, 0.56, 0.95);
}

/// Alpha levels for scrims and pressed states.
pub mod opacity {
    pub const OVERLAY_MEDIUM: f32 = 0.55;
    pub const OVERLAY_HOVER: f32 = 0.8;
    pub const OVERLAY_PRESSED: f32 = 0.9;
    pub const SURFACE: f32 = 0.96;
}

/// 4px steps.
pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
}

pub mod sizing {
    pub const BUTTON_HEIGHT: f32 = 36.0;
    pub const INPUT_HEIGHT: f32 = 40.0;
    /// Edge of a square grid thumbnail.
    pub const THUMBNAIL: f32 = 220.0;
    pub const MIC_BUTTON: f32 = 64.0;
    pub const BANNER_MAX_WIDTH: f32 = 520.0;
}

pub mod typography {
    pub const TITLE_MD: f32 = 20.0;
    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
    pub const CLOSE_GLYPH: f32 = 32.0;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    /// Large enough to round any widget into a pill or circle.
    pub const FULL: f32 = 9999.0;
}

pub mod shadow {
    use iced::{Color, Shadow, Vector};

    const fn drop(offset_y: f32, blur_radius: f32) -> Shadow {
        Shadow {
            color: Color::BLACK,
            offset: Vector { x: 0.0, y: offset_y },
            blur_radius,
        }
    }

    pub const NONE: Shadow = drop(0.0, 0.0);
    pub const SM: Shadow = drop(2.0, 4.0);
    pub const MD: Shadow = drop(4.0, 10.0);
}

const _: () = {
    assert!(spacing::XXS < spacing::XS && spacing::XS < spacing::SM);
    assert!(spacing::SM < spacing::MD && spacing::MD < spacing::LG);
    assert!(sizing::MIC_BUTTON < sizing::THUMBNAIL);
    assert!(typography::CAPTION < typography::BODY && typography::BODY < typography::TITLE_MD);
};
