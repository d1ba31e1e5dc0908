//! Template resolution: from a template choice to concrete layout parameters.
//!
//! The three templates are named variants, not behaviors. They differ only in
//! where the logo sits, how large it is, how the title block is aligned, and
//! which decorative lines are drawn — so resolution is a lookup table over the
//! closed [`Template`] enum, and both the HTML renderer and exporter consume
//! the same [`Layout`] rather than branching on the template themselves.

use crate::record::{Alignment, Template};

/// Where the logo sits relative to the title block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoPlacement {
    /// Own block above the title (FORMAL).
    Block,
    /// Inline beside the title in a header row (ACADEMIC).
    Inline,
    /// Absolutely positioned top-right overlay (MODERN).
    Overlay,
}

/// Logo box size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoSize {
    Small,
    Medium,
    Large,
}

impl LogoSize {
    /// Square box edge in CSS pixels.
    pub fn px(self) -> u32 {
        match self {
            LogoSize::Small => 64,
            LogoSize::Medium => 96,
            LogoSize::Large => 128,
        }
    }
}

/// Resolved, concrete positioning/styling parameters for one
/// template + alignment + accent combination.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub logo_placement: LogoPlacement,
    pub logo_size: LogoSize,
    /// Divider line drawn directly beneath the header row.
    pub header_divider: bool,
    /// Resolved title alignment. MODERN forces left regardless of the stored
    /// alignment — an explicit override, not a bug.
    pub title_alignment: Alignment,
    /// Left accent border bar on the title block (MODERN only).
    pub accent_bar: bool,
    /// Horizontal gradient divider from the accent color to transparent,
    /// between header and title sections. Suppressed for MODERN.
    pub divider: bool,
    /// The accent color carried through for gradient/border/heading styling.
    pub accent: String,
}

/// Resolve a layout. Pure and total: every input combination yields a layout,
/// and identical inputs always yield identical output.
pub fn resolve(template: Template, alignment: Alignment, accent_color: &str) -> Layout {
    let accent = accent_color.to_string();
    match template {
        Template::Formal => Layout {
            logo_placement: LogoPlacement::Block,
            logo_size: LogoSize::Large,
            header_divider: false,
            title_alignment: alignment,
            accent_bar: false,
            divider: true,
            accent,
        },
        Template::Academic => Layout {
            logo_placement: LogoPlacement::Inline,
            logo_size: LogoSize::Medium,
            header_divider: true,
            title_alignment: alignment,
            accent_bar: false,
            divider: true,
            accent,
        },
        Template::Modern => Layout {
            logo_placement: LogoPlacement::Overlay,
            logo_size: LogoSize::Small,
            header_divider: false,
            title_alignment: Alignment::Left,
            accent_bar: true,
            divider: false,
            accent,
        },
    }
}

impl Layout {
    /// CSS background for the gradient divider bar.
    pub fn divider_css(&self) -> String {
        format!("linear-gradient(90deg, {}, transparent)", self.accent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_deterministic() {
        for template in [Template::Formal, Template::Academic, Template::Modern] {
            for alignment in [Alignment::Center, Alignment::Left] {
                let a = resolve(template, alignment, "#1e40af");
                let b = resolve(template, alignment, "#1e40af");
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn formal_layout() {
        let layout = resolve(Template::Formal, Alignment::Center, "#1e40af");
        assert_eq!(layout.logo_placement, LogoPlacement::Block);
        assert_eq!(layout.logo_size, LogoSize::Large);
        assert!(!layout.header_divider);
        assert!(layout.divider);
        assert!(!layout.accent_bar);
        assert_eq!(layout.title_alignment, Alignment::Center);
    }

    #[test]
    fn academic_layout_has_inline_logo_and_header_divider() {
        let layout = resolve(Template::Academic, Alignment::Left, "#000000");
        assert_eq!(layout.logo_placement, LogoPlacement::Inline);
        assert_eq!(layout.logo_size, LogoSize::Medium);
        assert!(layout.header_divider);
        assert!(layout.divider);
        assert_eq!(layout.title_alignment, Alignment::Left);
    }

    #[test]
    fn modern_forces_left_alignment() {
        let layout = resolve(Template::Modern, Alignment::Center, "#1e40af");
        assert_eq!(layout.title_alignment, Alignment::Left);
        let layout = resolve(Template::Modern, Alignment::Left, "#1e40af");
        assert_eq!(layout.title_alignment, Alignment::Left);
    }

    #[test]
    fn modern_suppresses_divider_and_adds_accent_bar() {
        let layout = resolve(Template::Modern, Alignment::Center, "#1e40af");
        assert!(!layout.divider);
        assert!(layout.accent_bar);
        assert_eq!(layout.logo_placement, LogoPlacement::Overlay);
        assert_eq!(layout.logo_size, LogoSize::Small);
    }

    #[test]
    fn formal_respects_stored_alignment() {
        let left = resolve(Template::Formal, Alignment::Left, "#1e40af");
        assert_eq!(left.title_alignment, Alignment::Left);
    }

    #[test]
    fn divider_css_uses_accent() {
        let layout = resolve(Template::Formal, Alignment::Center, "#ff0000");
        assert_eq!(
            layout.divider_css(),
            "linear-gradient(90deg, #ff0000, transparent)"
        );
    }

    #[test]
    fn logo_size_pixels() {
        assert_eq!(LogoSize::Small.px(), 64);
        assert_eq!(LogoSize::Medium.px(), 96);
        assert_eq!(LogoSize::Large.px(), 128);
    }
}
