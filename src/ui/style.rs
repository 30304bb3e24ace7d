/// Compile-time layout tokens, not user-overridable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleTokens {
    pub spacing_4: i32,
    pub spacing_8: i32,
    pub spacing_12: i32,
    pub spacing_16: i32,
    pub card_radius: u16,
    pub control_radius: u16,
    pub control_height: u16,
    pub border_width: u16,
    pub window_default_width: i32,
    pub window_default_height: i32,
    pub description_min_height: i32,
    pub preview_height: i32,
    pub progress_height: u16,
    pub motion_hover_ms: u32,
    pub notice_duration_ms: u32,
}

pub const LAYOUT_TOKENS: StyleTokens = StyleTokens {
    spacing_4: 4,
    spacing_8: 8,
    spacing_12: 12,
    spacing_16: 16,
    card_radius: 14,
    control_radius: 12,
    control_height: 44,
    border_width: 1,
    window_default_width: 440,
    window_default_height: 820,
    description_min_height: 140,
    preview_height: 260,
    progress_height: 8,
    motion_hover_ms: 160,
    notice_duration_ms: 3_000,
};
