//! SynthBrute theme and color utilities.

use crate::notifications::NotificationLevel;
use scholar_core::LoadingState;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct SynthBruteTheme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl SynthBruteTheme {
    pub fn synthbrute() -> Self {
        Self {
            bg: Color::Rgb(10, 10, 10),
            bg_highlight: Color::Rgb(42, 42, 42),
            primary: Color::Rgb(0, 255, 255),
            primary_dim: Color::Rgb(0, 136, 136),
            secondary: Color::Rgb(255, 0, 255),
            tertiary: Color::Rgb(255, 255, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 255, 0),
            error: Color::Rgb(255, 0, 0),
            info: Color::Rgb(0, 255, 255),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            text_muted: Color::Rgb(68, 68, 68),
            border: Color::Rgb(68, 68, 68),
            border_focus: Color::Rgb(0, 255, 255),
        }
    }
}

pub fn loading_state_color(state: LoadingState, theme: &SynthBruteTheme) -> Color {
    match state {
        LoadingState::Idle => theme.text_dim,
        LoadingState::Loading => theme.warning,
        LoadingState::Success => theme.success,
        LoadingState::Error => theme.error,
    }
}

pub fn notification_color(level: NotificationLevel, theme: &SynthBruteTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
        NotificationLevel::Success => theme.success,
    }
}

/// Classifier confidence in `[0, 1]`.
pub fn confidence_color(confidence: f64, theme: &SynthBruteTheme) -> Color {
    if confidence >= 0.7 {
        theme.success
    } else if confidence >= 0.4 {
        theme.warning
    } else {
        theme.error
    }
}

/// Relevance scores are unbounded; this only separates strong from weak hits.
pub fn relevance_color(score: f64, theme: &SynthBruteTheme) -> Color {
    if score >= 1.0 {
        theme.primary
    } else {
        theme.primary_dim
    }
}
