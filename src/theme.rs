use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Styling for every element the form draws. The layout never changes between
/// themes; only these styles do.
pub trait Theme {
    fn name(&self) -> &'static str;
    fn title(&self) -> Style;
    fn label(&self) -> Style;
    fn input(&self, focused: bool) -> Style;
    fn placeholder(&self) -> Style;
    fn calculate_button(&self) -> Style;
    fn reset_button(&self) -> Style;
    fn result_border(&self) -> Style;
    fn result_value(&self) -> Style;
    fn warning(&self) -> Style;
    fn help(&self) -> Style;
}

/// Purple card palette.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inline;

const PURPLE: Color = Color::Rgb(0x6b, 0x46, 0xc1);
const INK: Color = Color::Rgb(0x2e, 0x2b, 0x4f);
const GREY: Color = Color::Rgb(0xe6, 0xe6, 0xe6);
const DARK: Color = Color::Rgb(0x33, 0x33, 0x33);

impl Theme for Inline {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn title(&self) -> Style {
        Style::default().fg(PURPLE).add_modifier(Modifier::BOLD)
    }

    fn label(&self) -> Style {
        Style::default().fg(INK)
    }

    fn input(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(PURPLE).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(INK)
        }
    }

    fn placeholder(&self) -> Style {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    }

    fn calculate_button(&self) -> Style {
        Style::default().fg(Color::White).bg(PURPLE)
    }

    fn reset_button(&self) -> Style {
        Style::default().fg(DARK).bg(GREY)
    }

    fn result_border(&self) -> Style {
        Style::default().fg(PURPLE)
    }

    fn result_value(&self) -> Style {
        Style::default().fg(INK).add_modifier(Modifier::BOLD)
    }

    fn warning(&self) -> Style {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    fn help(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }
}

/// Terminal-default palette.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classic;

impl Theme for Classic {
    fn name(&self) -> &'static str {
        "classic"
    }

    fn title(&self) -> Style {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    fn label(&self) -> Style {
        Style::default()
    }

    fn input(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }

    fn placeholder(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }

    fn calculate_button(&self) -> Style {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    }

    fn reset_button(&self) -> Style {
        Style::default().fg(Color::Red)
    }

    fn result_border(&self) -> Style {
        Style::default().fg(Color::Cyan)
    }

    fn result_value(&self) -> Style {
        Style::default().fg(Color::Green)
    }

    fn warning(&self) -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    fn help(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Inline,
    Classic,
}

impl ThemeKind {
    pub fn theme(self) -> Box<dyn Theme> {
        match self {
            ThemeKind::Inline => Box::new(Inline),
            ThemeKind::Classic => Box::new(Classic),
        }
    }
}
