use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;

use crate::config::Config;
use crate::form::EmiForm;
use crate::theme::Theme;
use crate::ui::ui;

pub struct App {
    pub form: EmiForm,
    pub theme: Box<dyn Theme>,
    pub currency_symbol: String,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            form: EmiForm::default(),
            theme: config.theme.theme(),
            currency_symbol: config.currency_symbol.clone(),
        }
    }
}

/// Takes over the terminal, runs the form until the user quits, and restores
/// the terminal even if the loop fails.
pub fn run(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(&mut app, key) {
                return Ok(());
            }
        }
    }
}

/// Applies one key press to the form. Returns `true` when the user asked to quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    // The warning notice is blocking: the key that dismisses it does nothing else.
    if app.form.warning().is_some() {
        app.form.dismiss_warning();
        return false;
    }

    match key.code {
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => app.form.reset(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('r') | KeyCode::Char('R') => app.form.reset(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        KeyCode::Char(c) => app.form.insert_char(c),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Enter => {
            // Failures are kept on the form and shown as the notice.
            let _ = app.form.calculate();
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emi::Field;
    use crate::form::FormState;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn filled_app() -> App {
        let mut app = App::new(&Config::default());
        type_text(&mut app, "500000");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "7.5");
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "60");
        app
    }

    #[test]
    fn typing_and_enter_calculates() {
        let mut app = filled_app();
        assert!(!press(&mut app, KeyCode::Enter));
        assert_eq!(app.form.state(), FormState::ResultDisplayed);
    }

    #[test]
    fn invalid_input_blocks_until_dismissed() {
        let mut app = App::new(&Config::default());
        press(&mut app, KeyCode::Enter);
        assert!(app.form.warning().is_some());

        // swallowed by the notice
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(app.form.warning().is_none());
        assert_eq!(app.form.principal, "");

        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn ctrl_r_resets() {
        let mut app = filled_app();
        press(&mut app, KeyCode::Enter);
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.form, EmiForm::default());
    }

    #[test]
    fn backtab_moves_focus_back() {
        let mut app = App::new(&Config::default());
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.form.focus, Field::Tenure);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.form.focus, Field::AnnualRate);
    }

    #[test]
    fn letters_are_not_entered() {
        let mut app = App::new(&Config::default());
        type_text(&mut app, "1a2b.5");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.form.principal, "12.");
    }

    #[test]
    fn bare_r_resets() {
        let mut app = filled_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.form, EmiForm::default());
    }

    #[test]
    fn escape_quits() {
        let mut app = App::new(&Config::default());
        assert!(press(&mut app, KeyCode::Esc));
    }
}
