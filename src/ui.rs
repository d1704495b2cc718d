use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::emi::Field;
use crate::format::money;

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(6),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    let theme = app.theme.as_ref();

    let title = Paragraph::new("EMI Calculator")
        .style(theme.title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    for (field, area) in Field::ALL.into_iter().zip(&chunks[1..4]) {
        render_input(f, app, field, *area);
    }

    let buttons = Paragraph::new(Line::from(vec![
        Span::styled(" Calculate EMI (Enter) ", theme.calculate_button()),
        Span::raw("  "),
        Span::styled(" Reset (Ctrl+R) ", theme.reset_button()),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(buttons, chunks[4]);

    render_result(f, app, chunks[5]);

    let help = Paragraph::new("Tab/↓: next field | Shift+Tab/↑: previous | r/Ctrl+R: reset | Esc/q: quit")
        .style(theme.help())
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[6]);

    if app.form.warning().is_some() {
        render_warning(f, app);
    }
}

fn render_input(f: &mut Frame, app: &App, field: Field, area: Rect) {
    let theme = app.theme.as_ref();
    let focused = app.form.focus == field;
    let value = app.form.value(field);

    let label = if field == Field::Principal {
        format!("{} ({})", field.label(), app.currency_symbol)
    } else {
        field.label().to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input(focused))
        .title(Span::styled(label, theme.label()));

    let content = if value.is_empty() && !focused {
        Line::from(Span::styled(field.placeholder(), theme.placeholder()))
    } else if focused {
        Line::from(vec![
            Span::styled(value.to_string(), theme.input(true)),
            Span::styled("_", theme.input(true).add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else {
        Line::from(Span::styled(value.to_string(), theme.input(false)))
    };

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn render_result(f: &mut Frame, app: &App, area: Rect) {
    let Some((input, result)) = app.form.result() else {
        return;
    };
    let theme = app.theme.as_ref();
    let symbol = app.currency_symbol.as_str();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let text = vec![
        Line::from(vec![
            Span::styled("Loan Amount: ", bold),
            Span::styled(money(symbol, input.principal()), theme.result_value()),
        ]),
        Line::from(vec![
            Span::styled("EMI: ", bold),
            Span::styled(money(symbol, result.monthly_installment), theme.result_value()),
        ]),
        Line::from(vec![
            Span::styled("Total Interest to be Paid: ", bold),
            Span::styled(money(symbol, result.total_interest), theme.result_value()),
        ]),
        Line::from(vec![
            Span::styled("Total Payment (Principal + Interest): ", bold),
            Span::styled(money(symbol, result.total_payment), theme.result_value()),
        ]),
    ];

    let results = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.result_border())
            .title("Results"),
    );
    f.render_widget(results, area);
}

fn render_warning(f: &mut Frame, app: &App) {
    let Some(warning) = app.form.warning() else {
        return;
    };
    let theme = app.theme.as_ref();
    let area = centered_rect(60, 30, f.size());

    let text = vec![
        Line::from(Span::styled(
            "Please enter valid positive values for Loan Amount, Interest Rate, and Tenure (months).",
            theme.warning(),
        )),
        Line::from(""),
        Line::from(warning.to_string()),
        Line::from(""),
        Line::from(Span::styled("Press any key to continue", theme.help())),
    ];

    let notice = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.warning())
                .title("Invalid input"),
        );
    f.render_widget(Clear, area);
    f.render_widget(notice, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 32);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with(principal: &str, rate: &str, tenure: &str) -> App {
        let mut app = App::new(&Config::default());
        app.form.principal = principal.to_string();
        app.form.annual_rate = rate.to_string();
        app.form.tenure = tenure.to_string();
        app
    }

    #[test]
    fn empty_form_shows_placeholders_and_no_results() {
        let screen = render(&App::new(&Config::default()));
        assert!(screen.contains("EMI Calculator"));
        assert!(screen.contains("Loan Amount (₹)"));
        assert!(screen.contains("e.g. 7.5"));
        assert!(screen.contains("e.g. 60"));
        assert!(!screen.contains("Results"));
        assert!(screen.contains("r/Ctrl+R: reset"));
    }

    #[test]
    fn calculated_form_shows_formatted_results() {
        let mut app = app_with("100000", "10", "12");
        app.form.calculate().unwrap();

        let screen = render(&app);
        assert!(screen.contains("Results"));
        assert!(screen.contains("Loan Amount: ₹100,000.00"));
        assert!(screen.contains("EMI: ₹8,791.59"));
        assert!(screen.contains("Total Interest to be Paid: ₹5,499.06"));
        assert!(screen.contains("Total Payment (Principal + Interest): ₹105,499.06"));
    }

    #[test]
    fn validation_failure_shows_notice() {
        let mut app = app_with("0", "7.5", "60");
        let _ = app.form.calculate();

        let screen = render(&app);
        assert!(screen.contains("Invalid input"));
        assert!(screen.contains("loan amount must be greater than zero"));
    }

    #[test]
    fn currency_symbol_comes_from_config() {
        let config = Config {
            currency_symbol: "$".to_string(),
            ..Config::default()
        };
        let mut app = App::new(&config);
        app.form.principal = "500000".to_string();
        app.form.annual_rate = "7.5".to_string();
        app.form.tenure = "60".to_string();
        app.form.calculate().unwrap();

        let screen = render(&app);
        assert!(screen.contains("EMI: $10,018.97"));
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 30, area);
        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
        assert_eq!(popup.width, 60);
    }
}
