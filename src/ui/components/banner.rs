//! Status banner shown after a failed submission

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render `message` inside a red banner
pub fn render_status_banner(frame: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bg(Color::Red))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(banner, area);
}

/// Rows needed to show `message` word-wrapped at `width` columns, borders
/// included
pub fn banner_height(message: &str, width: u16) -> u16 {
    let inner = width.saturating_sub(2).max(1) as usize;
    let lines: usize = message
        .lines()
        .map(|line| wrapped_line_count(line, inner))
        .sum();
    u16::try_from(lines.max(1))
        .unwrap_or(u16::MAX)
        .saturating_add(2)
}

/// Greedy word wrap: words move to the next row when they don't fit, and
/// words wider than a row are split across rows
fn wrapped_line_count(line: &str, width: usize) -> usize {
    let mut lines = 0;
    let mut current = 0;
    for word in line.split_whitespace() {
        let len = word.chars().count();
        if len > width {
            if current > 0 {
                lines += 1;
            }
            lines += len / width;
            current = len % width;
        } else if current == 0 {
            current = len;
        } else if current + 1 + len <= width {
            current += 1 + len;
        } else {
            lines += 1;
            current = len;
        }
    }
    if current > 0 || lines == 0 {
        lines += 1;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_height_single_line() {
        assert_eq!(banner_height("Not valid :(", 40), 3);
    }

    #[test]
    fn test_banner_height_wraps() {
        let message = "x".repeat(50);
        assert_eq!(banner_height(&message, 22), 5);
    }

    #[test]
    fn test_banner_height_wraps_on_words() {
        assert_eq!(banner_height("aaaa bbbb cccc", 11), 4);
        // Nine inner columns: 17 characters would fit in two rows, but no
        // two of the five-letter words share a row
        assert_eq!(banner_height("aaaaa bbbbb ccccc", 11), 5);
    }

    #[test]
    fn test_banner_height_counts_explicit_lines() {
        assert_eq!(banner_height("first\nsecond", 40), 4);
    }

    #[test]
    fn test_banner_height_saturates() {
        let message = "x ".repeat(100_000);
        assert_eq!(banner_height(&message, 3), u16::MAX);
    }

    #[test]
    fn test_banner_height_empty() {
        assert_eq!(banner_height("", 10), 3);
    }
}
