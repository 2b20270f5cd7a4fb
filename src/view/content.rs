//! Profile card rendering (header, socials, link sections, footer)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding},
    Frame,
};

use crate::config::{self, LinkEntry};
use crate::model::UiState;

use super::utils::render_scrollable_list;

pub fn render_card(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let (items, selected_row) = card_items(ui_state);

    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(ui_state.theme.accent()))
        .title(format!(" {} ", config::PROFILE.name));

    render_scrollable_list(frame, area, items, selected_row, block);
}

/// Build the card rows plus the row index of the selected link.
///
/// The selected row index drives the list's scroll offset, so the card
/// follows the selection the way a page follows its scroll position.
fn card_items(ui_state: &UiState) -> (Vec<ListItem<'static>>, usize) {
    let strings = config::strings(ui_state.language);
    let accent = ui_state.theme.accent();

    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_row = 0;
    let mut link_index = 0;

    // Header
    items.push(ListItem::new(Line::from(Span::styled(
        config::PROFILE.full_name.to_string(),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ))));
    items.push(ListItem::new(Line::from(Span::styled(
        strings.greeting.to_string(),
        Style::default().fg(Color::White),
    ))));
    items.push(ListItem::new(Line::from(Span::styled(
        config::PROFILE.profile_url.to_string(),
        Style::default().fg(Color::DarkGray),
    ))));

    // Social row
    let socials: Vec<Span> = config::SOCIALS
        .iter()
        .flat_map(|social| {
            [
                Span::styled(
                    format!("{} {}", social.glyph, social.name),
                    Style::default().fg(social.color),
                ),
                Span::raw("   "),
            ]
        })
        .collect();
    items.push(ListItem::new(Line::from(socials)));
    items.push(ListItem::new(""));

    let sections: [(&str, &[LinkEntry]); 3] = [
        (strings.about, config::ABOUT_LINKS),
        (strings.projects, config::PROJECT_LINKS),
        (strings.contact, config::CONTACT_LINKS),
    ];

    for (title, links) in sections {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("── {} ──", title),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))));

        for entry in links {
            let is_selected = link_index == ui_state.selected_link;
            if is_selected {
                selected_row = items.len();
            }
            items.push(link_row(entry, is_selected, accent));
            link_index += 1;
        }
        items.push(ListItem::new(""));
    }

    // Footer
    items.push(ListItem::new(Line::from(Span::styled(
        config::footer(),
        Style::default().fg(Color::DarkGray),
    ))));

    (items, selected_row)
}

fn link_row(entry: &'static LinkEntry, is_selected: bool, accent: Color) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let text = format!("{}{}  ·  {}", marker, entry.title, entry.label);

    let style = if is_selected {
        Style::default()
            .fg(Color::Black)
            .bg(accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(entry.color)
    };

    ListItem::new(text).style(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_row_tracks_the_flattened_link_index() {
        let mut ui_state = UiState::default();
        let (_, first) = card_items(&ui_state);

        ui_state.selected_link = 1;
        let (_, second) = card_items(&ui_state);
        assert_eq!(second, first + 1);

        // First project link sits past the about section and its title row.
        ui_state.selected_link = config::ABOUT_LINKS.len();
        let (_, project) = card_items(&ui_state);
        assert_eq!(project, first + config::ABOUT_LINKS.len() + 2);
    }

    #[test]
    fn card_lists_every_link_once() {
        let ui_state = UiState::default();
        let (items, _) = card_items(&ui_state);
        let total_links = config::ABOUT_LINKS.len()
            + config::PROJECT_LINKS.len()
            + config::CONTACT_LINKS.len();
        // Header(4) + blank + 3 sections (title + links + blank) + footer.
        assert_eq!(items.len(), 5 + 3 * 2 + total_links + 1);
    }
}
