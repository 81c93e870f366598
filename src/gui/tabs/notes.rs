use crate::gui::{LingoApp, Message};

use iced::widget::{button, column, row, text, text_editor, Space};
use iced::{Alignment, Element, Length};

pub fn view(app: &LingoApp) -> Element<'_, Message> {
    let file_label = match &app.notes_path {
        Some(path) => text(path.display().to_string()).style(text::secondary),
        None => text("Unsaved notes").style(text::secondary),
    };

    let actions = row![
        button(text(if app.notes_busy {
            "⏳ Translating..."
        } else {
            "🌐 Translate Notes"
        }))
        .style(button::primary)
        .on_press_maybe((!app.notes_busy).then_some(Message::TranslateNotes)),
        button("💾 Save Notes")
            .style(button::secondary)
            .on_press(Message::SaveNotes),
        button("📂 Load Notes")
            .style(button::secondary)
            .on_press(Message::LoadNotes),
        button("🧹 Clear")
            .style(button::danger)
            .on_press(Message::ClearNotes),
        Space::with_width(Length::Fill),
        file_label,
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    column![
        text("Notes").size(28),
        actions,
        text_editor(&app.notes)
            .on_action(Message::NotesAction)
            .height(Length::Fill),
    ]
    .spacing(15)
    .into()
}
