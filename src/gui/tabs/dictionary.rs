use crate::gui::{LingoApp, Message};

use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length};

pub fn view(app: &LingoApp) -> Element<'_, Message> {
    let search = row![
        text("Word:"),
        text_input("Type an English word", &app.word_input)
            .on_input(Message::WordInputChanged)
            .on_submit(Message::SearchWord)
            .width(Length::Fixed(260.0)),
        button("Search Meaning")
            .style(button::primary)
            .on_press(Message::SearchWord),
        text(format!("Definition translated to {}", app.language)).style(text::secondary),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let meaning: Element<Message> = if app.meaning.is_empty() {
        text("Search a word to see its pronunciation, meaning and an example.")
            .style(text::secondary)
            .into()
    } else {
        scrollable(text(&app.meaning).size(16)).into()
    };

    column![
        text("Word Meaning").size(28),
        search,
        container(meaning)
            .padding(15)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(container::rounded_box),
    ]
    .spacing(15)
    .into()
}
