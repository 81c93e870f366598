use crate::gui::{LingoApp, Message, Tab};
use iced::widget::{button, column, container, text, Space};
use iced::{Element, Length};

pub fn view(app: &LingoApp) -> Element<'static, Message> {
    let tabs = column![
        text("LingoTalks").size(22),
        Space::with_height(10),
        tab_button(app, "🎧 Practice & Audio", Tab::Practice),
        tab_button(app, "📖 Word Meaning", Tab::Dictionary),
        tab_button(app, "📝 Notes", Tab::Notes),
        Space::with_height(Length::Fill),
        text(concat!("v", env!("CARGO_PKG_VERSION")))
            .size(12)
            .style(text::secondary),
    ]
    .spacing(5)
    .padding(10);

    container(tabs)
        .width(Length::Fixed(200.0))
        .height(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn tab_button(app: &LingoApp, label: &'static str, tab: Tab) -> Element<'static, Message> {
    let is_selected = app.current_tab == tab;

    button(text(label))
        .width(Length::Fill)
        .padding(10)
        .style(if is_selected {
            button::primary
        } else {
            button::secondary
        })
        .on_press(Message::TabSelected(tab))
        .into()
}
