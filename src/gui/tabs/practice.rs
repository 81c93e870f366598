use crate::gui::{LingoApp, Message};
use crate::playback::PlayState;

use iced::widget::{button, column, container, row, scrollable, text, text_editor, Column};
use iced::{Alignment, Element, Length};

/// Longest sample label shown on a quick-sample button
const SAMPLE_LABEL_CHARS: usize = 48;

pub fn view(app: &LingoApp) -> Element<'_, Message> {
    let editor = text_editor(&app.context)
        .on_action(Message::ContextAction)
        .height(Length::Fixed(180.0));

    let generate_btn = button(text(if app.practice.generating {
        "⏳ Working..."
    } else {
        "🎧 Generate & Play Audio"
    }))
    .padding(12)
    .style(button::success)
    .on_press_maybe((!app.practice.generating).then_some(Message::GeneratePressed));

    let enabled = app.practice.playback_enabled;
    let pause_label = if app.play_state == PlayState::Paused {
        "Resume"
    } else {
        "Pause"
    };
    let transport = row![
        transport_button("▶️ Play", enabled, Message::PlayPressed),
        transport_button(pause_label, enabled, Message::PausePressed),
        transport_button("🔁 Replay", enabled, Message::ReplayPressed),
        transport_button("⏹️ Stop", enabled, Message::StopPressed),
    ]
    .spacing(10);

    let samples = app
        .config
        .sample_contexts
        .iter()
        .enumerate()
        .fold(Column::new().spacing(6), |col, (i, sample)| {
            col.push(
                button(text(sample_label(sample)).size(14))
                    .width(Length::Fill)
                    .style(button::secondary)
                    .on_press(Message::UseSample(i)),
            )
        });

    let translated: Element<Message> = if app.translated.is_empty() {
        text("The translation appears here.")
            .style(text::secondary)
            .into()
    } else {
        scrollable(text(&app.translated).size(18)).into()
    };

    let left = column![
        text("Enter or paste English context (leave blank for random):"),
        editor,
        row![generate_btn, text(&app.status).size(18)]
            .spacing(20)
            .align_y(Alignment::Center),
        transport,
        text(format!("Translated ({}):", app.language)).size(18),
        container(translated)
            .padding(10)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(container::rounded_box),
    ]
    .spacing(12)
    .width(Length::FillPortion(3));

    let right = column![text("Quick samples").size(18), scrollable(samples)]
        .spacing(10)
        .width(Length::FillPortion(1));

    row![left, right].spacing(20).into()
}

fn transport_button(label: &str, enabled: bool, message: Message) -> Element<'_, Message> {
    button(text(label))
        .padding(10)
        .style(button::secondary)
        .on_press_maybe(enabled.then_some(message))
        .into()
}

fn sample_label(sample: &str) -> String {
    if sample.chars().count() <= SAMPLE_LABEL_CHARS {
        return sample.to_string();
    }
    let cut: String = sample.chars().take(SAMPLE_LABEL_CHARS - 3).collect();
    format!("{}...", cut.trim_end())
}
