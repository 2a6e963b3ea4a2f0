//! # Main Display Module
//!
//! This module contains the main display components and layout logic
//! for the Stat Radar application.

use iced::widget::{button, column, container, row, scrollable, text, text_input, Space};
use iced::{Alignment, Element, Length};

use crate::widgets::{bar_chart, radar_chart};
use crate::{AppDisplayData, ChartKind, Message};

/// Configuration for a single button in the sidebar
#[derive(Debug, Clone)]
struct ButtonConfig {
    label: &'static str,
    message: Message,
    button_type: ButtonType,
}

/// Different types of buttons with their styling requirements
#[derive(Debug, Clone)]
enum ButtonType {
    /// Standard button with no special styling
    Standard,
    /// Writes to disk; highlighted
    Save,
    /// Chart toggle; label shows the chart it switches to
    ChartToggle,
}

const SIDEBAR_CONFIG: &[(&str, &[ButtonConfig])] = &[
    ("Stats", &[
        ButtonConfig { label: "Calculate Stats", message: Message::Calculate, button_type: ButtonType::Standard },
        ButtonConfig { label: "Save Stats", message: Message::Save, button_type: ButtonType::Save },
        ButtonConfig { label: "Reload Stats", message: Message::Reload, button_type: ButtonType::Standard },
    ]),
    ("View", &[
        ButtonConfig { label: "Chart", message: Message::ToggleChart, button_type: ButtonType::ChartToggle },
    ]),
];

/// Creates the complete main application view
pub fn create_main_view(data: &AppDisplayData) -> Element<'_, Message> {
    let title = text("Game Stats Radar Chart").size(28);
    let file_label = text(format!("File: {}", data.stats_path.display())).size(14);

    let main_content = row![
        column![
            title,
            file_label,
            Space::with_height(10),
            row![
                create_form_panel(data),
                Space::with_width(10),
                create_chart_panel(data),
            ]
            .align_y(Alignment::Start),
            create_result_panel(data),
        ]
        .width(Length::Fill)
        .spacing(10),
        Space::with_width(10),
        create_sidebar(data),
    ]
    .align_y(Alignment::Start)
    .padding(20);

    container(main_content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Creates the input form, one text box per category.
fn create_form_panel(data: &AppDisplayData) -> Element<'_, Message> {
    let fields = data.inputs.iter().fold(column![].spacing(8), |col, (name, value)| {
        let category = name.clone();
        col.push(
            row![
                text(name.as_str()).size(14).width(Length::Fixed(140.0)),
                text_input("0-100", value)
                    .on_input(move |text| Message::InputChanged(category.clone(), text))
                    .on_submit(Message::Calculate)
                    .size(14)
                    .padding(6),
            ]
            .align_y(Alignment::Center),
        )
    });

    container(
        column![
            text("Enter your stats:").size(18),
            Space::with_height(10),
            scrollable(fields),
        ]
        .spacing(5)
        .padding(15),
    )
    .width(Length::Fixed(320.0))
    .height(Length::Fixed(420.0))
    .into()
}

/// Creates the chart panel for the current chart kind.
fn create_chart_panel(data: &AppDisplayData) -> Element<'_, Message> {
    let (heading, chart) = match data.chart_kind {
        ChartKind::Radar => ("Radar", radar_chart::RadarChart::new(&data.chart_stats).view()),
        ChartKind::Bar => ("Stat Scores", bar_chart::BarChart::new(&data.chart_stats).view()),
    };

    container(
        column![
            text(heading).size(18),
            Space::with_height(10),
            container(chart).width(Length::Fill).height(Length::Fill),
        ]
        .spacing(5)
        .padding(15),
    )
    .width(Length::Fill)
    .height(Length::Fixed(420.0))
    .into()
}

/// Creates the result label and the status line.
fn create_result_panel(data: &AppDisplayData) -> Element<'_, Message> {
    let mut panel = column![text(data.result_text.as_str()).size(14)].spacing(5);
    if !data.status.is_empty() {
        panel = panel.push(
            text(data.status.as_str())
                .size(13)
                .color(iced::Color::from_rgb(0.7, 0.7, 0.7)),
        );
    }
    container(panel.padding(15)).width(Length::Fill).into()
}

/// Creates the sidebar widget with all application controls.
fn create_sidebar(data: &AppDisplayData) -> Element<'static, Message> {
    let busy = data.pending > 0;
    let sections = SIDEBAR_CONFIG.iter().fold(column![].spacing(10), |col, (title, buttons)| {
        col.push(make_section(title, buttons, data.chart_kind, busy))
    });

    container(sections.padding(15))
        .width(Length::Fixed(220.0))
        .height(Length::Fill)
        .into()
}

/// Creates a button based on configuration and application state.
///
/// Save and reload are left unwired while the store thread is still
/// working on an earlier request.
fn make_button(config: &ButtonConfig, chart_kind: ChartKind, busy: bool) -> Element<'static, Message> {
    let label = match config.button_type {
        ButtonType::ChartToggle => match chart_kind {
            ChartKind::Radar => "Show Bar Chart",
            ChartKind::Bar => "Show Radar Chart",
        },
        _ => config.label,
    };

    let mut button = button(text(label).size(14).width(Length::Fill)).padding([6, 10]);

    if let ButtonType::Save = config.button_type {
        button = button.style(|_theme, _status| {
            use iced::widget::button;
            button::Style {
                background: Some(iced::Background::Color(iced::Color::from_rgb8(0x34, 0x98, 0xDB))),
                text_color: iced::Color::WHITE,
                ..button::Style::default()
            }
        });
    }

    let touches_store = matches!(config.message, Message::Save | Message::Reload);
    if busy && touches_store {
        button.into()
    } else {
        button.on_press(config.message.clone()).into()
    }
}

/// Creates a sidebar section with title and buttons.
fn make_section(
    title: &'static str,
    buttons: &[ButtonConfig],
    chart_kind: ChartKind,
    busy: bool,
) -> Element<'static, Message> {
    let items = buttons.iter().fold(column![].spacing(8), |col, config| {
        col.push(make_button(config, chart_kind, busy))
    });

    column![text(title).size(18), Space::with_height(10), items]
        .spacing(5)
        .into()
}
