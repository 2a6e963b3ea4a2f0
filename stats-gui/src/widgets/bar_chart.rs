//! # Bar Chart Widget
//!
//! Alternative view of the stats: one vertical bar per category, labelled
//! underneath with the value on top.

use iced::alignment;
use iced::widget::canvas::{self, Geometry, Path, Stroke};
use iced::widget::container;
use iced::{mouse, Element, Pixels, Point, Rectangle, Renderer, Size, Theme};
use stats_core::chart::BarLayout;
use stats_core::FlatStats;

use super::{GRID_COLOR, LABEL_COLOR, STAT_COLOR};

/// Height reserved under the bars for category names.
const LABEL_HEIGHT: f32 = 24.0;

/// Height reserved above the bars for value text.
const VALUE_HEIGHT: f32 = 18.0;

/// Fraction of each slot taken by the bar itself.
const BAR_FILL: f32 = 0.7;

pub struct BarChart {
    layout: BarLayout,
}

impl BarChart {
    pub fn new(stats: &FlatStats) -> Self {
        Self {
            layout: BarLayout::compute(stats),
        }
    }

    pub fn view(self) -> Element<'static, crate::Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fill),
        )
        .into()
    }
}

impl<Message> canvas::Program<Message> for BarChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        if !bounds.width.is_finite() || !bounds.height.is_finite() || self.layout.is_empty() {
            return vec![frame.into_geometry()];
        }

        let plot_height = (bounds.height - LABEL_HEIGHT - VALUE_HEIGHT).max(0.0);
        let baseline = VALUE_HEIGHT + plot_height;
        let slot_width = bounds.width / self.layout.bars.len() as f32;
        let bar_width = (slot_width * BAR_FILL).max(1.0);

        frame.stroke(
            &Path::line(Point::new(0.0, baseline), Point::new(bounds.width, baseline)),
            Stroke::default().with_width(1.0).with_color(GRID_COLOR),
        );

        for (i, bar) in self.layout.bars.iter().enumerate() {
            let slot_center = slot_width * (i as f32 + 0.5);
            let height = bar.height * plot_height;

            if height.is_finite() && height > 0.0 {
                let rect = Path::rectangle(
                    Point::new(slot_center - bar_width / 2.0, baseline - height),
                    Size::new(bar_width, height),
                );
                frame.fill(&rect, STAT_COLOR);
            }

            frame.fill_text(canvas::Text {
                content: format!("{}", bar.value),
                position: Point::new(slot_center, baseline - height - 2.0),
                color: LABEL_COLOR,
                size: Pixels(12.0),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Bottom,
                ..canvas::Text::default()
            });
            frame.fill_text(canvas::Text {
                content: bar.label.clone(),
                position: Point::new(slot_center, baseline + 4.0),
                color: LABEL_COLOR,
                size: Pixels(12.0),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Top,
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}
