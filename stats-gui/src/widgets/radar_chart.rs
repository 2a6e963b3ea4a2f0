//! # Radar Chart Widget
//!
//! Draws the stats as a closed polygon over evenly spaced spokes, one spoke
//! per category. Layout comes from `stats_core::chart::RadarLayout`; this
//! module only scales it to the canvas and paints it.

use iced::alignment;
use iced::widget::canvas::{self, Geometry, Path, Stroke};
use iced::widget::container;
use iced::{mouse, Color, Element, Pixels, Point, Rectangle, Renderer, Theme};
use stats_core::chart::RadarLayout;
use stats_core::FlatStats;

use super::{GRID_COLOR, LABEL_COLOR, STAT_COLOR};

/// Space kept around the plot for the category labels.
const LABEL_MARGIN: f32 = 48.0;

/// Labels sit slightly outside the outer ring.
const LABEL_OFFSET: f32 = 1.12;

pub struct RadarChart {
    layout: RadarLayout,
}

impl RadarChart {
    pub fn new(stats: &FlatStats) -> Self {
        Self {
            layout: RadarLayout::compute(stats),
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

impl<Message> canvas::Program<Message> for RadarChart {
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

        let center = frame.center();
        let radius = (bounds.width.min(bounds.height) / 2.0 - LABEL_MARGIN).max(0.0);
        let to_point = |(x, y): (f32, f32)| Point::new(center.x + x * radius, center.y + y * radius);

        // Grid rings
        for ring in self.layout.rings() {
            frame.stroke(
                &Path::circle(center, radius * ring),
                Stroke::default().with_width(1.0).with_color(GRID_COLOR),
            );
        }

        // Spokes and labels
        for spoke in &self.layout.spokes {
            frame.stroke(
                &Path::line(center, to_point(spoke.direction)),
                Stroke::default().with_width(1.0).with_color(GRID_COLOR),
            );

            let (dx, dy) = spoke.direction;
            frame.fill_text(canvas::Text {
                content: spoke.label.clone(),
                position: to_point((dx * LABEL_OFFSET, dy * LABEL_OFFSET)),
                color: LABEL_COLOR,
                size: Pixels(13.0),
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Center,
                ..canvas::Text::default()
            });
        }

        // Value polygon, already closed by the layout
        let points: Vec<Point> = self.layout.polygon.iter().copied().map(to_point).collect();
        let polygon = Path::new(|builder| {
            if let Some((first, rest)) = points.split_first() {
                builder.move_to(*first);
                for point in rest {
                    builder.line_to(*point);
                }
            }
        });
        frame.fill(&polygon, Color { a: 0.35, ..STAT_COLOR });
        frame.stroke(&polygon, Stroke::default().with_width(2.0).with_color(STAT_COLOR));

        for point in points.iter().take(self.layout.spokes.len()) {
            frame.fill(&Path::circle(*point, 3.0), STAT_COLOR);
        }

        vec![frame.into_geometry()]
    }
}
