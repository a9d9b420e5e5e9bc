use crate::ui::state::PlotType;
use chrono::{DateTime, Utc};
use egui::{pos2, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Vec2};

const MARGIN: f32 = 40.0;

/// Data bounds mapped onto a screen rectangle. Time is in seconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ChartScale {
    /// Bounds covering every point. The y range always includes zero.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a (DateTime<Utc>, f64)>) -> Option<Self> {
        let mut scale: Option<Self> = None;
        for (date, value) in points {
            let x = date.timestamp() as f64;
            let s = scale.get_or_insert(Self {
                x_min: x,
                x_max: x,
                y_min: value.min(0.0),
                y_max: value.max(0.0),
            });
            s.x_min = s.x_min.min(x);
            s.x_max = s.x_max.max(x);
            s.y_min = s.y_min.min(*value);
            s.y_max = s.y_max.max(*value);
        }
        scale
    }

    pub fn include(&mut self, points: &[(DateTime<Utc>, f64)]) {
        for (_, value) in points {
            self.y_min = self.y_min.min(*value);
            self.y_max = self.y_max.max(*value);
        }
    }

    pub fn to_screen(&self, rect: Rect, date: DateTime<Utc>, value: f64) -> Pos2 {
        let x_span = (self.x_max - self.x_min).max(1.0);
        let y_span = (self.y_max - self.y_min).max(f64::EPSILON);
        let tx = (date.timestamp() as f64 - self.x_min) / x_span;
        let ty = (value - self.y_min) / y_span;
        pos2(
            rect.left() + (tx as f32) * rect.width(),
            rect.bottom() - (ty as f32) * rect.height(),
        )
    }
}

pub struct ConsumptionChart;

impl ConsumptionChart {
    pub fn show(
        ui: &mut egui::Ui,
        title: &str,
        points: &[(DateTime<Utc>, f64)],
        trend: Option<&[(DateTime<Utc>, f64)]>,
        plot_type: PlotType,
    ) {
        let Some(mut scale) = ChartScale::from_points(points) else {
            ui.label("Nothing to plot");
            return;
        };
        if let Some(trend) = trend {
            scale.include(trend);
        }

        let size = Vec2::new(ui.available_width(), ui.available_height().max(240.0));
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let outer = response.rect;
        let plot = Rect::from_min_max(
            pos2(outer.left() + MARGIN, outer.top() + MARGIN / 2.0),
            pos2(outer.right() - MARGIN / 2.0, outer.bottom() - MARGIN),
        );

        let text_color = ui.visuals().text_color();
        let axis = Stroke::new(1.0, ui.visuals().weak_text_color());
        painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis);
        painter.line_segment([plot.left_bottom(), plot.left_top()], axis);

        painter.text(
            pos2(plot.center().x, outer.top()),
            Align2::CENTER_TOP,
            title,
            FontId::proportional(14.0),
            text_color,
        );
        painter.text(
            plot.left_top(),
            Align2::RIGHT_CENTER,
            format!("{:.0}", scale.y_max),
            FontId::monospace(10.0),
            text_color,
        );
        painter.text(
            plot.left_bottom(),
            Align2::RIGHT_CENTER,
            format!("{:.0}", scale.y_min),
            FontId::monospace(10.0),
            text_color,
        );
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            painter.text(
                plot.left_bottom() + Vec2::new(0.0, 4.0),
                Align2::LEFT_TOP,
                first.0.format("%Y-%m-%d").to_string(),
                FontId::monospace(10.0),
                text_color,
            );
            painter.text(
                plot.right_bottom() + Vec2::new(0.0, 4.0),
                Align2::RIGHT_TOP,
                last.0.format("%Y-%m-%d").to_string(),
                FontId::monospace(10.0),
                text_color,
            );
        }

        let series_color = Color32::from_rgb(70, 130, 180);
        match plot_type {
            PlotType::Line => {
                let line: Vec<Pos2> = points
                    .iter()
                    .map(|(date, value)| scale.to_screen(plot, *date, *value))
                    .collect();
                painter.add(Shape::line(line, Stroke::new(1.5, series_color)));
            }
            PlotType::Bar => {
                let bar_width = (plot.width() / points.len() as f32 * 0.8).clamp(1.0, 20.0);
                let baseline = scale.to_screen(plot, points[0].0, 0.0).y;
                for (date, value) in points {
                    let top = scale.to_screen(plot, *date, *value);
                    let bar = Rect::from_two_pos(
                        pos2(top.x - bar_width / 2.0, top.y),
                        pos2(top.x + bar_width / 2.0, baseline),
                    );
                    painter.rect_filled(bar, 0.0, series_color);
                }
            }
        }

        if let Some(trend) = trend {
            let line: Vec<Pos2> = trend
                .iter()
                .map(|(date, value)| scale.to_screen(plot, *date, *value))
                .collect();
            painter.add(Shape::line(line, Stroke::new(2.0, Color32::from_rgb(220, 60, 60))));
        }
    }
}
