use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement};

use super::{FetchTransport, document, element_by_id, replace_content};
use crate::api::Api;
use crate::config;
use crate::dashboard::chart::{self, Axis, BarChart, LineChart, PlotArea};
use crate::dashboard::{DashboardController, DashboardView, StatCards};
use crate::error::UiError;
use crate::markup::Node;

const AXIS_COLOR: &str = "#9CA3AF";
const TEXT_COLOR: &str = "#374151";

pub struct DomDashboardView {
    total_sessions: Element,
    total_time: Element,
    avg_reading_speed: Element,
    weekly_progress: Element,
    progress_canvas: HtmlCanvasElement,
    scores_canvas: HtmlCanvasElement,
    recommendations: Element,
    recent_activity: Element,
}

impl DomDashboardView {
    fn bind() -> Result<Self, UiError> {
        let doc = document()?;
        Ok(Self {
            total_sessions: element_by_id(&doc, "totalSessions")?,
            total_time: element_by_id(&doc, "totalTime")?,
            avg_reading_speed: element_by_id(&doc, "avgReadingSpeed")?,
            weekly_progress: element_by_id(&doc, "weeklyProgress")?,
            progress_canvas: element_by_id(&doc, "readingProgressChart")?,
            scores_canvas: element_by_id(&doc, "gameScoresChart")?,
            recommendations: element_by_id(&doc, "recommendations")?,
            recent_activity: element_by_id(&doc, "recentActivity")?,
        })
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, UiError> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| UiError::Js("2d context unavailable".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| UiError::Js("unexpected canvas context".into()))
}

fn line(ctx: &CanvasRenderingContext2d, x1: f64, y1: f64, x2: f64, y2: f64) {
    ctx.begin_path();
    ctx.move_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.stroke();
}

/// Clear the canvas, draw the title and the axes; returns the plot area.
fn frame(ctx: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement, title: &str) -> PlotArea {
    let (w, h) = (f64::from(canvas.width()), f64::from(canvas.height()));
    ctx.clear_rect(0.0, 0.0, w, h);
    let area = chart::plot_area(w, h);

    ctx.set_fill_style(&JsValue::from_str(TEXT_COLOR));
    ctx.set_font("bold 14px sans-serif");
    ctx.set_text_align("center");
    let _ = ctx.fill_text(title, w / 2.0, 20.0);

    ctx.set_stroke_style(&JsValue::from_str(AXIS_COLOR));
    ctx.set_line_width(1.0);
    line(ctx, area.left, area.top, area.left, area.bottom());
    line(ctx, area.left, area.bottom(), area.right(), area.bottom());
    area
}

fn axis_label(ctx: &CanvasRenderingContext2d, text: &str, x: f64, y: f64, align: &str) {
    ctx.set_font("11px sans-serif");
    ctx.set_text_align(align);
    let _ = ctx.fill_text(text, x, y);
}

fn draw_line_chart(canvas: &HtmlCanvasElement, model: &LineChart) -> Result<(), UiError> {
    let ctx = context_2d(canvas)?;
    let area = frame(&ctx, canvas, model.title);
    line(&ctx, area.right(), area.top, area.right(), area.bottom());

    let label_y = area.bottom() + 16.0;
    let positions = chart::line_points(area, &vec![0.0; model.labels.len()], 1.0);
    for (label, (x, _)) in model.labels.iter().zip(positions) {
        axis_label(&ctx, label, x, label_y, "center");
    }

    for series in &model.series {
        let y_max = chart::axis_max(&series.values);
        let (x, align) = match series.axis {
            Axis::Left => (area.left - 4.0, "right"),
            Axis::Right => (area.right() + 4.0, "left"),
        };
        ctx.set_fill_style(&JsValue::from_str(series.color));
        axis_label(&ctx, &y_max.to_string(), x, area.top + 4.0, align);
        axis_label(&ctx, series.label, x, area.top - 8.0, align);

        ctx.set_stroke_style(&JsValue::from_str(series.color));
        ctx.set_line_width(2.0);
        let points = chart::line_points(area, &series.values, y_max);
        for pair in points.windows(2) {
            line(&ctx, pair[0].0, pair[0].1, pair[1].0, pair[1].1);
        }
        for (px, py) in &points {
            ctx.begin_path();
            let _ = ctx.arc(*px, *py, 3.0, 0.0, std::f64::consts::TAU);
            ctx.fill();
        }
    }
    Ok(())
}

fn draw_bar_chart(canvas: &HtmlCanvasElement, model: &BarChart) -> Result<(), UiError> {
    let ctx = context_2d(canvas)?;
    let area = frame(&ctx, canvas, model.title);
    axis_label(&ctx, &model.y_max.to_string(), area.left - 4.0, area.top + 4.0, "right");
    axis_label(&ctx, "0", area.left - 4.0, area.bottom(), "right");

    ctx.set_line_width(2.0);
    for (i, (bar, label)) in chart::bar_rects(area, &model.values, model.y_max)
        .into_iter()
        .zip(&model.labels)
        .enumerate()
    {
        let (fill, border) = chart::bar_colors(i);
        ctx.set_fill_style(&JsValue::from_str(fill));
        ctx.fill_rect(bar.x, bar.y, bar.width, bar.height);
        ctx.set_stroke_style(&JsValue::from_str(border));
        ctx.stroke_rect(bar.x, bar.y, bar.width, bar.height);
        ctx.set_fill_style(&JsValue::from_str(TEXT_COLOR));
        axis_label(&ctx, label, bar.x + bar.width / 2.0, area.bottom() + 16.0, "center");
    }
    Ok(())
}

impl DashboardView for DomDashboardView {
    fn show_statistics(&self, cards: &StatCards) {
        self.total_sessions.set_text_content(Some(&cards.total_sessions));
        self.total_time.set_text_content(Some(&cards.total_time));
        self.avg_reading_speed.set_text_content(Some(&cards.avg_reading_speed));
        self.weekly_progress.set_text_content(Some(&cards.weekly_progress));
    }

    fn draw_reading_progress(&self, chart: &LineChart) {
        if let Err(err) = draw_line_chart(&self.progress_canvas, chart) {
            log::error!("drawing reading progress failed: {err}");
        }
    }

    fn draw_game_scores(&self, chart: &BarChart) {
        if let Err(err) = draw_bar_chart(&self.scores_canvas, chart) {
            log::error!("drawing game scores failed: {err}");
        }
    }

    fn show_recommendations(&self, content: &Node) {
        if let Err(err) = replace_content(&self.recommendations, content) {
            log::error!("rendering recommendations failed: {err}");
        }
    }

    fn show_recent_activity(&self, content: &Node) {
        if let Err(err) = replace_content(&self.recent_activity, content) {
            log::error!("rendering recent activity failed: {err}");
        }
    }
}

/// Bind the dashboard page and load its data in the background.
#[wasm_bindgen]
pub fn start_dashboard() -> Result<(), JsValue> {
    let cfg = config::current();
    let controller = DashboardController::new(Api::new(FetchTransport, &cfg), DomDashboardView::bind()?);
    spawn_local(async move { controller.initialize().await });
    Ok(())
}
