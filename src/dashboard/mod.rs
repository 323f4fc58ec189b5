//! Progress dashboard: one aggregate fetch fanned out to the stat cards, two
//! charts and two list panels.

pub mod chart;

use serde::Deserialize;

use crate::api::{Api, Transport};
use crate::markup::{Element, Node, el};
use chart::{ACCURACY_COLOR, Axis, BarChart, LineChart, SPEED_COLOR, Series};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub total_sessions: u64,
    pub total_time_minutes: f64,
    pub avg_reading_speed: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReadingProgressPoint {
    pub date: String,
    #[serde(default)]
    pub avg_speed: f64,
    #[serde(default)]
    pub avg_accuracy: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GameScore {
    pub game: String,
    #[serde(default)]
    pub avg_score: f64,
    #[serde(default)]
    pub play_count: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub action: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Activity {
    pub activity_type: String,
    pub activity_name: String,
    pub created_at: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub reading_speed: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DashboardData {
    pub statistics: Statistics,
    #[serde(default)]
    pub reading_progress: Vec<ReadingProgressPoint>,
    #[serde(default)]
    pub game_scores: Vec<GameScore>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub recent_activities: Vec<Activity>,
}

/// Text of the four summary cards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCards {
    pub total_sessions: String,
    pub total_time: String,
    pub avg_reading_speed: String,
    pub weekly_progress: String,
}

impl From<&Statistics> for StatCards {
    fn from(stats: &Statistics) -> Self {
        Self {
            total_sessions: stats.total_sessions.to_string(),
            total_time: format!("{} min", stats.total_time_minutes),
            avg_reading_speed: format!("{} wpm", stats.avg_reading_speed),
            weekly_progress: format!("{} sessions", stats.total_sessions),
        }
    }
}

pub trait DashboardView {
    fn show_statistics(&self, cards: &StatCards);
    fn draw_reading_progress(&self, chart: &LineChart);
    fn draw_game_scores(&self, chart: &BarChart);
    fn show_recommendations(&self, content: &Node);
    fn show_recent_activity(&self, content: &Node);
}

pub struct DashboardController<T, V> {
    api: Api<T>,
    view: V,
}

impl<T: Transport, V: DashboardView> DashboardController<T, V> {
    pub fn new(api: Api<T>, view: V) -> Self {
        Self { api, view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn api(&self) -> &Api<T> {
        &self.api
    }

    /// Load and render everything; on failure nothing on the page changes.
    pub async fn initialize(&self) {
        let data = match self.api.dashboard_data().await {
            Ok(data) => data,
            Err(err) => {
                log::error!("Error loading dashboard data: {err}");
                return;
            }
        };
        log::info!(
            "dashboard loaded: {} progress points, {} games",
            data.reading_progress.len(),
            data.game_scores.len()
        );
        self.view.show_statistics(&StatCards::from(&data.statistics));
        self.view
            .draw_reading_progress(&reading_progress_chart(&data.reading_progress));
        self.view.draw_game_scores(&game_scores_chart(&data.game_scores));
        self.view
            .show_recommendations(&render_recommendations(&data.recommendations));
        self.view
            .show_recent_activity(&render_recent_activity(&data.recent_activities));
    }
}

pub fn reading_progress_chart(points: &[ReadingProgressPoint]) -> LineChart {
    LineChart {
        title: "Reading Progress Over Time",
        labels: points.iter().map(|p| date_part(&p.date).to_string()).collect(),
        series: vec![
            Series {
                label: "Reading Speed (WPM)",
                color: SPEED_COLOR,
                axis: Axis::Left,
                values: points.iter().map(|p| p.avg_speed).collect(),
            },
            Series {
                label: "Accuracy (%)",
                color: ACCURACY_COLOR,
                axis: Axis::Right,
                values: points.iter().map(|p| p.avg_accuracy).collect(),
            },
        ],
    }
}

pub fn game_scores_chart(scores: &[GameScore]) -> BarChart {
    BarChart {
        title: "Game Performance",
        labels: scores.iter().map(|s| s.game.clone()).collect(),
        values: scores.iter().map(|s| s.avg_score).collect(),
        y_max: 100.0,
    }
}

fn placeholder(message: &str) -> Node {
    el("p").class("text-gray-500 italic").text(message).into()
}

fn recommendation_icon(kind: &str) -> &'static str {
    match kind {
        "reading" => "📖",
        "games" => "🎮",
        _ => "🚀",
    }
}

fn activity_icon(kind: &str) -> &'static str {
    match kind {
        "reading" => "📖",
        "game" => "🎮",
        _ => "🔄",
    }
}

pub fn render_recommendations(recommendations: &[Recommendation]) -> Node {
    if recommendations.is_empty() {
        return placeholder("Great job! Keep up the good work!");
    }
    el("div")
        .class("space-y-4")
        .children(recommendations.iter().map(|rec| {
            el("div")
                .class("bg-blue-50 p-4 rounded-lg border-l-4 border-blue-400")
                .child(
                    el("div")
                        .class("flex items-start")
                        .child(el("div").class("text-2xl mr-3").text(recommendation_icon(&rec.kind)))
                        .child(
                            el("div")
                                .child(el("h4").class("font-semibold text-blue-800").text(rec.title.as_str()))
                                .child(el("p").class("text-blue-600 text-sm mt-1").text(rec.description.as_str()))
                                .child(
                                    el("button")
                                        .class("mt-2 text-blue-700 hover:text-blue-900 text-sm font-medium")
                                        .text(format!("{} →", rec.action)),
                                ),
                        ),
                )
        }))
        .into()
}

pub fn render_recent_activity(activities: &[Activity]) -> Node {
    if activities.is_empty() {
        return placeholder("No recent activity");
    }
    el("div")
        .class("space-y-3")
        .children(activities.iter().map(activity_row))
        .into()
}

fn activity_row(activity: &Activity) -> Element {
    let mut figures = el("div").class("text-right");
    if let Some(score) = activity.score.filter(|s| *s != 0.0) {
        figures = figures.child(el("p").class("font-semibold").text(format!("{}", score.round())));
    }
    if let Some(speed) = activity.reading_speed.filter(|s| *s != 0.0) {
        figures = figures.child(
            el("p")
                .class("text-sm text-gray-600")
                .text(format!("{} wpm", speed.round())),
        );
    }

    let when = match time_part(&activity.created_at) {
        Some(time) => format!("{} at {}", date_part(&activity.created_at), time),
        None => date_part(&activity.created_at).to_string(),
    };

    el("div")
        .class("flex items-center justify-between p-3 bg-gray-50 rounded-lg")
        .child(
            el("div")
                .class("flex items-center")
                .child(el("span").class("text-xl mr-3").text(activity_icon(&activity.activity_type)))
                .child(
                    el("div")
                        .child(el("p").class("font-medium").text(activity.activity_name.as_str()))
                        .child(el("p").class("text-sm text-gray-600").text(when)),
                ),
        )
        .child(figures)
}

/// `YYYY-MM-DD` of an ISO-8601 timestamp, or the input when it has no time part.
pub fn date_part(timestamp: &str) -> &str {
    timestamp
        .split_once(['T', ' '])
        .map_or(timestamp, |(date, _)| date)
}

/// `HH:MM` of an ISO-8601 timestamp.
pub fn time_part(timestamp: &str) -> Option<&str> {
    let (_, time) = timestamp.split_once(['T', ' '])?;
    time.get(..5).filter(|hm| hm.as_bytes().get(2) == Some(&b':'))
}
