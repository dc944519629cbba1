use serde::Serialize;

use crate::models::Sport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WidgetSize {
    pub w: i32,
    pub h: i32,
}

/// Static description of a widget a dashboard can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub supported_sports: &'static [Sport],
    pub default_size: WidgetSize,
    pub has_beginner_mode: bool,
    pub has_advanced_mode: bool,
}

pub const WIDGET_DEFINITIONS: &[WidgetDefinition] = &[
    WidgetDefinition {
        key: "tonights_slate",
        name: "Tonight's Games",
        description: "Displays tonight's matchups, odds, and status.",
        category: "Games",
        supported_sports: &Sport::ALL,
        default_size: WidgetSize { w: 4, h: 3 },
        has_beginner_mode: true,
        has_advanced_mode: true,
    },
    WidgetDefinition {
        key: "player_card",
        name: "Player Card",
        description: "Shows stats, recent performance, and trends for a player.",
        category: "Players",
        supported_sports: &Sport::ALL,
        default_size: WidgetSize { w: 3, h: 4 },
        has_beginner_mode: true,
        has_advanced_mode: true,
    },
    WidgetDefinition {
        key: "watchlist",
        name: "Team Watchlist",
        description: "Tracks favorite teams and shows whether they play tonight.",
        category: "Favorites",
        supported_sports: &Sport::ALL,
        default_size: WidgetSize { w: 3, h: 3 },
        has_beginner_mode: true,
        has_advanced_mode: true,
    },
    WidgetDefinition {
        key: "rb_vs_dline",
        name: "RB vs Defense Metric",
        description:
            "Displays a matchup-based projection for NFL RBs based on defense performance.",
        category: "Predictive",
        supported_sports: &[Sport::Nfl],
        default_size: WidgetSize { w: 4, h: 4 },
        has_beginner_mode: true,
        has_advanced_mode: true,
    },
];

pub fn find_widget(key: &str) -> Option<&'static WidgetDefinition> {
    WIDGET_DEFINITIONS.iter().find(|w| w.key == key)
}

pub fn widgets_for(sport: Sport) -> Vec<&'static WidgetDefinition> {
    WIDGET_DEFINITIONS
        .iter()
        .filter(|w| w.supported_sports.contains(&sport))
        .collect()
}
