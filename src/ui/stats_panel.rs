// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Travel statistics panel.

use crate::context::AppContext;
use crate::models::TravelStats;
use crate::ui::html::escape;

/// Emoji shown next to a continent name.
pub fn continent_emoji(name: &str) -> &'static str {
    match name.trim().to_lowercase().as_str() {
        "africa" | "afrique" => "🌍",
        "europe" => "🏰",
        "asia" | "asie" => "🌏",
        "north america" | "amérique du nord" => "🗽",
        "south america" | "amérique du sud" => "🌎",
        "oceania" | "océanie" => "🏝️",
        "antarctica" | "antarctique" => "🐧",
        _ => "🌐",
    }
}

/// Percentage with one decimal, e.g. "12.5%".
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Render the panel; nothing at all when there are no statistics.
pub fn render(stats: Option<&TravelStats>, ctx: &AppContext) -> String {
    let Some(stats) = stats else {
        return String::new();
    };
    let labels = ctx.labels();

    let mut html = format!(
        r#"<section class="stats-panel"><h2>{}</h2><div class="stat-cards">"#,
        escape(labels.stats_title)
    );
    for (value, label) in [
        (stats.countries_visited.to_string(), labels.countries),
        (stats.cities_visited.to_string(), labels.cities),
        (stats.continents_visited.to_string(), labels.continents),
        (format_percentage(stats.world_percentage), labels.of_the_world),
    ] {
        html.push_str(&format!(
            r#"<div class="stat-card"><strong>{}</strong> <span>{}</span></div>"#,
            escape(&value),
            escape(label)
        ));
    }
    html.push_str("</div>");

    if !stats.continents.is_empty() {
        html.push_str(r#"<ul class="continents">"#);
        for continent in &stats.continents {
            let total = if continent.total > 0 {
                format!(
                    "/{} ({})",
                    continent.total,
                    format_percentage(continent.percentage())
                )
            } else {
                String::new()
            };
            html.push_str(&format!(
                "<li>{} {} {}{}</li>",
                continent_emoji(&continent.name),
                escape(&continent.name),
                continent.visited,
                escape(&total)
            ));
        }
        html.push_str("</ul>");
    }

    if !stats.badges.is_empty() {
        html.push_str(&format!(
            r#"<h3>{}</h3><ul class="badges">"#,
            escape(labels.badges)
        ));
        for badge in &stats.badges {
            let class = if badge.earned { "badge earned" } else { "badge locked" };
            let icon = badge.icon.as_deref().unwrap_or("🏅");
            html.push_str(&format!(
                r#"<li class="{}" title="{}">{} {}</li>"#,
                class,
                escape(&badge.description),
                escape(icon),
                escape(&badge.name)
            ));
        }
        html.push_str("</ul>");
    }

    if let Some(ranking) = stats.ranking {
        html.push_str(&format!(
            r#"<p class="ranking">{}: #{} / {}</p>"#,
            escape(labels.ranking),
            ranking.position,
            ranking.total_users
        ));
    }

    html.push_str("</section>");
    html
}
