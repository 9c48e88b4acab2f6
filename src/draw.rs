use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use sportsfeed_api::leagues::{LeagueListing, Sport};
use sportsfeed_api::{CanonicalEvent, EventStatus, LinkKind, TeamSchedule};
use std::io::Write;

fn json_to<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn events<W: Write>(out: &mut W, events: &[CanonicalEvent], json: bool) -> anyhow::Result<()> {
    if json {
        return json_to(out, events);
    }
    if events.is_empty() {
        writeln!(out, "No events.")?;
        return Ok(());
    }
    for event in events {
        writeln!(out, "{}", summary_line(event))?;
    }
    writeln!(out, "\n{} events", events.len())?;
    Ok(())
}

pub fn event_detail<W: Write>(out: &mut W, event: &CanonicalEvent, json: bool) -> anyhow::Result<()> {
    if json {
        return json_to(out, event);
    }

    writeln!(out, "{}", event.title)?;
    writeln!(out, "  {} / {}", event.sport, event.league)?;
    writeln!(out, "  {:<10} {}", "Status", status_text(event))?;
    writeln!(out, "  {:<10} {}", "Start", local_time(event.start_time, "%a %d %b %Y %H:%M"))?;
    writeln!(out, "  {:<10} {}", "Venue", event.venue)?;
    if let Some(broadcast) = &event.broadcast {
        writeln!(out, "  {:<10} {broadcast}", "TV")?;
    }
    writeln!(out, "  {:<10} {} ({})", "Id", event.id, event.slug)?;

    let sides = &event.participants;
    writeln!(out, "\n  {:<4} {}", sides.home.abbreviation, sides.home.name)?;
    writeln!(out, "  {:<4} {}", sides.away.abbreviation, sides.away.name)?;

    if let Some(stats) = &event.statistics {
        writeln!(out, "\nStatistics")?;
        let rows = stats.home.len().max(stats.away.len());
        for i in 0..rows {
            let home = stats.home.get(i);
            let away = stats.away.get(i);
            let label = home.or(away).map(|s| s.abbreviation.as_str()).unwrap_or_default();
            writeln!(
                out,
                "  {:>8}  {:<6}  {:<8}",
                home.map(|s| s.display_value.as_str()).unwrap_or("-"),
                label,
                away.map(|s| s.display_value.as_str()).unwrap_or("-"),
            )?;
        }
    }

    if let Some(timeline) = &event.timeline {
        writeln!(out, "\nTimeline")?;
        for item in timeline {
            let who = item
                .athletes
                .iter()
                .map(|a| a.display_name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let team = item.team_name.as_deref().unwrap_or("");
            writeln!(out, "  {:>7}  {:<14} {team} {who}", item.clock, item.kind)?;
        }
    }

    if !event.links.is_empty() {
        writeln!(out, "\nLinks")?;
        for link in &event.links {
            let kind = match link.kind {
                LinkKind::Official => "official",
                LinkKind::Unofficial => "unofficial",
                LinkKind::Highlight => "highlight",
            };
            writeln!(out, "  [{kind}] {}: {}", link.label, link.url)?;
        }
    }
    Ok(())
}

pub fn sports<W: Write>(out: &mut W, sports: &[Sport], json: bool) -> anyhow::Result<()> {
    if json {
        return json_to(out, sports);
    }
    for sport in sports {
        writeln!(out, "{:<18} {}", sport.slug, sport.name)?;
    }
    Ok(())
}

pub fn leagues<W: Write>(out: &mut W, leagues: &[LeagueListing], json: bool) -> anyhow::Result<()> {
    if json {
        return json_to(out, leagues);
    }
    if leagues.is_empty() {
        writeln!(out, "No leagues.")?;
        return Ok(());
    }
    for league in leagues {
        let providers = league
            .providers
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            out,
            "{:<32} {:<32} {:<18} {providers}",
            league.slug, league.name, league.sport_slug
        )?;
    }
    Ok(())
}

pub fn team<W: Write>(out: &mut W, schedule: &TeamSchedule, json: bool) -> anyhow::Result<()> {
    if json {
        return json_to(out, schedule);
    }
    match &schedule.team {
        Some(team) => {
            writeln!(out, "{} ({})", team.name, team.abbreviation)?;
            let rows = [
                ("Record", &team.record_summary),
                ("Standing", &team.standing_summary),
                ("Season", &team.season),
            ];
            for (label, value) in rows {
                if let Some(value) = value {
                    writeln!(out, "  {label:<10} {value}")?;
                }
            }
            writeln!(out, "  {:<10} {}", "Id", team.id)?;
        }
        None => writeln!(out, "No team details from {}.", schedule.provider)?,
    }
    writeln!(out)?;
    events(out, &schedule.events, false)
}

/// `Sat 19:30  LIVE      Premier League  Arsenal vs Chelsea  1-0`
fn summary_line(event: &CanonicalEvent) -> String {
    let mut line = format!(
        "{}  {:<9} {:<22} {}",
        local_time(event.start_time, "%a %H:%M"),
        event.status.label().to_uppercase(),
        clip(&event.league, 22),
        event.title
    );
    if let Some(score) = &event.score {
        line.push_str(&format!("  {}-{}", score.display_home, score.display_away));
    }
    if event.is_main_event {
        line.push_str("  [main event]");
    }
    line
}

fn status_text(event: &CanonicalEvent) -> String {
    match (&event.score, event.status) {
        (Some(score), EventStatus::Live | EventStatus::Halftime | EventStatus::Finished) => format!(
            "{} {}-{}",
            event.status, score.display_home, score.display_away
        ),
        _ => event.status.to_string(),
    }
}

fn local_time(at: DateTime<Utc>, fmt: &str) -> String {
    at.with_timezone(&Local).format(fmt).to_string()
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> CanonicalEvent {
        serde_json::from_value(json!({
            "id": "365scores-3921",
            "slug": "arsenal-vs-chelsea-3921",
            "provider": "scores365",
            "title": "Arsenal vs Chelsea",
            "sport": "Soccer",
            "sport_slug": "soccer",
            "league": "Premier League",
            "participants": {
                "home": {"id": "365scores-team-110", "name": "Arsenal", "logo_ref": "", "abbreviation": "ARS"},
                "away": {"id": "365scores-team-131", "name": "Chelsea", "logo_ref": "", "abbreviation": "CHE"}
            },
            "start_time": "2025-03-01T15:00:00Z",
            "venue": "Emirates Stadium",
            "status": "live",
            "score": {"home": 1.0, "away": 0.0, "display_home": "1", "display_away": "0"},
            "links": [{"label": "Watch Live", "url": "https://example.com/#x", "kind": "unofficial"}],
            "broadcast": "Sky Sports",
            "is_main_event": false,
            "statistics": null,
            "timeline": null
        }))
        .unwrap()
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_summary_line_has_status_title_and_score() {
        let line = summary_line(&sample());
        assert!(line.contains("LIVE"));
        assert!(line.contains("Premier League"));
        assert!(line.ends_with("Arsenal vs Chelsea  1-0"));
    }

    #[test]
    fn test_event_list_text_and_json() {
        let text = render(|out| events(out, &[sample()], false));
        assert!(text.ends_with("1 events\n"));

        let json = render(|out| events(out, &[sample()], true));
        let parsed: Vec<CanonicalEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![sample()]);

        assert_eq!(render(|out| events(out, &[], false)), "No events.\n");
    }

    #[test]
    fn test_detail_lists_links_and_broadcast() {
        let text = render(|out| event_detail(out, &sample(), false));
        assert!(text.starts_with("Arsenal vs Chelsea\n"));
        assert!(text.contains("live 1-0"));
        assert!(text.contains("Sky Sports"));
        assert!(text.contains("[unofficial] Watch Live: https://example.com/#x"));
    }

    #[test]
    fn test_team_header_then_fixtures() {
        let schedule: TeamSchedule = serde_json::from_value(json!({
            "provider": "espn",
            "team": {
                "id": "espn-team-359", "name": "Arsenal", "abbreviation": "ARS", "logo_ref": "",
                "record_summary": "18-6-4", "standing_summary": null, "color": null,
                "season": "2024-25 English Premier League"
            },
            "events": [sample()]
        }))
        .unwrap();
        let text = render(|out| team(out, &schedule, false));
        assert!(text.starts_with("Arsenal (ARS)\n"));
        assert!(text.contains("Record     18-6-4"));
        assert!(!text.contains("Standing"));
        assert!(text.contains("Arsenal vs Chelsea  1-0"));

        let bare = TeamSchedule {
            team: None,
            events: Vec::new(),
            ..schedule
        };
        let text = render(|out| team(out, &bare, false));
        assert_eq!(text, "No team details from espn.\n\nNo events.\n");
    }

    #[test]
    fn test_listings() {
        let text = render(|out| sports(out, sportsfeed_api::leagues::SPORTS, false));
        assert!(text.lines().any(|l| l.starts_with("mma-ufc") && l.ends_with("MMA")));

        let listed = sportsfeed_api::leagues::listing(Some("mma"));
        let text = render(|out| leagues(out, &listed, false));
        assert!(text.lines().next().unwrap().starts_with("ufc"));
        assert!(text.contains("espn"));
        let json = render(|out| leagues(out, &listed, true));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[1]["slug"], "pfl");
        assert_eq!(render(|out| leagues(out, &[], false)), "No leagues.\n");
    }

    #[test]
    fn test_clip_long_league_names() {
        assert_eq!(clip("NBA", 5), "NBA");
        assert_eq!(clip("Mexican Liga BBVA MX", 8), "Mexican…");
    }
}
