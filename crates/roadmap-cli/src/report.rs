//! Plain-text stats report

use std::io::{self, Write};

use roadmap_layout::RoadmapView;

const HEADERS: [&str; 5] = ["Sprint", "Statut", "Stories", "Points", "Progrès"];

/// Write one line per visible sprint plus a totals line and any data issues
pub fn write_stats<W: Write>(view: &RoadmapView, mut out: W) -> io::Result<()> {
    writeln!(
        out,
        "{} ({} → {}, {} jours)",
        view.window.label, view.window.start_date, view.window.end_date, view.window.total_days
    )?;

    let mut rows: Vec<[String; 5]> = view
        .sprints
        .iter()
        .map(|sprint| {
            [
                sprint.name.clone(),
                sprint.status.as_str().to_string(),
                format!("{}/{}", sprint.stats.completed_stories, sprint.stats.total_stories),
                format!("{}/{}", sprint.stats.completed_points, sprint.stats.total_points),
                format!("{}%", sprint.stats.progress_percent),
            ]
        })
        .collect();
    let totals = &view.totals;
    rows.push([
        format!(
            "Total ({} sprint{})",
            totals.sprints,
            if totals.sprints > 1 { "s" } else { "" }
        ),
        String::new(),
        format!("{}/{}", totals.completed_stories, totals.total_stories),
        format!("{}/{}", totals.completed_points, totals.total_points),
        format!("{}%", totals.progress_percent),
    ]);

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(&mut out, &HEADERS.map(String::from), &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("  "))?;
    for row in &rows {
        write_row(&mut out, row, &widths)?;
    }

    if !view.issues.is_empty() {
        writeln!(out)?;
        for issue in &view.issues {
            writeln!(out, "warning: {}", issue)?;
        }
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String; 5], widths: &[usize; 5]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            let fill = " ".repeat(width - cell.chars().count());
            // text columns left-aligned, numbers right-aligned
            if i < 2 {
                format!("{}{}", cell, fill)
            } else {
                format!("{}{}", fill, cell)
            }
        })
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roadmap_core::{Granularity, RoadmapData, Sprint, Story, StoryStatus};
    use roadmap_layout::{recompute, InteractionState, RoadmapFilters, RoadmapInput, Viewport};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn report(data: &RoadmapData) -> String {
        let filters = RoadmapFilters::default();
        let input = RoadmapInput {
            data,
            reference_date: date(2025, 1, 1),
            granularity: Granularity::Month,
            filters: &filters,
            viewport: Viewport::new(1280.0),
            today: date(2025, 1, 1),
        };
        let view = recompute(&input, &InteractionState::default());
        let mut out = Vec::new();
        write_stats(&view, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn table_lists_sprints_and_totals() {
        let data = RoadmapData {
            sprints: vec![Sprint::new("s1", date(2025, 1, 1), date(2025, 1, 10))
                .name("Sprint 1")
                .story("a")
                .story("b")],
            stories: vec![
                Story::new("a").estimation(3.0).status(StoryStatus::Done),
                Story::new("b").estimation(1.0),
            ],
            ..RoadmapData::default()
        };
        let text = report(&data);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Janvier 2025 (2025-01-01 → 2025-01-31, 31 jours)");
        assert!(lines[1].starts_with("Sprint"));
        assert!(lines[3].starts_with("Sprint 1"));
        assert!(lines[3].ends_with("75%"));
        assert!(lines[3].contains("1/2"));
        assert!(lines[3].contains("3/4"));
        assert!(lines[4].starts_with("Total (1 sprint) "), "{}", lines[4]);
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn total_label_agrees_with_sprint_count() {
        let empty = report(&RoadmapData::default());
        assert!(empty.lines().any(|l| l.starts_with("Total (0 sprint)")));

        let data = RoadmapData {
            sprints: vec![
                Sprint::new("s1", date(2025, 1, 1), date(2025, 1, 10)),
                Sprint::new("s2", date(2025, 1, 13), date(2025, 1, 24)),
            ],
            ..RoadmapData::default()
        };
        assert!(report(&data).lines().any(|l| l.starts_with("Total (2 sprints)")));
    }

    #[test]
    fn issues_follow_the_table() {
        let data = RoadmapData {
            sprints: vec![Sprint::new("s1", date(2025, 1, 1), date(2025, 1, 10)).product("p9")],
            ..RoadmapData::default()
        };
        let text = report(&data);
        assert!(text.ends_with("warning: [missing-product] s1: product 'p9' not found\n"));
    }
}
