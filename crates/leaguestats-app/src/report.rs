// Plain-text console summary of a league run.

use std::fmt::Write;

use leaguestats_core::analysis::{LeagueReport, SeasonReport};

/// Render standings, weekly extremes and careers as aligned text tables.
pub fn render(league: &LeagueReport) -> String {
    let mut out = String::new();

    for report in &league.seasons {
        render_season(&mut out, report);
        out.push('\n');
    }

    for failure in &league.failures {
        let _ = writeln!(out, "Season {} skipped: {}", failure.season, failure.error);
    }
    if !league.failures.is_empty() {
        out.push('\n');
    }

    if !league.careers.is_empty() {
        let _ = writeln!(out, "Career totals");
        let _ = writeln!(
            out,
            "{:<24} {:>8} {:>6} {:>10} {:>8}",
            "Owner", "Seasons", "Weeks", "Total", "Avg"
        );
        let mut careers: Vec<_> = league.careers.values().collect();
        careers.sort_by(|a, b| b.total_points.total_cmp(&a.total_points));
        for c in careers {
            let _ = writeln!(
                out,
                "{:<24} {:>8} {:>6} {:>10.2} {:>8.2}",
                truncate(&c.owner_name, 24),
                c.seasons.len(),
                c.weeks_played,
                c.total_points,
                c.average_points
            );
        }
    }

    out
}

fn render_season(out: &mut String, report: &SeasonReport) {
    let _ = writeln!(
        out,
        "Season {} ({} weeks, {} teams)",
        report.season,
        report.table.weeks.len(),
        report.summaries.len()
    );

    if report.standings.is_empty() {
        let _ = writeln!(out, "  no scores recorded");
        return;
    }

    let _ = writeln!(
        out,
        "{:>4} {:<28} {:<20} {:>6} {:>10} {:>8}",
        "#", "Team", "Owner", "Weeks", "Total", "Avg"
    );
    for ranked in &report.standings {
        let s = &ranked.summary;
        let _ = writeln!(
            out,
            "{:>4} {:<28} {:<20} {:>6} {:>10.2} {:>8.2}",
            ranked.rank,
            truncate(&s.team_name, 28),
            truncate(&s.owner_name, 20),
            s.weeks_played,
            s.total_points,
            s.average_points
        );
    }

    if let Some(extrema) = &report.extrema {
        let _ = writeln!(
            out,
            "High: {} week {} ({:.2})",
            extrema.highest.team_name, extrema.highest.week, extrema.highest.points
        );
        let _ = writeln!(
            out,
            "Low:  {} week {} ({:.2})",
            extrema.lowest.team_name, extrema.lowest.week, extrema.lowest.points
        );
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(width.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}
