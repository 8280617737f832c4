use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Verdict, VoteReport};
use crate::vote::Tally;

/// Render the vote table and verdict.
pub fn render(subject: &str, reports: &[VoteReport], tally: &Tally, verdict: Verdict, quiet: bool) {
    if quiet {
        println!("{}", colored_verdict(verdict));
        return;
    }

    println!(
        "\n {} v{}",
        "freedom-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Checking: {}\n", subject);

    if reports.is_empty() {
        println!(" No reference repository covers {}.\n", subject);
    } else {
        render_table(reports);
        println!();
    }

    println!(
        " {}   Verdict: {}\n",
        vote_summary(tally, reports.len()),
        colored_verdict(verdict)
    );
}

/// Every report that did not become a vote was an abstention.
fn vote_summary(tally: &Tally, reported: usize) -> String {
    let abstained = reported.saturating_sub(tally.votes);
    let mut summary = format!("Votes: {} free / {} cast", tally.free_votes, tally.votes);
    if abstained > 0 {
        summary.push_str(&format!(" ({} abstained)", abstained));
    }
    summary
}

fn render_table(reports: &[VoteReport]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Repository").add_attribute(Attribute::Bold),
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Licenses").add_attribute(Attribute::Bold),
            Cell::new("Vote").add_attribute(Attribute::Bold),
        ]);

    for report in reports {
        let (vote_str, vote_color) = match report.verdict {
            Verdict::Free => ("✓ free", Color::Green),
            Verdict::NonFree => ("✗ non-free", Color::Red),
            Verdict::Unknown => ("· abstain", Color::DarkGrey),
        };

        let licenses = if report.licenses.is_empty() {
            "-".to_string()
        } else {
            report.licenses.join(", ")
        };

        table.add_row(vec![
            Cell::new(&report.repository),
            Cell::new(&report.package),
            Cell::new(licenses),
            Cell::new(vote_str)
                .fg(vote_color)
                .set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}

fn colored_verdict(verdict: Verdict) -> ColoredString {
    let text = verdict.to_string();
    match verdict {
        Verdict::Free => text.green().bold(),
        Verdict::NonFree => text.red().bold(),
        Verdict::Unknown => text.yellow(),
    }
}
