//! Pure Markdown rendering of analytics output.
//!
//! Report sections mirror the charts of the journal app: time split, daily
//! trend, weekly rhythm, intensity curve, golden hours, deep work, energy
//! balance. Drill-down records render grouped under day headers:
//!   # Friday, 15 Aug 2025
//!   * 09:00 Coding `[Work]`

use crate::analytics::AggregationResult;
use crate::drilldown::DrillDownRecord;
use chrono::NaiveDate;

const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Session lengths grouped into the 1h / 2h / 3h / 4h+ buckets the deep-work
/// chart shows.
pub fn deep_work_buckets(sessions: &[u32]) -> [u32; 4] {
    let mut buckets = [0u32; 4];
    for &len in sessions {
        match len {
            0 => {}
            1..=3 => buckets[len as usize - 1] += 1,
            _ => buckets[3] += 1,
        }
    }
    buckets
}

/// `9` → `09:00 - 10:00`
pub fn format_hour_range(hour: u8) -> String {
    format!("{:02}:00 - {:02}:00", hour, hour + 1)
}

/// Formats a date according to the user's configuration.
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    date.format(date_format).to_string()
}

/// Renders the full report as Markdown.
pub fn format_report(result: &AggregationResult, date_format: &str) -> String {
    let mut md = String::from("# Time insights\n\n");
    md.push_str(&format!(
        "**{}** records across **{}** day(s). Productivity ratio: **{:.1}%**.\n\n",
        result.total_records, result.period_days, result.productivity_ratio
    ));

    if !result.pie_data.is_empty() {
        md.push_str("## Time split\n\n");
        md.push_str("|:-:|:-:|\n|**Tag**|**Count**|\n");
        for slice in &result.pie_data {
            md.push_str(&format!("|{}|{}|\n", slice.tag, slice.count));
        }
        md.push_str("|-|\n\n");
    }

    if !result.daily_trend.is_empty() {
        md.push_str("## Daily trend\n\n");
        md.push_str("|:-:|:-:|\n|**Date**|**Records**|\n");
        for day in &result.daily_trend {
            md.push_str(&format!(
                "|{}|{}|\n",
                format_date(day.date, date_format),
                day.count
            ));
        }
        md.push_str("|-|\n\n");
    }

    md.push_str("## Weekly rhythm\n\n");
    md.push_str("|:-:|:-:|:-:|\n|**Day**|**Avg records**||\n");
    for load in &result.weekday_data {
        md.push_str(&format!(
            "|{}|{:.1}|{}|\n",
            WEEKDAY_NAMES[load.weekday as usize],
            load.avg_count,
            if load.is_weekend { "weekend" } else { "" }
        ));
    }
    md.push_str("|-|\n\n");

    let active_hours: Vec<(usize, u32)> = result
        .hour_dist_all
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(hour, &count)| (hour, count))
        .collect();
    if !active_hours.is_empty() {
        md.push_str("## Intensity\n\n");
        for (hour, count) in active_hours {
            md.push_str(&format!("* {hour:02}:00 {}\n", "▪".repeat(count as usize)));
        }
        md.push('\n');
    }

    if !result.golden_hours.is_empty() {
        md.push_str("## Golden hours\n\n");
        for (rank, gh) in result.golden_hours.iter().enumerate() {
            md.push_str(&format!(
                "{}. {} focused {} time(s)\n",
                rank + 1,
                format_hour_range(gh.hour),
                gh.count
            ));
        }
        md.push('\n');
    }

    if !result.deep_work_sessions.is_empty() {
        let buckets = deep_work_buckets(&result.deep_work_sessions);
        md.push_str("## Deep work\n\n");
        md.push_str("|:-:|:-:|:-:|:-:|\n|**1h**|**2h**|**3h**|**4h+**|\n");
        md.push_str(&format!(
            "|{}|{}|{}|{}|\n",
            buckets[0], buckets[1], buckets[2], buckets[3]
        ));
        md.push_str("|-|\n\n");
    }

    let balance = &result.energy_balance;
    if balance.production + balance.recovery + balance.other > 0 {
        md.push_str("## Energy balance\n\n");
        md.push_str(&format!("* production: {}\n", balance.production));
        md.push_str(&format!("* recovery: {}\n", balance.recovery));
        md.push_str(&format!("* other: {}\n", balance.other));
    }

    md
}

/// Renders drill-down records as Markdown, grouped under day headers.
pub fn format_drill_down(records: &[DrillDownRecord], date_format: &str) -> String {
    let mut md = String::new();
    let mut current_date: Option<NaiveDate> = None;
    for record in records {
        if current_date != Some(record.date) {
            if current_date.is_some() {
                md.push('\n');
            }
            md.push_str(&format!("# {}\n\n", format_date(record.date, date_format)));
            current_date = Some(record.date);
        }
        let tags = if record.entry.tags.is_empty() {
            String::new()
        } else {
            format!(" `[{}]`", record.entry.tags.join(", "))
        };
        md.push_str(&format!(
            "* {:02}:00 {}{}\n",
            record.entry.hour, record.entry.content, tags
        ));
    }
    md
}
