// Writing comparison tables in CSV format.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::report::io_common::{format_share, format_share_difference};
use crate::report::*;

fn header(group1_name: &str, group2_name: &str) -> Vec<String> {
    vec![
        "type".to_string(),
        "similarity".to_string(),
        format!("{} question", group1_name),
        format!("{} question", group2_name),
        "item".to_string(),
        format!("{} value", group1_name),
        format!("{} share", group1_name),
        format!("{} value", group2_name),
        format!("{} share", group2_name),
        "difference".to_string(),
    ]
}

fn row_record(pair: &MatchedPair, row: &ComparisonRow) -> Vec<String> {
    let mut record = vec![
        pair.question_type.name().to_string(),
        format!("{:.2}%", pair.similarity * 100.0),
        pair.question1.text.clone(),
        pair.question2.text.clone(),
    ];
    match row {
        ComparisonRow::Option {
            label,
            count1,
            percentage1,
            count2,
            percentage2,
            difference,
        } => record.extend([
            label.clone(),
            count1.to_string(),
            format_share(*percentage1),
            count2.to_string(),
            format_share(*percentage2),
            format_share_difference(*difference),
        ]),
        ComparisonRow::Statistic {
            kind,
            value1,
            value2,
            difference,
        } => record.extend([
            kind.name().to_string(),
            format!("{:.2}", value1),
            "".to_string(),
            format!("{:.2}", value2),
            "".to_string(),
            format!("{:+.2}", difference),
        ]),
    }
    record
}

/// Writes the comparison rows of all the pairs, one line per row.
///
/// The file starts with a byte order mark so that spreadsheet programs detect UTF-8.
/// Returns the number of rows written.
pub fn write_comparison_csv(
    path: &str,
    pairs: &[MatchedPair],
    group1_name: &str,
    group2_name: &str,
) -> ReportResult<usize> {
    info!("Writing comparison table to {:?}", path);
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context(WritingOutputSnafu { path })?;
        }
    }
    let mut file = File::create(path).context(WritingOutputSnafu { path })?;
    file.write_all("\u{feff}".as_bytes())
        .context(WritingOutputSnafu { path })?;

    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(header(group1_name, group2_name))
        .context(CsvWriteSnafu { path })?;
    let mut num_rows = 0;
    for pair in pairs {
        let rows = compare(pair);
        if rows.is_empty() {
            debug!(
                "write_comparison_csv: nothing to compare for {:?}",
                pair.question1.text
            );
        }
        for row in rows.iter() {
            wtr.write_record(row_record(pair, row))
                .context(CsvWriteSnafu { path })?;
            num_rows += 1;
        }
    }
    wtr.flush().context(WritingOutputSnafu { path })?;
    info!("Wrote {} comparison rows", num_rows);
    Ok(num_rows)
}
