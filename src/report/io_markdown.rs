// Reading survey documents from disk.

use crate::report::*;

/// Reads and parses one survey document.
///
/// A document in which no question could be recognized is an error here: there
/// is nothing to report on.
pub fn read_survey(path: &str) -> ReportResult<Survey> {
    info!("Attempting to read survey file {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningSurveySnafu { path })?;
    // Exports made for spreadsheet programs often start with a byte order mark.
    let contents = contents.strip_prefix('\u{feff}').unwrap_or(&contents);
    let survey = parse_survey(contents);
    ensure!(!survey.is_empty(), EmptySurveySnafu { path });
    debug!(
        "read_survey: {:?}: {:?}",
        path,
        survey.iter().map(|q| &q.text).collect::<Vec<_>>()
    );
    Ok(survey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_with_byte_order_mark() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("s.md");
        fs::write(&p, "\u{feff}问题1:【单选题】Q\nA: 1\n").unwrap();
        let survey = read_survey(p.to_str().unwrap()).unwrap();
        assert_eq!(survey.get("Q").unwrap().counts, vec![1]);
    }

    #[test]
    fn empty_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("empty.md");
        fs::write(&p, "nothing to see\n").unwrap();
        assert!(matches!(
            read_survey(p.to_str().unwrap()),
            Err(ReportError::EmptySurvey { .. })
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_survey("/definitely/not/here.md"),
            Err(ReportError::OpeningSurvey { .. })
        ));
    }
}
