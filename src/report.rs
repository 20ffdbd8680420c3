use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_results::*;

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::report::config_reader::*;
use crate::report::io_common::round2;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_markdown;

#[derive(Debug, Snafu)]
pub enum ReportError {
    #[snafu(display("Error reading survey file {path}"))]
    OpeningSurvey {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("No question could be recognized in {path}"))]
    EmptySurvey { path: String },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a number, found {content}"))]
    ParsingJsonNumber { content: String },
    #[snafu(display("The configuration file {path} has no parent directory"))]
    MissingParentDir { path: String },
    #[snafu(display("No survey to read: use --input or list a source in --config"))]
    MissingInput {},
    #[snafu(display("Invalid matching rules"))]
    InvalidRules { source: SurveyErrors },
    #[snafu(display("Error writing CSV file {path}"))]
    CsvWrite { source: csv::Error, path: String },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type ReportResult<T> = Result<T, ReportError>;

fn summary_to_json(s: &SurveySummary) -> JSValue {
    json!({
        "totalResponses": s.total_responses,
        "analyzedQuestions": s.analyzed_count,
        "skippedQuestions": s.skipped_count,
    })
}

fn question_to_json(q: &Question) -> JSValue {
    let mut js: JSMap<String, JSValue> = JSMap::new();
    js.insert("text".to_string(), json!(q.text));
    js.insert("type".to_string(), json!(q.question_type.name()));
    js.insert("total".to_string(), json!(question_total(q)));
    match q.question_type {
        QuestionType::SingleChoice | QuestionType::MultipleChoice | QuestionType::Rating => {
            let options: Vec<JSValue> = q
                .options
                .iter()
                .zip(q.counts.iter())
                .zip(percentages(&q.counts))
                .map(|((label, count), pct)| {
                    json!({"label": label, "count": count, "percentage": round2(pct)})
                })
                .collect();
            js.insert("options".to_string(), json!(options));
        }
        QuestionType::FillInBlank => {}
    }
    if q.question_type == QuestionType::Rating {
        // Absent when no option is an integer rating.
        if let Some(avg) = weighted_rating_average(q) {
            js.insert("average".to_string(), json!(round2(avg)));
        }
        if let Some(stats) = rating_stats(q) {
            js.insert(
                "ratingStats".to_string(),
                json!({
                    "count": stats.count,
                    "mean": round2(stats.mean),
                    "median": round2(stats.median),
                    "stdDev": stats.std_dev.map(round2),
                    "min": stats.min,
                    "max": stats.max,
                }),
            );
        }
    }
    JSValue::Object(js)
}

fn row_to_json(row: &ComparisonRow) -> JSValue {
    match row {
        ComparisonRow::Option {
            label,
            count1,
            percentage1,
            count2,
            percentage2,
            difference,
        } => json!({
            "option": label,
            "count1": count1,
            "percentage1": round2(*percentage1),
            "count2": count2,
            "percentage2": round2(*percentage2),
            "difference": round2(*difference),
        }),
        ComparisonRow::Statistic {
            kind,
            value1,
            value2,
            difference,
        } => json!({
            "statistic": kind.name(),
            "value1": round2(*value1),
            "value2": round2(*value2),
            "difference": round2(*difference),
        }),
    }
}

fn pair_to_json(pair: &MatchedPair) -> JSValue {
    let rows: Vec<JSValue> = compare(pair).iter().map(row_to_json).collect();
    json!({
        "question1": pair.question1.text,
        "question2": pair.question2.text,
        "type": pair.question_type.name(),
        "similarity": round2(pair.similarity),
        "rows": rows,
    })
}

pub fn build_survey_js(survey: &Survey) -> JSValue {
    let questions: Vec<JSValue> = survey.iter().map(question_to_json).collect();
    json!({
        "summary": summary_to_json(&summary(survey)),
        "questions": questions,
    })
}

pub fn build_comparison_js(
    settings: &Settings,
    survey1: &Survey,
    survey2: &Survey,
    pairs: &[MatchedPair],
) -> JSValue {
    let matches: Vec<JSValue> = pairs.iter().map(pair_to_json).collect();
    json!({
        "config": {
            "group1": settings.group1_name,
            "group2": settings.group2_name,
            "threshold": settings.rules.threshold,
        },
        "summaries": {
            "group1": summary_to_json(&summary(survey1)),
            "group2": summary_to_json(&summary(survey2)),
        },
        "matches": matches,
    })
}

fn write_output(out: &Option<String>, content: &str) -> ReportResult<()> {
    match out.as_deref() {
        None | Some("") | Some("stdout") => {
            println!("{}", content);
        }
        Some(path) => {
            info!("Writing report to {:?}", path);
            fs::write(path, content).context(WritingOutputSnafu { path })?;
        }
    }
    Ok(())
}

fn check_reference(reference_path: &str, pretty_js: &str) -> ReportResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference: {:?}", summary_ref);
    let pretty_js_ref = serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    if pretty_js_ref != pretty_js {
        warn!("Found differences with the reference report");
        print_diff(pretty_js_ref.as_str(), pretty_js, "\n");
        whatever!("Difference detected between the report and the reference report")
    }
    info!("The report matches the reference {:?}", reference_path);
    Ok(())
}

/// Produces the report described by the settings.
///
/// With a single survey, the report is the summary and the breakdown of every
/// question. With two surveys, it is the list of matched questions and how
/// their answers differ.
pub fn run_report(settings: &Settings) -> ReportResult<()> {
    info!("settings: {:?}", settings);
    let survey1 = io_markdown::read_survey(&settings.input)?;

    let report_js = match &settings.compare {
        None => build_survey_js(&survey1),
        Some(compare_path) => {
            let survey2 = io_markdown::read_survey(compare_path)?;
            let pairs = find_matches(&survey1, &survey2, &settings.rules);
            if pairs.is_empty() {
                warn!(
                    "No matching questions between {:?} and {:?}",
                    settings.input, compare_path
                );
            }
            for pair in pairs.iter() {
                info!(
                    "{:.1}% {} {:?} <-> {:?}",
                    pair.similarity * 100.0,
                    pair.question_type.name(),
                    pair.question1.text,
                    pair.question2.text
                );
            }
            if let Some(csv_path) = &settings.csv {
                io_csv::write_comparison_csv(
                    csv_path,
                    &pairs,
                    &settings.group1_name,
                    &settings.group2_name,
                )?;
            }
            build_comparison_js(settings, &survey1, &survey2, &pairs)
        }
    };

    let pretty_js = serde_json::to_string_pretty(&report_js).context(ParsingJsonSnafu {})?;
    write_output(&settings.out, &pretty_js)?;

    // The reference report, if provided for comparison
    if let Some(reference_path) = &settings.reference {
        check_reference(reference_path, &pretty_js)?;
    }
    Ok(())
}

pub fn run(args: &Args) -> ReportResult<()> {
    let settings = resolve_settings(args)?;
    run_report(&settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const SURVEY_2023: &str = "问题1:【评分题】您对新手引导教程的满意度如何？\n\
        1: 52 (8.64%)\n\
        2: 11 (1.83%)\n\
        3: 108 (17.94%)\n\
        4: 124 (20.60%)\n\
        5: 307 (51.00%)\n\
        \n\
        问题2:【多选题】对于新手教学，您认为不太满意的地方主要是？\n\
        选项1: 28 (12.07%)\n\
        选项2: 35 (15.09%)\n\
        \n\
        问题3:【填空题】其他建议\n\
        37\n";

    const SURVEY_2024: &str = "问题1:【评分题】您对新手引导的满意度如何？\n\
        1: 10\n\
        5: 90\n\
        \n\
        问题2:【多选题】对于新手教学，您认为不太满意的地方主要是？\n\
        选项2: 40\n\
        选项3: 10\n\
        \n\
        问题3:【填空题】其他建议\n\
        12\n";

    fn write(dir: &Path, name: &str, content: &str) -> String {
        let p = dir.join(name);
        fs::write(&p, content).unwrap();
        p.display().to_string()
    }

    fn settings(input: String, compare: Option<String>, out: String) -> Settings {
        Settings {
            input,
            compare,
            rules: MatchRules::DEFAULT_RULES,
            group1_name: "2023".to_string(),
            group2_name: "2024".to_string(),
            out: Some(out),
            csv: None,
            reference: None,
        }
    }

    #[test]
    fn single_survey_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "2023.md", SURVEY_2023);
        let out = dir.path().join("report.json").display().to_string();
        run_report(&settings(input, None, out.clone())).unwrap();

        let js = read_summary(&out).unwrap();
        assert_eq!(js["summary"]["totalResponses"], json!(602));
        assert_eq!(js["summary"]["analyzedQuestions"], json!(2));
        assert_eq!(js["summary"]["skippedQuestions"], json!(1));
        let questions = js["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0]["type"], json!("rating"));
        assert_eq!(questions[0]["average"], json!(4.03));
        assert_eq!(questions[0]["ratingStats"]["median"], json!(5.0));
        assert_eq!(questions[0]["options"][4]["percentage"], json!(51.0));
        assert_eq!(questions[2]["total"], json!(37));
        assert!(questions[2].get("options").is_none());
    }

    #[test]
    fn comparison_report_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "2023.md", SURVEY_2023);
        let compare = write(dir.path(), "2024.md", SURVEY_2024);
        let out = dir.path().join("report.json").display().to_string();
        let csv_path = dir.path().join("diff.csv").display().to_string();
        let mut s = settings(input, Some(compare), out.clone());
        s.csv = Some(csv_path.clone());
        run_report(&s).unwrap();

        let js = read_summary(&out).unwrap();
        assert_eq!(js["config"]["group1"], json!("2023"));
        assert_eq!(js["summaries"]["group2"]["totalResponses"], json!(100));
        let matches = js["matches"].as_array().unwrap();
        // The fill in the blank questions are not paired.
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0]["type"], json!("multiple_choice"));
        assert_eq!(matches[0]["similarity"], json!(1.0));
        assert_eq!(matches[0]["rows"].as_array().unwrap().len(), 3);
        assert_eq!(matches[1]["type"], json!("rating"));
        assert_eq!(matches[1]["rows"][0]["statistic"], json!("mean"));
        assert_eq!(matches[1]["rows"][3]["statistic"], json!("min"));
        assert_eq!(matches[1]["rows"][4]["statistic"], json!("max"));
        assert_eq!(matches[1]["rows"][4]["value1"], json!(5.0));

        let csv_content = fs::read_to_string(&csv_path).unwrap();
        // header, 3 option rows, then 5 statistics and 5 ratings.
        assert_eq!(csv_content.lines().count(), 1 + 3 + 5 + 5);
    }

    #[test]
    fn reference_check() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "2023.md", SURVEY_2023);
        let out = dir.path().join("report.json").display().to_string();
        run_report(&settings(input.clone(), None, out.clone())).unwrap();

        let mut s = settings(input.clone(), None, dir.path().join("again.json").display().to_string());
        s.reference = Some(out);
        run_report(&s).unwrap();

        let other = write(dir.path(), "other.json", "{\"summary\": {}}");
        let mut s = settings(input, None, dir.path().join("third.json").display().to_string());
        s.reference = Some(other);
        assert!(matches!(
            run_report(&s),
            Err(ReportError::Whatever { .. })
        ));
    }

    #[test]
    fn run_from_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(dir.path(), "2023.md", SURVEY_2023);
        let out = dir.path().join("report.json").display().to_string();
        let args = Args {
            input: Some(input),
            out: Some(out.clone()),
            ..Args::default()
        };
        run(&args).unwrap();
        assert!(Path::new(&out).exists());
    }
}
