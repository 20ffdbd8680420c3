use std::path::{Path, PathBuf};

use crate::args::Args;
use crate::report::io_common::simplify_file_name;
use crate::report::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "group1Name")]
    pub group1_name: Option<String>,
    #[serde(rename = "group2Name")]
    pub group2_name: Option<String>,
    #[serde(rename = "generateCsv")]
    pub generate_csv: Option<bool>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveySource {
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "groupName")]
    pub group_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchingSettings {
    // Either a number or a string holding a number.
    threshold: Option<JSValue>,
}

impl MatchingSettings {
    pub fn threshold(&self) -> ReportResult<Option<f64>> {
        match &self.threshold {
            None => Ok(None),
            Some(x) => read_js_float(x).map(Some),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct SurveyConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "surveySources", default)]
    pub survey_sources: Vec<SurveySource>,
    #[serde(default)]
    pub matching: MatchingSettings,
}

/// Everything needed to produce a report, once the command line and the
/// configuration file have been merged.
#[derive(PartialEq, Debug, Clone)]
pub struct Settings {
    pub input: String,
    pub compare: Option<String>,
    pub rules: MatchRules,
    pub group1_name: String,
    pub group2_name: String,
    pub out: Option<String>,
    pub csv: Option<String>,
    pub reference: Option<String>,
}

pub fn read_config(path: &str) -> ReportResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: {:?}", contents);
    let config: SurveyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    info!("config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> ReportResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

fn read_js_float(x: &JSValue) -> ReportResult<f64> {
    match x {
        JSValue::Number(n) => n.as_f64().context(ParsingJsonNumberSnafu {
            content: n.to_string(),
        }),
        JSValue::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .context(ParsingJsonNumberSnafu { content: s.clone() }),
        _ => ParsingJsonNumberSnafu {
            content: x.to_string(),
        }
        .fail(),
    }
}

fn relative_to(root: &Path, file_path: &str) -> String {
    root.join(file_path).display().to_string()
}

/// Merges the command line with the configuration file, if any.
///
/// Paths of the configuration file are relative to the directory of the file.
/// Command line options win over the file.
pub fn resolve_settings(args: &Args) -> ReportResult<Settings> {
    let (config, root) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {
                    path: config_path.clone(),
                })?
                .to_path_buf();
            (config, root)
        }
        None => (SurveyConfig::default(), PathBuf::new()),
    };

    let sources = &config.survey_sources;

    let input = match (&args.input, sources.first()) {
        (Some(p), _) => p.clone(),
        (None, Some(s)) => relative_to(&root, &s.file_path),
        (None, None) => return MissingInputSnafu {}.fail(),
    };
    let compare = match (&args.compare, sources.get(1)) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(s)) => Some(relative_to(&root, &s.file_path)),
        (None, None) => None,
    };
    if sources.len() > 2 {
        warn!(
            "Only the first two survey sources are used, {} were given",
            sources.len()
        );
    }

    let threshold = match args.threshold {
        Some(t) => Some(t),
        None => config.matching.threshold()?,
    };
    let rules = match threshold {
        Some(t) => MatchRules::with_threshold(t).context(InvalidRulesSnafu {})?,
        None => MatchRules::DEFAULT_RULES,
    };

    let output = &config.output_settings;
    let group1_name = args
        .group1_name
        .clone()
        .or_else(|| output.group1_name.clone())
        .or_else(|| sources.first().and_then(|s| s.group_name.clone()))
        .unwrap_or_else(|| simplify_file_name(&input));
    let group2_name = args
        .group2_name
        .clone()
        .or_else(|| output.group2_name.clone())
        .or_else(|| sources.get(1).and_then(|s| s.group_name.clone()))
        .unwrap_or_else(|| match &compare {
            Some(p) => simplify_file_name(p),
            None => "group 2".to_string(),
        });

    let output_dir = match &output.output_directory {
        Some(d) => root.join(d),
        None => root.clone(),
    };
    let csv = match (&args.csv, output.generate_csv) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(true)) if compare.is_some() => Some(
            output_dir
                .join(format!("comparison_{}_vs_{}.csv", group1_name, group2_name))
                .display()
                .to_string(),
        ),
        _ => None,
    };

    Ok(Settings {
        input,
        compare,
        rules,
        group1_name,
        group2_name,
        out: args.out.clone(),
        csv,
        reference: args.reference.clone(),
    })
}
