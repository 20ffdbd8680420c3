use clap::Parser;

/// Summaries and comparisons of survey results.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the surveys to read and how to compare them.
    /// See the manual of the survey_results crate for the fields.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The survey results to read. Setting this option overrides the first
    /// source of the --config file.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, optional) A second survey to compare against the input. Setting this option
    /// overrides the second source of the --config file.
    #[clap(short = 'x', long, value_parser)]
    pub compare: Option<String>,

    /// (number between 0 and 1, default 0.6) Questions are paired when the similarity of their
    /// text is strictly above this value.
    #[clap(short, long, value_parser)]
    pub threshold: Option<f64>,

    /// (default 'group 1') The name of the input survey in reports.
    #[clap(long, value_parser)]
    pub group1_name: Option<String>,

    /// (default 'group 2') The name of the compared survey in reports.
    #[clap(long, value_parser)]
    pub group2_name: Option<String>,

    /// (file path, 'stdout' or empty) Where to write the JSON report. Defaults to stdout.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, optional) When comparing two surveys, also write the comparison rows in CSV
    /// format to this location.
    #[clap(long, value_parser)]
    pub csv: Option<String>,

    /// (file path) A reference JSON report. If provided, surveycmp will check that its own
    /// report matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
