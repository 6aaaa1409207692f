use chrono::prelude::*;
use std::error::Error;
use std::{
    io::Write,
    path::{Path, PathBuf},
    time::{Duration, Instant, SystemTime},
};

use autocomplete::harness::{
    MisspellingTest, SpellingCorrectionTestResult, SpellingCorrectionTester, TesterConfig,
    NUMBER_OF_SUGGESTIONS_TO_CHECK,
};
use autocomplete::matcher::MatcherKind;
use distance::damerau_levenshtein;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use structopt::clap::{App, AppSettings, Arg};

fn load_words(path: &str, max_words: Option<usize>) -> Result<Vec<MisspellingTest>, Box<dyn Error>> {
    let mut rdr = csv::ReaderBuilder::new()
        .comment(Some(b'#'))
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    Ok(rdr
        .records()
        .filter_map(Result::ok)
        .filter_map(|r| {
            r.get(0)
                .and_then(|x| r.get(1).map(|y| MisspellingTest::new(x, y)))
        })
        .take(max_words.unwrap_or(std::usize::MAX))
        .collect())
}

#[derive(Debug, Default, Serialize, PartialOrd, Ord, PartialEq, Eq, Clone, Copy)]
struct Time {
    secs: u64,
    subsec_nanos: u32,
}

impl From<Duration> for Time {
    fn from(d: Duration) -> Time {
        Time {
            secs: d.as_secs(),
            subsec_nanos: d.subsec_nanos(),
        }
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let us = self.secs * 1_000_000 + (self.subsec_nanos as u64 / 1_000);
        write!(f, "{}µs", us)
    }
}

#[derive(Debug, Serialize)]
struct AccuracyResult<'a> {
    #[serde(flatten)]
    result: SpellingCorrectionTestResult<'a>,
    distance: usize,
    time: Time,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    config: &'a TesterConfig,
    summary: Summary,
    results: Vec<AccuracyResult<'a>>,
    start_timestamp: Time,
    total_time: Time,
}

#[derive(Serialize, Default, Debug, Clone)]
struct Summary {
    total_words: u32,
    first_character: u32,
    within_four: u32,
    any_position: u32,
    never: u32,
    characters_saved: f32,
    slowest_lookup: Time,
    fastest_lookup: Time,
    average_time: Time,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let percent =
            |v: u32| -> String { format!("{:.2}%", v as f32 / self.total_words as f32 * 100f32) };

        write!(
            f,
            "[1] {} [<=4] {} [any] {} [never] {} [saved] {:.2}% [fast] {} [slow] {} [avg] {}",
            percent(self.first_character),
            percent(self.within_four),
            percent(self.any_position),
            percent(self.never),
            self.characters_saved * 100f32,
            self.fastest_lookup,
            self.slowest_lookup,
            self.average_time,
        )
    }
}

impl Summary {
    fn new<'a>(results: &[AccuracyResult<'a>]) -> Summary {
        let mut summary = Summary::default();
        let mut saved = 0f32;
        let mut total_time = Duration::default();

        results.iter().for_each(|r| {
            summary.total_words += 1;
            total_time += r.result.time_taken();

            match r.result.found_at() {
                Some(n) => {
                    summary.any_position += 1;

                    if n == 1 {
                        summary.first_character += 1;
                    }

                    if n <= 4 {
                        summary.within_four += 1;
                    }

                    let length = r.result.source_test().target_word().chars().count();
                    if length > 0 {
                        saved += 1f32 - (n.min(length) as f32 / length as f32);
                    }
                }
                None => summary.never += 1,
            }
        });

        if summary.total_words > 0 {
            summary.characters_saved = saved / summary.total_words as f32;
            summary.average_time = (total_time / summary.total_words).into();
        }

        summary.slowest_lookup = results.iter().map(|r| r.time).max().unwrap_or_default();
        summary.fastest_lookup = results.iter().map(|r| r.time).min().unwrap_or_default();

        summary
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let matches = App::new("autocomplete-accuracy")
        .setting(AppSettings::ArgRequiredElseHelp)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Accuracy testing for autocomplete matchers.")
        .arg(
            Arg::with_name("config")
                .short("c")
                .takes_value(true)
                .help("Provide JSON config file to override test defaults"),
        )
        .arg(
            Arg::with_name("words")
                .value_name("WORDS")
                .help("The 'misspelling -> target' list in tab-delimited value file (TSV)"),
        )
        .arg(
            Arg::with_name("dictionaries")
                .short("d")
                .takes_value(true)
                .help("Directory holding <language>.dic dictionaries (default: Dictionaries)"),
        )
        .arg(
            Arg::with_name("language")
                .short("l")
                .takes_value(true)
                .help("Language tag of the dictionary to load (default: en)"),
        )
        .arg(
            Arg::with_name("matcher")
                .short("m")
                .takes_value(true)
                .help("Matching strategy, 'basic' or 'ngram' (default: ngram)"),
        )
        .arg(
            Arg::with_name("json-output")
                .short("o")
                .value_name("JSON-OUTPUT")
                .help("The file path for the JSON report output"),
        )
        .arg(
            Arg::with_name("tsv-output")
                .short("t")
                .value_name("TSV-OUTPUT")
                .help("The file path for the TSV line append"),
        )
        .arg(
            Arg::with_name("max-words")
                .short("w")
                .takes_value(true)
                .help("Truncate typos list to max number of words specified"),
        )
        .get_matches();

    let mut cfg: TesterConfig = match matches.value_of("config") {
        Some(path) => TesterConfig::from_path(Path::new(path))?,
        None => TesterConfig::new("en", MatcherKind::NGram),
    };

    if let Some(language) = matches.value_of("language") {
        cfg.language = language.to_string();
    }

    if let Some(kind) = matches.value_of("matcher") {
        cfg.matcher = kind.parse()?;
    }

    if let Some(dir) = matches.value_of("dictionaries") {
        cfg.dictionaries_dir = PathBuf::from(dir);
    }

    let tester = match SpellingCorrectionTester::from_config(&cfg) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}; aborting.", e);
            std::process::exit(1);
        }
    };

    let words = match matches.value_of("words") {
        Some(path) => load_words(
            path,
            matches
                .value_of("max-words")
                .and_then(|x| x.parse::<usize>().ok()),
        )?,
        None => {
            eprintln!("No word list for given path; aborting.");
            std::process::exit(1);
        }
    };

    if words.is_empty() {
        eprintln!("Word list is empty; aborting.");
        std::process::exit(1);
    }

    let pb = ProgressBar::new(words.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{pos}/{len} [{percent}%] {wide_bar} {elapsed_precise}"),
    );

    let start_time = Instant::now();
    let results = words
        .par_iter()
        .progress_with(pb)
        .map(|test| {
            let result = tester.run_test(test);
            let distance = damerau_levenshtein(test.misspelling(), test.target_word());

            AccuracyResult {
                time: result.time_taken().into(),
                result,
                distance,
            }
        })
        .collect::<Vec<_>>();

    let total_time: Time = start_time.elapsed().into();
    let start_timestamp: Time = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)?
        .into();

    let summary = Summary::new(&results);
    println!(
        "{} [{}] top {}: {}",
        cfg.matcher, cfg.language, NUMBER_OF_SUGGESTIONS_TO_CHECK, summary
    );

    if let Some(path) = matches.value_of("json-output") {
        let output = std::fs::File::create(path)?;
        let report = Report {
            config: &cfg,
            summary,
            results,
            start_timestamp,
            total_time,
        };
        println!("Writing JSON report…");
        serde_json::to_writer_pretty(output, &report)?;
    } else if let Some(path) = matches.value_of("tsv-output") {
        let mut output = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let md = output.metadata()?;
        if md.len() == 0 {
            // new file, write headers:
            output.write_all(
                b"id\tdate\tmatcher\tlanguage\tfirst\twithin4\tany\tnever\tsaved\tavg\n",
            )?;
        }
        let git_id = std::process::Command::new("git")
            .arg("rev-parse")
            .arg("--short")
            .arg("HEAD")
            .output()?;
        output.write_all(String::from_utf8_lossy(&git_id.stdout).trim().as_bytes())?;
        output.write_all(b"\t")?;
        output.write_all(Local::now().to_rfc3339().as_bytes())?;
        output.write_all(b"\t")?;
        output.write_all(cfg.matcher.to_string().as_bytes())?;
        output.write_all(b"\t")?;
        output.write_all(cfg.language.as_bytes())?;
        output.write_all(b"\t")?;
        output.write_all(summary.first_character.to_string().as_bytes())?;
        output.write_all(b"\t")?;
        output.write_all(summary.within_four.to_string().as_bytes())?;
        output.write_all(b"\t")?;
        output.write_all(summary.any_position.to_string().as_bytes())?;
        output.write_all(b"\t")?;
        output.write_all(summary.never.to_string().as_bytes())?;
        output.write_all(b"\t")?;
        output.write_all(format!("{:.4}", summary.characters_saved).as_bytes())?;
        output.write_all(b"\t")?;
        output.write_all(summary.average_time.to_string().as_bytes())?;
        output.write_all(b"\n")?;
    };

    println!("Done!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result<'a>(test: &'a MisspellingTest, found: Option<usize>, micros: u64) -> AccuracyResult<'a> {
        let time = Duration::from_micros(micros);
        AccuracyResult {
            result: SpellingCorrectionTestResult::new(found, time, test),
            distance: 0,
            time: time.into(),
        }
    }

    #[test]
    fn summary() {
        let a = MisspellingTest::new("recieve", "receive");
        let b = MisspellingTest::new("teh", "the");
        let c = MisspellingTest::new("qwerty", "keyboard");
        let results = vec![
            result(&a, Some(4), 30),
            result(&b, Some(1), 10),
            result(&c, None, 50),
        ];

        let summary = Summary::new(&results);
        assert_eq!(summary.total_words, 3);
        assert_eq!(summary.first_character, 1);
        assert_eq!(summary.within_four, 2);
        assert_eq!(summary.any_position, 2);
        assert_eq!(summary.never, 1);
        assert_eq!(summary.fastest_lookup, Time::from(Duration::from_micros(10)));
        assert_eq!(summary.slowest_lookup, Time::from(Duration::from_micros(50)));
        assert_eq!(summary.average_time, Time::from(Duration::from_micros(30)));
    }

    #[test]
    fn words_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typos.tsv");
        std::fs::write(&path, "# comment\nrecieve\treceive\nteh\tthe\textra\nlonely\n").unwrap();

        let words = load_words(path.to_str().unwrap(), None).unwrap();
        assert_eq!(
            words,
            vec![
                MisspellingTest::new("recieve", "receive"),
                MisspellingTest::new("teh", "the"),
            ]
        );
        assert_eq!(load_words(path.to_str().unwrap(), Some(1)).unwrap().len(), 1);
    }
}
