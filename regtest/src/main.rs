/*! Regression testing for autocomplete matchers

Shows the misspellings for which one matching strategy surfaces the target
word later than another, over the same dictionary or over an old and a new
one. Can be used in automated
scripts to cap the amount of change a matcher tweak is allowed to cause.

# Usage examples

It's a command-line tool:
```console
$ cargo run -- --dictionary Dictionaries/en.dic --words typos.tsv --old basic --new ngram --threshold 0.1
```
will expect there to be less than 10 % regressions going from the basic to
the n-gram matcher.
*/

use std::error::Error;
use std::path::{Path, PathBuf};

use autocomplete::harness::{MisspellingTest, SpellingCorrectionTester};
use autocomplete::matcher::{create_provider, MatcherConfig, MatcherKind};

use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "DICFILE")]
    dictionary: PathBuf,
    /// Dictionary for the new matcher, if it differs from the old one
    #[arg(long, value_name = "DICFILE")]
    new_dictionary: Option<PathBuf>,
    #[arg(short, long, value_name = "WORDFILE")]
    words: PathBuf,
    #[arg(short, long, value_name = "MATCHER", default_value = "basic")]
    old: MatcherKind,
    #[arg(short, long, value_name = "MATCHER", default_value = "ngram")]
    new: MatcherKind,
    #[arg(short, long, value_name = "THOLD")]
    threshold: f32,
}

impl Cli {
    fn new_dictionary(&self) -> &Path {
        self.new_dictionary.as_deref().unwrap_or(&self.dictionary)
    }
}

fn load_words(path: PathBuf) -> Result<Vec<MisspellingTest>, Box<dyn Error>> {
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
        .collect())
}

fn tester(kind: MatcherKind, dictionary: &Path) -> Result<SpellingCorrectionTester, Box<dyn Error>> {
    let mut provider = create_provider(kind, &MatcherConfig::default())?;
    provider.load_dictionary(dictionary)?;
    Ok(SpellingCorrectionTester::with_provider(provider))
}

/// Whether `new` needs more characters than `old`, never finding counting
/// as infinitely many.
fn is_regression(old: Option<usize>, new: Option<usize>) -> bool {
    match (old, new) {
        (Some(x), Some(y)) => y > x,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let old = tester(cli.old, &cli.dictionary)?;
    let new = tester(cli.new, cli.new_dictionary())?;
    let words = load_words(cli.words)?;
    let mut regressions = 0;
    for word in &words {
        let oldpos = old.run_test(word).found_at();
        let newpos = new.run_test(word).found_at();
        if is_regression(oldpos, newpos) {
            match (oldpos, newpos) {
                (Some(x), None) => {
                    println!(
                        "Regression: {} -> {} was found after {} now never!",
                        word.misspelling(),
                        word.target_word(),
                        x
                    );
                }
                (Some(x), Some(y)) => {
                    println!(
                        "REGRESSION: {} -> {} was found after {} now {}",
                        word.misspelling(),
                        word.target_word(),
                        x,
                        y
                    );
                }
                _ => {}
            }
            regressions += 1;
        } else {
            print!(".");
        }
    }
    println!();
    if words.is_empty() {
        Err("Could not find any words")?
    }
    let regressionrate = regressions as f32 / words.len() as f32;
    if cli.threshold > regressionrate {
        Ok(())
    } else {
        Err(format!(
            "regressions more than threshold {} > {}",
            regressionrate, cli.threshold
        ))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_dictionary_defaults_to_old() {
        let cli = Cli::try_parse_from(["regtest", "-d", "en.dic", "-w", "typos.tsv", "-t", "0.1"])
            .unwrap();
        assert_eq!(cli.old, MatcherKind::Basic);
        assert_eq!(cli.new, MatcherKind::NGram);
        assert_eq!(cli.new_dictionary(), Path::new("en.dic"));

        let cli = Cli::try_parse_from([
            "regtest",
            "-d",
            "en.dic",
            "--new-dictionary",
            "en-new.dic",
            "-w",
            "typos.tsv",
            "-t",
            "0.1",
        ])
        .unwrap();
        assert_eq!(cli.dictionary, Path::new("en.dic"));
        assert_eq!(cli.new_dictionary(), Path::new("en-new.dic"));
    }

    #[test]
    fn regressions() {
        assert!(!is_regression(Some(3), Some(3)));
        assert!(!is_regression(Some(3), Some(2)));
        assert!(is_regression(Some(3), Some(4)));
        assert!(is_regression(Some(3), None));
        assert!(!is_regression(None, None));
        assert!(!is_regression(None, Some(7)));
    }
}
