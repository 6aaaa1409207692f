use std::io::{self, Read};
use std::path::PathBuf;

use gumdrop::Options;
use serde::Serialize;

use autocomplete::matcher::suggestion::Suggestion;
use autocomplete::matcher::{create_provider, MatcherConfig, MatcherKind, SuggestionProvider};
use autocomplete::normalize::normalize;
use autocomplete::paths::{dictionary_path, LanguageTag, DEFAULT_DICTIONARIES_DIR};

trait OutputWriter {
    fn write_suggestions(&mut self, word: &str, suggestions: &[Suggestion]);
    fn finish(&mut self);
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_suggestions(&mut self, word: &str, suggestions: &[Suggestion]) {
        println!("Input: {}", &word);
        for sugg in suggestions {
            println!(
                "{}\t\t{:.3}\t{}{}",
                sugg.value,
                sugg.score,
                sugg.usage_count,
                if sugg.prefix_match { "\t[prefix]" } else { "" }
            );
        }
        println!();
    }

    fn finish(&mut self) {}
}

#[derive(Serialize)]
struct SuggestionRequest {
    word: String,
    suggestions: Vec<Suggestion>,
}

#[derive(Serialize)]
struct JsonWriter {
    results: Vec<SuggestionRequest>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }
}

impl OutputWriter for JsonWriter {
    fn write_suggestions(&mut self, word: &str, suggestions: &[Suggestion]) {
        self.results.push(SuggestionRequest {
            word: word.to_owned(),
            suggestions: suggestions.to_vec(),
        });
    }

    fn finish(&mut self) {
        match serde_json::to_string_pretty(self) {
            Ok(v) => println!("{}", v),
            Err(e) => eprintln!("{}", e),
        }
    }
}

fn run(provider: &dyn SuggestionProvider, words: Vec<String>, writer: &mut dyn OutputWriter) {
    for word in words {
        let suggestions = provider.suggest(&word);
        writer.write_suggestions(&word, &suggestions);
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "get suggestions for provided input")]
    Suggest(SuggestArgs),

    #[options(help = "print input in normalized dictionary form")]
    Normalize(NormalizeArgs),
}

#[derive(Debug, Options)]
struct SuggestArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "dictionary file to be used")]
    file: Option<PathBuf>,

    #[options(help = "directory searched for <language>.dic")]
    dictionaries: Option<PathBuf>,

    #[options(help = "language tag of the dictionary", default = "en")]
    language: String,

    #[options(help = "matching strategy: basic or ngram", default = "ngram")]
    matcher: String,

    #[options(no_short, long = "ngram-size", help = "n-gram window length")]
    ngram_size: Option<usize>,

    #[options(help = "maximum number of results")]
    nbest: Option<usize>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct NormalizeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "p", long = "phrases", help = "keep multi-word input")]
    allow_phrases: bool,

    #[options(free, help = "text to be normalized")]
    inputs: Vec<String>,
}

fn read_inputs(inputs: Vec<String>) -> anyhow::Result<Vec<String>> {
    if !inputs.is_empty() {
        return Ok(inputs);
    }

    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer
        .lines()
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect())
}

fn normalize_words(args: NormalizeArgs) -> anyhow::Result<()> {
    for input in read_inputs(args.inputs)? {
        let key = normalize(&input, args.allow_phrases);
        if key.is_empty() {
            println!("{:?}\t[rejected]", input);
        } else {
            println!("{:?}\t{}", input, key);
        }
    }

    Ok(())
}

fn suggest(args: SuggestArgs) -> anyhow::Result<()> {
    let kind: MatcherKind = args.matcher.parse()?;

    let mut config = MatcherConfig::default();
    if let Some(v) = args.ngram_size {
        config.ngram_size = v;
    }
    config.n_best = args.nbest.filter(|x| *x > 0);

    let path = match args.file {
        Some(path) => path,
        None => {
            let dir = args
                .dictionaries
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DICTIONARIES_DIR));
            let tag = args
                .language
                .parse::<LanguageTag>()
                .map_err(|e| anyhow::anyhow!("invalid language '{}': {}", args.language, e))?;
            dictionary_path(&dir, &tag)
        }
    };

    let mut provider = create_provider(kind, &config)?;
    provider.load_dictionary(&path)?;

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    let words = read_inputs(args.inputs)?;
    run(&*provider, words, &mut *writer);
    writer.finish();

    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Suggest(args)) => suggest(args),
        Some(Command::Normalize(args)) => normalize_words(args),
    }
}
