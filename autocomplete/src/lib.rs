/*! Word completion and spelling suggestion for low-bandwidth keyboards.

Users typing by eye-gaze or switch-scanning pay dearly for every key press,
so the intended word has to surface within the first few suggestions as
early as possible, typos included. This crate provides the matching engine
behind such a keyboard and a harness for measuring how well it does.

* [`normalize`] turns dictionary lines and typed input into canonical keys.
* [`dictionary::EntryStore`] owns the entries and their usage counts.
* [`matcher`] holds the two strategies, exact-prefix ([`matcher::BasicMatcher`])
  and typo-tolerant n-gram ([`matcher::NGramMatcher`]), behind the
  [`matcher::SuggestionProvider`] trait.
* [`harness`] replays misspellings key by key and records when the target
  word first appears.

# Usage examples

```no_run
use std::path::Path;

use autocomplete::harness::{MisspellingTest, SpellingCorrectionTester};
use autocomplete::matcher::MatcherKind;

let tester = SpellingCorrectionTester::new(MatcherKind::NGram, "en", Path::new("Dictionaries"))
    .expect("dictionary");
let test = MisspellingTest::new("recieve", "receive");
let result = tester.run_test(&test);
println!("found after {} characters", result.characters_typed());
```

The `accuracy` and `autocomplete-bin` crates in the same repository show
the library driven from the command line.
*/

#![warn(missing_docs)]
pub mod dictionary;
pub mod error;
pub mod harness;
pub mod matcher;
pub mod normalize;
pub mod paths;
