use std::path::PathBuf;

use autocomplete::paths::{find_dictionary_path, LanguageTag, DEFAULT_DICTIONARIES_DIR};

fn main() {
    let mut args = std::env::args().skip(1);
    let tag_arg = match args.next() {
        Some(v) => v,
        None => {
            eprintln!("No tag passed.");
            return;
        }
    };
    let dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DICTIONARIES_DIR));

    let tag: LanguageTag = tag_arg.parse().expect("Invalid tag");

    match find_dictionary_path(&dir, &tag) {
        Some(v) => println!("Found: {}", v.display()),
        None => println!("Not found!"),
    }
}
