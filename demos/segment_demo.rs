//! Thin CLI sample, not part of the library surface (spec §1's "public
//! CLI/library entry point wrapper" is an external collaborator). Run with
//! `cargo run --example segment_demo -- <lang> <text>`.

use std::env;
use std::process::ExitCode;

use langsplit::Segmenter;

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let (lang, text) = match (args.next(), args.next()) {
        (Some(lang), Some(text)) => (lang, text),
        _ => {
            eprintln!("usage: segment_demo <lang> <text>");
            return ExitCode::FAILURE;
        }
    };

    let segmenter = match Segmenter::new(&lang) {
        Ok(segmenter) => segmenter,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    for (i, sentence) in segmenter.segment(&text).iter().enumerate() {
        println!("{}: {}", i + 1, sentence);
    }
    ExitCode::SUCCESS
}
