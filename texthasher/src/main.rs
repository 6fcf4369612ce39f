//! `texthasher` command: hash a text, check a text against a stored hash, or
//! look at the parameters a stored hash carries. Plaintext given as `-` is read
//! from stdin and wiped once hashed.

use std::env;
use std::io::{self, BufRead};
use std::process::ExitCode;

use texthasher::{
    inspect, load_settings, Argon2Encoder, ConfigError, EncoderError, TextHasher,
    TextHasherArgon2, TextHasherFactory, TextHasherFactoryImp,
};
use thiserror::Error;
use zeroize::Zeroize;

#[derive(Debug, Error)]
enum CliError {
    #[error("unrecognized command line")]
    Usage,
    #[error("reading plaintext failed: {0}")]
    Io(#[from] io::Error),
    #[error("settings error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Encoder(#[from] EncoderError),
    #[error("output encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

fn print_usage() {
    eprintln!("Commands (use - to read the plaintext from stdin):\n  hash-text <plaintext>\n  matches <plaintext> <encoded-hash>\n  hash-with-settings <settings.json> <plaintext>\n  inspect <encoded-hash>\n  needs-rehash <encoded-hash>");
}

fn read_plain_text(arg: &str) -> io::Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let trimmed_len = line.trim_end_matches(|c| c == '\r' || c == '\n').len();
    line.truncate(trimmed_len);
    Ok(line)
}

fn hash_plain_text(hasher: &impl TextHasher, arg: &str) -> Result<(), CliError> {
    let mut plain_text = read_plain_text(arg)?;
    let hashed = hasher.hash_text(&plain_text);
    plain_text.zeroize();
    println!("{}", hashed?);
    Ok(())
}

fn run(args: &[String]) -> Result<(), CliError> {
    match args {
        [_, command, plain] if command == "hash-text" => {
            let hasher = TextHasherFactoryImp.create()?;
            hash_plain_text(&hasher, plain)
        }
        [_, command, plain, hashed] if command == "matches" => {
            let hasher = TextHasherFactoryImp.create()?;
            let mut plain_text = read_plain_text(plain)?;
            let matched = hasher.matches(&plain_text, hashed);
            plain_text.zeroize();
            println!("{}", if matched? { "match" } else { "no-match" });
            Ok(())
        }
        [_, command, settings_path, plain] if command == "hash-with-settings" => {
            let settings = load_settings(settings_path)?;
            let hasher = TextHasherArgon2::with_encoder(Argon2Encoder::new(&settings)?);
            hash_plain_text(&hasher, plain)
        }
        [_, command, hashed] if command == "inspect" => {
            let info = inspect(hashed)?;
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(())
        }
        [_, command, hashed] if command == "needs-rehash" => {
            let hasher = TextHasherFactoryImp.create()?;
            println!("{}", hasher.needs_rehash(hashed)?);
            Ok(())
        }
        _ => Err(CliError::Usage),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage) => {
            print_usage();
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
