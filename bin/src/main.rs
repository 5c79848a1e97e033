use clap::Parser;
use std::io;
use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use wordle_assist::*;

/// Interactive assistant for narrowing down the answer to a Wordle-style
/// puzzle from per-round color feedback.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Length of the puzzle's words.
    word_length: usize,

    /// Path to the frequency corpus: one word per line, whitespace-separated
    /// fields with the word first and its frequency third.
    #[clap(short = 'f', long, default_value = "en_words_1_1-64.txt")]
    corpus_file: PathBuf,

    /// Directory holding the per-length dictionary cache.
    #[clap(long, default_value = ".")]
    cache_dir: PathBuf,
}

/// The frequency corpus tops out at 64-character tokens.
const MAX_WORD_LENGTH: usize = 64;

const NUM_INITIAL_SUGGESTIONS: usize = 5;
const REPORT_LIMIT: usize = 16;

fn main() {
    init_logger();
    let args = Args::parse();
    if args.word_length == 0 || args.word_length > MAX_WORD_LENGTH {
        eprintln!(
            "word length must be between 1 and {}, got {}",
            MAX_WORD_LENGTH, args.word_length
        );
        process::exit(1);
    }

    let bank = match WordBank::load_or_build(&args.corpus_file, &args.cache_dir, args.word_length)
    {
        Ok(bank) => bank,
        Err(err) => {
            eprintln!(
                "failed to load dictionary from {}: {}",
                args.corpus_file.display(),
                err
            );
            process::exit(1);
        }
    };
    println!(
        "Number of {} letter words: {}",
        args.word_length,
        bank.len()
    );
    print_initial_suggestions(&bank);

    if let Err(err) = run_session(&bank) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn init_logger() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);
    builder.init();
}

fn print_initial_suggestions(bank: &WordBank) {
    let suggestions = suggest_initial_guesses(bank, NUM_INITIAL_SUGGESTIONS);
    println!("Top {} suggested initial guesses:", NUM_INITIAL_SUGGESTIONS);
    for candidate in &suggestions {
        println!("{} {}", candidate.word, candidate.frequency);
    }
}

/// Drives the round loop: read a guess and its colors, tighten the model,
/// report the surviving candidates, and stop once at most one word remains.
fn run_session(bank: &WordBank) -> io::Result<()> {
    let mut session = Session::new(bank);
    let mut candidates = session.candidates();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    while candidates.len() > 1 {
        println!("Known letters: {}", session.model().skeleton());
        let Some(guess) = prompt_guess(&mut input, bank.word_length())? else {
            println!();
            return Ok(());
        };
        let Some(colors) = prompt_colors(&mut input, bank.word_length())? else {
            println!();
            return Ok(());
        };
        // Both prompts validate their input, so construction cannot fail
        // here without a bug upstream; such a failure is not recoverable.
        let feedback = match GuessFeedback::new(&guess, colors) {
            Ok(feedback) => feedback,
            Err(err) => fail_round(&err),
        };
        match session.apply_feedback(&feedback) {
            Ok(next) => candidates = next,
            Err(err) => fail_round(&err),
        }
        report(&candidates);
    }

    match candidates.as_slice() {
        [only] => println!("Unique solution: {}", only.word),
        _ => println!("No words match the accumulated feedback."),
    }
    Ok(())
}

/// Feedback that cannot be applied leaves the session unusable: the model
/// only ever tightens, so there is nothing to roll back to.
fn fail_round(err: &SolverError) -> ! {
    eprintln!("{}", err);
    process::exit(2);
}

/// Prompts until the operator enters a word of the right length and
/// alphabet. Returns `None` on end of input.
fn prompt_guess(input: &mut impl BufRead, word_length: usize) -> io::Result<Option<String>> {
    loop {
        print!("Enter a {} letter word: ", word_length);
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let guess = line.trim().to_ascii_uppercase();
        if guess.len() == word_length && guess.bytes().all(|b| b.is_ascii_uppercase()) {
            return Ok(Some(guess));
        }
        eprintln!("Error.");
    }
}

/// Prompts until the operator enters one valid `b`/`g`/`y`/`u` code per
/// letter. Returns `None` on end of input.
fn prompt_colors(
    input: &mut impl BufRead,
    word_length: usize,
) -> io::Result<Option<Vec<LetterColor>>> {
    loop {
        print!("Enter colors: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if trimmed.len() == word_length {
            if let Ok(colors) = trimmed
                .chars()
                .map(LetterColor::from_code)
                .collect::<Result<Vec<LetterColor>, SolverError>>()
            {
                return Ok(Some(colors));
            }
        }
        eprintln!("Error.");
    }
}

fn report(candidates: &[Candidate]) {
    println!("Possible words: {}", candidates.len());
    println!(
        "TOP {}: {:10} {:13} {:11}",
        REPORT_LIMIT, "Word", "Freq", "Global Rank"
    );
    println!("        {:10} {:13} {:11}", "----------", "-------------", "-----------");
    for (index, candidate) in candidates.iter().take(REPORT_LIMIT).enumerate() {
        println!(
            "{:>7} {:10} {:<13} {:<11}",
            index + 1,
            candidate.word,
            candidate.frequency,
            candidate.rank
        );
    }
    println!("        {:10} {:13} {:11}", "----------", "-------------", "-----------");
}
