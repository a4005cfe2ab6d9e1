//! Plain-text game loop.
//!
//! The loop is the caller: it holds the session value between guesses and
//! draws a new one after each win.

use std::io::{BufRead, Write};

use hilo_engine::{TARGET_MAX, TARGET_MIN};
use hilo_server::Server;
use hilo_server::validation::parse_guess;

pub fn run(server: &Server, reader: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
    writeln!(
        out,
        "Guess the number between {TARGET_MIN} and {TARGET_MAX}. Type `quit` to leave."
    )?;
    let mut session = server.start_game()?;

    for line in reader.lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") {
            break;
        }

        let result = parse_guess(input).and_then(|g| server.make_guess(Some(session), i64::from(g)));
        match result {
            Ok(outcome) if outcome.session.is_won() => {
                writeln!(out, "{}", outcome.message)?;
                session = server.start_game()?;
                writeln!(out, "New number drawn. Guess again or type `quit`.")?;
            }
            Ok(outcome) => {
                writeln!(out, "{}", outcome.message)?;
                session = outcome.session;
            }
            Err(e) => writeln!(out, "{e}")?,
        }
    }
    out.flush()?;
    Ok(())
}
