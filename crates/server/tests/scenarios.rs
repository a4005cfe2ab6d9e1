//! End-to-end game scenarios over the byte-level request/response boundary.

use hilo_engine::{GameError, TargetSource};
use hilo_server::Server;
use hilo_wire::request::Command;
use hilo_wire::{
    ErrorKindProto, GameSessionProto, MakeGuess, Request, Response, StartGame, VerdictProto,
    response,
};
use prost::Message;

/// Deterministic source that replays a fixed list of targets.
struct ScriptedTargets(parking_lot::Mutex<Vec<u32>>);

impl ScriptedTargets {
    fn new(mut targets: Vec<u32>) -> Self {
        targets.reverse();
        Self(parking_lot::Mutex::new(targets))
    }
}

impl TargetSource for ScriptedTargets {
    fn draw_target(&self) -> Result<u32, GameError> {
        self.0
            .lock()
            .pop()
            .ok_or_else(|| GameError::entropy_unavailable("script exhausted"))
    }
}

/// Caller side: keeps the session value between calls, like a UI would.
struct Caller<'a> {
    server: &'a Server,
    next_id: u64,
    session: Option<GameSessionProto>,
}

impl<'a> Caller<'a> {
    fn new(server: &'a Server) -> Self {
        Self {
            server,
            next_id: 1,
            session: None,
        }
    }

    fn send(&mut self, command: Command) -> response::Result {
        let id = self.next_id;
        self.next_id += 1;
        let request = Request {
            request_id: id,
            command: Some(command),
        };
        let bytes = self.server.handle_bytes(&request.encode_to_vec());
        let response = Response::decode(bytes.as_slice()).unwrap();
        assert_eq!(response.request_id, id);
        response.result.unwrap()
    }

    fn start(&mut self) -> GameSessionProto {
        match self.send(Command::StartGame(StartGame {})) {
            response::Result::Session(s) => {
                self.session = Some(s.clone());
                s
            }
            other => panic!("expected session, got {other:?}"),
        }
    }

    fn guess(&mut self, guess: i64) -> Result<(String, u32, VerdictProto), ErrorKindProto> {
        let msg = MakeGuess {
            session: self.session.clone(),
            guess: Some(guess),
        };
        match self.send(Command::MakeGuess(msg)) {
            response::Result::Guess(reply) => {
                let verdict = reply.verdict();
                self.session = reply.session;
                Ok((reply.message, reply.attempts, verdict))
            }
            response::Result::Error(e) => Err(e.kind()),
            other => panic!("unexpected reply {other:?}"),
        }
    }
}

#[test]
fn test_deterministic_start_then_correct_guess() {
    let server = Server::with_source(ScriptedTargets::new(vec![42]));
    let mut caller = Caller::new(&server);

    let session = caller.start();
    assert_eq!((session.target, session.attempts), (42, 0));

    let (message, attempts, verdict) = caller.guess(42).unwrap();
    assert_eq!(
        message,
        "Congratulations! You guessed the number in 1 attempts"
    );
    assert_eq!(attempts, 1);
    assert_eq!(verdict, VerdictProto::Correct);
}

#[test]
fn test_low_high_then_win_and_complete() {
    let server = Server::with_source(ScriptedTargets::new(vec![42, 17]));
    let mut caller = Caller::new(&server);
    caller.start();

    assert_eq!(
        caller.guess(10).unwrap(),
        ("Too low, try again".to_string(), 1, VerdictProto::TooLow)
    );
    assert_eq!(
        caller.guess(90).unwrap(),
        ("Too high, try again".to_string(), 2, VerdictProto::TooHigh)
    );
    let (message, attempts, _) = caller.guess(42).unwrap();
    assert_eq!(
        message,
        "Congratulations! You guessed the number in 3 attempts"
    );
    assert_eq!(attempts, 3);

    assert_eq!(caller.guess(42), Err(ErrorKindProto::SessionComplete));

    let next = caller.start();
    assert_eq!((next.target, next.attempts), (17, 0));
}

#[test]
fn test_guess_before_start() {
    let server = Server::with_source(ScriptedTargets::new(vec![42]));
    let mut caller = Caller::new(&server);
    assert_eq!(caller.guess(50), Err(ErrorKindProto::NoActiveSession));
}

#[test]
fn test_invalid_guess_leaves_session_untouched() {
    let server = Server::with_source(ScriptedTargets::new(vec![42]));
    let mut caller = Caller::new(&server);
    caller.start();

    assert_eq!(caller.guess(0), Err(ErrorKindProto::InvalidGuess));
    assert_eq!(caller.guess(101), Err(ErrorKindProto::InvalidGuess));
    assert_eq!(caller.guess(-7), Err(ErrorKindProto::InvalidGuess));
    assert_eq!(caller.session.as_ref().map(|s| s.attempts), Some(0));

    let (_, attempts, _) = caller.guess(50).unwrap();
    assert_eq!(attempts, 1);
}

#[test]
fn test_entropy_exhaustion_fails_start() {
    let server = Server::with_source(ScriptedTargets::new(vec![]));
    let mut caller = Caller::new(&server);
    match caller.send(Command::StartGame(StartGame {})) {
        response::Result::Error(e) => {
            assert_eq!(e.kind(), ErrorKindProto::EntropyUnavailable);
            assert_eq!(e.message, "entropy source unavailable: script exhausted");
        }
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn test_binary_search_wins_within_seven_guesses() {
    let server = Server::default();
    let mut caller = Caller::new(&server);
    caller.start();

    let (mut lo, mut hi) = (1i64, 100i64);
    loop {
        let mid = (lo + hi) / 2;
        let (_, attempts, verdict) = caller.guess(mid).unwrap();
        assert!(attempts <= 7);
        match verdict {
            VerdictProto::TooLow => lo = mid + 1,
            VerdictProto::TooHigh => hi = mid - 1,
            VerdictProto::Correct => break,
            VerdictProto::Unspecified => panic!("unspecified verdict"),
        }
    }
}
