//! Length-delimited protobuf transport.
//!
//! Each frame is a varint length prefix followed by an encoded message, the
//! layout produced by `prost::Message::encode_length_delimited`.

use std::io::{self, Read, Write};

use anyhow::{Context, bail, ensure};
use hilo_server::Server;
use tracing::info;

/// Largest accepted request body.
const MAX_FRAME_LEN: usize = 64 * 1024;

/// A varint-encoded `u64` never takes more than ten bytes.
const MAX_PREFIX_LEN: usize = 10;

/// Answer request frames from `reader` until it is exhausted.
pub fn serve(server: &Server, mut reader: impl Read, mut writer: impl Write) -> anyhow::Result<()> {
    let mut served = 0u64;
    while let Some(frame) = read_frame(&mut reader)? {
        let reply = server.handle_bytes(&frame);
        write_frame(&mut writer, &reply)?;
        served += 1;
    }
    info!(served, "input closed");
    Ok(())
}

/// Read one frame. `Ok(None)` on a clean end of input between frames.
fn read_frame(reader: &mut impl Read) -> anyhow::Result<Option<Vec<u8>>> {
    let mut prefix = Vec::with_capacity(MAX_PREFIX_LEN);
    let mut byte = [0u8; 1];
    loop {
        match reader.read_exact(&mut byte) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof && prefix.is_empty() => {
                return Ok(None);
            }
            Err(e) => return Err(e).context("reading frame length"),
        }
        prefix.push(byte[0]);
        if byte[0] & 0x80 == 0 {
            break;
        }
        if prefix.len() == MAX_PREFIX_LEN {
            bail!("frame length prefix longer than {MAX_PREFIX_LEN} bytes");
        }
    }

    let len = prost::decode_length_delimiter(prefix.as_slice()).context("decoding frame length")?;
    ensure!(
        len <= MAX_FRAME_LEN,
        "frame of {len} bytes exceeds {MAX_FRAME_LEN}"
    );

    let mut frame = vec![0; len];
    reader
        .read_exact(&mut frame)
        .context("reading frame body")?;
    Ok(Some(frame))
}

fn write_frame(writer: &mut impl Write, body: &[u8]) -> anyhow::Result<()> {
    let mut out = Vec::with_capacity(body.len() + MAX_PREFIX_LEN);
    prost::encode_length_delimiter(body.len(), &mut out).context("encoding frame length")?;
    out.extend_from_slice(body);
    writer.write_all(&out)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hilo_engine::{GameError, TargetSource};
    use hilo_wire::request::Command;
    use hilo_wire::{
        ErrorKindProto, MakeGuess, Request, Response, StartGame, encode_frame, response,
    };
    use prost::Message;

    struct FixedTarget(u32);

    impl TargetSource for FixedTarget {
        fn draw_target(&self) -> Result<u32, GameError> {
            Ok(self.0)
        }
    }

    fn decode_all(mut bytes: &[u8]) -> Vec<Response> {
        let mut out = Vec::new();
        while !bytes.is_empty() {
            let resp = Response::decode_length_delimited(&mut bytes).unwrap();
            out.push(resp);
        }
        out
    }

    #[test]
    fn test_serve_start_then_guess() {
        let server = Server::with_source(FixedTarget(42));

        let start = Request {
            request_id: 1,
            command: Some(Command::StartGame(StartGame {})),
        };
        let mut input = encode_frame(&start);

        let session = server.start_game().unwrap();
        let guess = Request {
            request_id: 2,
            command: Some(Command::MakeGuess(MakeGuess {
                session: Some(session.into()),
                guess: Some(10),
            })),
        };
        input.extend(encode_frame(&guess));

        let mut output = Vec::new();
        serve(&server, input.as_slice(), &mut output).unwrap();

        let responses = decode_all(&output);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].request_id, 1);
        assert!(matches!(
            responses[0].result,
            Some(response::Result::Session(_))
        ));
        match &responses[1].result {
            Some(response::Result::Guess(reply)) => {
                assert_eq!(reply.message, "Too low, try again");
                assert_eq!(reply.attempts, 1);
            }
            other => panic!("expected guess reply, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_body_gets_error_reply() {
        let server = Server::with_source(FixedTarget(42));
        let mut input = Vec::new();
        prost::encode_length_delimiter(3, &mut input).unwrap();
        input.extend_from_slice(&[0xff, 0xff, 0xff]);

        let mut output = Vec::new();
        serve(&server, input.as_slice(), &mut output).unwrap();

        let responses = decode_all(&output);
        match &responses[0].result {
            Some(response::Result::Error(e)) => {
                assert_eq!(e.kind(), ErrorKindProto::MalformedRequest);
            }
            other => panic!("expected error reply, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_clean_eof() {
        let server = Server::with_source(FixedTarget(42));
        let mut output = Vec::new();
        serve(&server, io::empty(), &mut output).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_truncated_frame_is_an_error() {
        let server = Server::with_source(FixedTarget(42));
        let input = [5u8, 1, 2];
        let mut output = Vec::new();
        assert!(serve(&server, input.as_slice(), &mut output).is_err());
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut input = Vec::new();
        prost::encode_length_delimiter(MAX_FRAME_LEN + 1, &mut input).unwrap();
        assert!(read_frame(&mut input.as_slice()).is_err());
    }
}
