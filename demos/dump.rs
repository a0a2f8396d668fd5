//! Dump - decode a captured payload and print it as JSON.
//!
//! This example demonstrates:
//! - Decoding the data field of an SPL standard message
//! - Reading the per-segment issues of a partially valid payload
//! - Exporting the result with the JSON codec
//!
//! # Running
//!
//! ```text
//! cargo run --example dump -- 4248554100716f
//! echo 42485541 00 716f | cargo run --example dump
//! ```
//!
//! Whitespace in the hex input is ignored. Stdin is only read when it is
//! not a terminal. Without any input a small sample payload is encoded and
//! decoded.

use std::io::{IsTerminal, Read};

use bhuman_message::codec::JsonCodec;
use bhuman_message::protocol::{encode_message, MessageDecoder};
use bhuman_message::{Role, StandardPart, Timestamp, Vector2f};

fn parse_hex(text: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<u8> = text.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits: {}", digits.len()));
    }
    digits
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).map_err(|e| e.to_string())?;
            u8::from_str_radix(pair, 16).map_err(|e| format!("invalid hex byte {pair:?}: {e}"))
        })
        .collect()
}

/// Hex text from the arguments, else from `piped` stdin.
fn collect_input(args: &[String], piped: Option<&mut dyn Read>) -> std::io::Result<String> {
    let mut input = args.concat();
    if input.is_empty() {
        if let Some(reader) = piped {
            reader.read_to_string(&mut input)?;
        }
    }
    Ok(input)
}

fn sample_payload() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let ts = 60_000;
    let part = StandardPart {
        magic_number: 1,
        timestamp: ts,
        is_penalized: false,
        is_upright: true,
        has_ground_contact: true,
        time_of_last_ground_contact: Timestamp::at(ts),
        robot_pose_validity: 1.0,
        robot_pose_deviation: 50.0,
        robot_pose_covariance: [0.0; 6],
        timestamp_last_jumped: Timestamp::before(ts, 10 << 7),
        ball_time_when_last_seen: Timestamp::before(ts, 100),
        ball_time_when_disappeared: Timestamp::before(ts, 5_000),
        ball_seen_percentage: 40,
        ball_velocity: Vector2f::new(0.0, 0.0),
        ball_last_percept: Vector2f::new(1200.0, -300.0),
        ball_covariance: [10.0, 0.0, 10.0],
        confidence_of_last_whistle_detection: 0,
        last_time_whistle_detected: Timestamp::before(ts, 0xFFFF),
        role: Role::Striker,
        time_when_reach_ball: Timestamp::after(ts, 2_000),
        time_when_reach_ball_striker: Timestamp::after(ts, 2_000),
        pass_target: None,
        walking_to: Vector2f::new(1000.0, -250.0),
        shooting_to: Vector2f::new(4500.0, 0.0),
        teammate_roles: [
            Role::Keeper,
            Role::Defender,
            Role::Striker,
            Role::Supporter,
            Role::None,
            Role::None,
        ],
        captain: Some(0),
        teammate_roles_timestamp: Timestamp::before(ts, 400),
        obstacles: Vec::new(),
        requests_ntp_message: false,
        ntp_messages: Vec::new(),
    };
    Ok(encode_message(Some(&part), Some(b""))?.to_vec())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdin = std::io::stdin();
    let mut lock = stdin.lock();
    let piped = if stdin.is_terminal() {
        None
    } else {
        Some(&mut lock as &mut dyn Read)
    };
    let input = collect_input(&args, piped)?;

    let payload = if input.trim().is_empty() {
        sample_payload()?
    } else {
        parse_hex(&input)?
    };

    let message = MessageDecoder::new().decode(&(), &payload);
    for issue in &message.issues {
        eprintln!("issue: {issue}");
    }
    println!("{}", JsonCodec::encode_pretty(&message)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TerminalStdin;

    impl Read for TerminalStdin {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            panic!("interactive stdin must not be read");
        }
    }

    #[test]
    fn test_no_input_falls_back_to_sample() {
        assert_eq!(collect_input(&[], None).unwrap(), "");
    }

    #[test]
    fn test_arguments_take_precedence_over_stdin() {
        let mut stdin = TerminalStdin;
        let args = vec!["4248".to_string(), "5541".to_string()];
        let input = collect_input(&args, Some(&mut stdin as &mut dyn Read)).unwrap();
        assert_eq!(input, "42485541");
    }

    #[test]
    fn test_piped_stdin_is_read() {
        let mut piped: &[u8] = b"42 48 55 41\n00";
        let input = collect_input(&[], Some(&mut piped as &mut dyn Read)).unwrap();
        assert_eq!(parse_hex(&input).unwrap(), b"BHUA\x00");
    }

    #[test]
    fn test_parse_hex_rejects_odd_digits() {
        assert!(parse_hex("424").is_err());
        assert!(parse_hex("zz").is_err());
    }
}
