use std::io::{BufRead, Read};

use test_strategy::proptest;

use base::prelude::{Opcode, ValueKind};

use super::super::types::{ExitStatus, InstructionError, LexicalError};
use super::*;

fn translate_str(input: &str) -> Result<Document, TranslationFailure> {
    translate(input.as_bytes(), &IoTarget::Stdin)
}

fn translate_ok(input: &str) -> Document {
    match translate_str(input) {
        Ok(document) => document,
        Err(e) => {
            panic!("expected input to be valid, got error: {e}\ninput was:\n{input}");
        }
    }
}

fn failure_status(input: &str) -> ExitStatus {
    match translate_str(input) {
        Ok(document) => {
            panic!(
                "expected translation to fail, but it produced:\n{}",
                document.render()
            );
        }
        Err(e) => e.status(),
    }
}

#[test]
fn test_header_only() {
    let document = translate_ok(".IPPcode23\n");
    assert!(document.is_empty());
    assert_eq!(document.language(), "IPPcode23");
}

#[test]
fn test_move_scenario() {
    let document = translate_ok(".ippcode23\nMOVE GF@x GF@y\n");
    match document.instructions() {
        [only] => {
            assert_eq!(only.order(), 1);
            assert_eq!(only.opcode(), Opcode::Move);
            assert_eq!(only.opcode().to_string(), "MOVE");
            let args: Vec<(ValueKind, &str)> = only
                .arguments()
                .iter()
                .map(|arg| (arg.kind(), arg.value()))
                .collect();
            assert_eq!(
                args,
                vec![(ValueKind::Var, "GF@x"), (ValueKind::Var, "GF@y")]
            );
        }
        other => panic!("expected one instruction, got {other:?}"),
    }
}

#[test]
fn test_comments_and_blank_lines_before_header() {
    let document = translate_ok("# program\n\n   \n.IPPCODE23 # header\nBREAK\n");
    assert_eq!(document.instructions().len(), 1);
}

#[test]
fn test_skipped_lines_take_no_order_number() {
    let input = concat!(
        ".IPPcode23\n",
        "DEFVAR GF@a\n",
        "\n",
        "# comment\n",
        "   # indented comment\n",
        "MOVE GF@a int@1 # trailing\n",
        "\t\n",
        "WRITE GF@a\n",
    );
    let document = translate_ok(input);
    let orders: Vec<usize> = document.instructions().iter().map(|i| i.order()).collect();
    assert_eq!(orders, vec![1, 2, 3]);
}

#[test]
fn test_missing_header() {
    assert_eq!(failure_status("ADD GF@a int@1 int@2\n"), ExitStatus::Header);
    assert!(matches!(
        translate_str("ADD GF@a int@1 int@2\n"),
        Err(TranslationFailure::BadHeader { line: 1, .. })
    ));
}

#[test]
fn test_empty_input() {
    assert!(matches!(
        translate_str(""),
        Err(TranslationFailure::MissingHeader)
    ));
    assert!(matches!(
        translate_str("# only a comment\n\n"),
        Err(TranslationFailure::MissingHeader)
    ));
}

#[test]
fn test_header_with_trailing_text() {
    assert_eq!(failure_status(".IPPcode23 extra\nBREAK\n"), ExitStatus::Header);
    assert_eq!(failure_status(".IPPcode22\n"), ExitStatus::Header);
}

#[test]
fn test_second_header_is_an_unknown_opcode() {
    assert_eq!(
        failure_status(".IPPcode23\n.IPPcode23\n"),
        ExitStatus::Opcode
    );
}

#[test]
fn test_unknown_opcode() {
    assert_eq!(
        failure_status(".IPPcode23\nFOOBAR GF@x\n"),
        ExitStatus::Opcode
    );
}

#[test]
fn test_pushs_label() {
    let result = translate_str(".IPPcode23\nPUSHS label1\n");
    match result {
        Err(TranslationFailure::Instruction(e)) => {
            assert_eq!(e.line, 2);
            assert!(matches!(
                e.inner(),
                InstructionError::CategoryMismatch { .. }
            ));
        }
        other => panic!("expected an instruction error, got {other:?}"),
    }
    assert_eq!(
        failure_status(".IPPcode23\nPUSHS label1\n"),
        ExitStatus::Syntax
    );
}

#[test]
fn test_error_reports_physical_line() {
    let input = "# leading comment\n.IPPcode23\n\nBREAK\n\nWRITE int@\n";
    match translate_str(input) {
        Err(TranslationFailure::Instruction(e)) => {
            assert_eq!(e.line, 6);
            assert_eq!(
                e.inner(),
                &InstructionError::Operand {
                    position: 1,
                    error: LexicalError::EmptyLiteral {
                        kind: ValueKind::Int,
                        token: "int@".to_string()
                    }
                }
            );
            assert!(e.to_string().starts_with("line 6: "));
        }
        other => panic!("expected an instruction error, got {other:?}"),
    }
}

#[test]
fn test_first_error_wins() {
    // The unknown opcode on line 4 is never reached.
    assert_eq!(
        failure_status(".IPPcode23\nBREAK\nMOVE GF@x\nFOOBAR\n"),
        ExitStatus::Syntax
    );
}

#[test]
fn test_escape_scenario() {
    let document = translate_ok(".IPPcode23\nJUMPIFEQ lbl GF@a string@hello\\064\n");
    assert_eq!(document.instructions().len(), 1);
    assert!(document
        .render()
        .contains("<arg3 type=\"string\">hello\\064</arg3>"));
}

#[test]
fn test_crlf_line_endings() {
    let document = translate_ok(".IPPcode23\r\nDEFVAR GF@x\r\nWRITE GF@x\r\n");
    assert_eq!(document.instructions().len(), 2);
}

#[test]
fn test_comment_bytes_need_not_be_utf8() {
    let input: &[u8] = b".IPPcode23 # \xA9 1999\n# caf\xE9\nBREAK # na\xEFve\n";
    match translate(input, &IoTarget::Stdin) {
        Ok(document) => {
            assert_eq!(document.instructions().len(), 1);
            assert_eq!(document.instructions()[0].opcode(), Opcode::Break);
        }
        Err(e) => panic!("comments should be ignored, got error: {e}"),
    }
}

#[test]
fn test_code_must_be_utf8() {
    let input: &[u8] = b".IPPcode23\nBREAK\nWRITE string@caf\xE9 # \xE9\n";
    match translate(input, &IoTarget::Stdin) {
        Err(e @ TranslationFailure::NotUtf8 { line: 3 }) => {
            assert_eq!(e.status(), ExitStatus::Syntax);
            assert!(e.to_string().starts_with("line 3: "));
        }
        other => panic!("expected an encoding error on line 3, got {other:?}"),
    }
}

#[test]
fn test_control_character_in_string_is_rejected() {
    assert_eq!(
        failure_status(".IPPcode23\nWRITE string@a\u{1}b\n"),
        ExitStatus::Syntax
    );
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "device unplugged",
        ))
    }
}

#[test]
fn test_read_failure() {
    let reader = std::io::BufReader::new(FailingReader);
    let target = IoTarget::File("prog.ippcode23".into());
    match translate(reader, &target) {
        Err(e @ TranslationFailure::Io(_)) => {
            assert_eq!(e.status(), ExitStatus::InputFile);
        }
        other => panic!("expected an I/O failure, got {other:?}"),
    }
}

#[test]
fn test_runs_are_independent() {
    let mut first = TranslationRun::new();
    first.feed(1, ".IPPcode23").expect("valid header");
    first.feed(2, "BREAK").expect("valid instruction");
    first.feed(3, "BREAK").expect("valid instruction");

    let mut second = TranslationRun::new();
    second.feed(1, ".IPPcode23").expect("valid header");
    second.feed(2, "CREATEFRAME").expect("valid instruction");

    let second = second.finish().expect("second run is complete");
    assert_eq!(second.instructions()[0].order(), 1);
    let first = first.finish().expect("first run is complete");
    assert_eq!(first.instructions().len(), 2);
}

fn line_strategy() -> impl proptest::strategy::Strategy<Value = String> {
    proptest::prop_oneof![
        proptest::strategy::Just("BREAK".to_string()),
        proptest::strategy::Just("  createframe  ".to_string()),
        proptest::strategy::Just("DEFVAR GF@x # define".to_string()),
        proptest::strategy::Just("WRITE string@a\\032b".to_string()),
        proptest::strategy::Just("JUMPIFNEQ end LF@a nil@nil".to_string()),
        proptest::strategy::Just("".to_string()),
        proptest::strategy::Just("# comment".to_string()),
        proptest::strategy::Just(" \t ".to_string()),
    ]
}

#[proptest]
fn order_numbers_are_one_to_n(
    #[strategy(proptest::collection::vec(line_strategy(), 0..30))] lines: Vec<String>,
) {
    let body = format!(".IPPcode23\n{}\n", lines.join("\n"));
    let meaningful = body
        .as_bytes()
        .lines()
        .skip(1)
        .map(|line| line.expect("in-memory read"))
        .filter(|line| normalize(line) != Normalized::Skip)
        .count();
    let document = translate_ok(&body);
    let orders: Vec<usize> = document.instructions().iter().map(|i| i.order()).collect();
    let expected: Vec<usize> = (1..=meaningful).collect();
    assert_eq!(orders, expected);
}

#[proptest]
fn rendered_variables_have_upper_case_frames(
    #[strategy("[GLT]F")] frame: String,
    #[strategy("[a-zA-Z_][a-zA-Z0-9_]{0,10}")] name: String,
) {
    let document = translate_ok(&format!(".IPPcode23\nDEFVAR {frame}@{name}\n"));
    let value = document.instructions()[0].arguments()[0].value().to_string();
    assert_eq!(value, format!("{frame}@{name}"));
    assert!(value[..2].chars().all(|ch| ch.is_ascii_uppercase()));
}
