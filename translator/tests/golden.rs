use std::fs;
use std::path::PathBuf;

use translator::*;

fn get_test_input_file_name(relative_to_manifest: &str) -> PathBuf {
    let mut location = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    location.push(relative_to_manifest);
    if location.exists() {
        location
    } else {
        panic!(
            "Cannot find input {relative_to_manifest}: {} does not exist",
            location.display()
        );
    }
}

fn get_temp_output_file_name() -> tempfile::TempPath {
    tempfile::Builder::new()
        .suffix(".xml")
        .tempfile()
        .expect("should be able to create a temporary file")
        .into_temp_path()
}

fn first_difference(expected: &str, got: &str) -> Option<(usize, String, String)> {
    let mut expected_lines = expected.lines();
    let mut got_lines = got.lines();
    let mut line_number = 1;
    loop {
        match (expected_lines.next(), got_lines.next()) {
            (None, None) => return None,
            (e, g) if e == g => (),
            (e, g) => {
                return Some((
                    line_number,
                    e.unwrap_or("<end of file>").to_string(),
                    g.unwrap_or("<end of file>").to_string(),
                ));
            }
        }
        line_number += 1;
    }
}

fn translator_golden_output_test(
    input_relative_path: &str,
    golden_output_relative_path: &str,
) -> Result<(), String> {
    let input = get_test_input_file_name(input_relative_path);
    let golden = get_test_input_file_name(golden_output_relative_path);
    let actual_output = get_temp_output_file_name();

    translate_file(Some(input.as_path()), Some(&*actual_output))
        .map_err(|e| format!("failed to translate {input_relative_path}: {e}"))?;
    let expected = fs::read_to_string(&golden)
        .map_err(|e| format!("failed to read {}: {e}", golden.display()))?;
    let got = fs::read_to_string(&actual_output)
        .map_err(|e| format!("failed to read {}: {e}", actual_output.display()))?;
    if let Some((line, e, g)) = first_difference(&expected, &got) {
        return Err(format!(
            "{} and {} differ at line {line}: expected {e:?} but got {g:?}",
            golden.display(),
            actual_output.display(),
        ));
    }
    if expected != got {
        return Err("outputs differ only in line endings".to_string());
    }
    Ok(())
}

#[test]
fn golden_output_translating_factorial_program() {
    translator_golden_output_test("testdata/factorial.ippcode23", "testdata/factorial.xml")
        .expect("actual and golden outputs should have been identical");
}

#[test]
fn failed_translation_writes_no_output() {
    let dir = tempfile::tempdir().expect("should be able to create a temporary directory");
    let input = dir.path().join("bad.ippcode23");
    let output = dir.path().join("bad.xml");
    fs::write(&input, ".IPPcode23\nDEFVAR GF@x\nFOOBAR\n").expect("should be able to write input");
    match translate_file(Some(input.as_path()), Some(output.as_path())) {
        Err(e) => assert_eq!(e.status(), ExitStatus::Opcode),
        Ok(()) => panic!("FOOBAR should have been rejected"),
    }
    assert!(!output.exists());
}

#[test]
fn missing_input_file_is_an_input_error() {
    let dir = tempfile::tempdir().expect("should be able to create a temporary directory");
    let input = dir.path().join("does-not-exist.ippcode23");
    let output = dir.path().join("out.xml");
    match translate_file(Some(input.as_path()), Some(output.as_path())) {
        Err(e) => assert_eq!(e.status(), ExitStatus::InputFile),
        Ok(()) => panic!("a missing input file should be an error"),
    }
}
