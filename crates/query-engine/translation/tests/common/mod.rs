use std::fs;
use std::path::PathBuf;

use query_engine_metadata::metadata::{Dialect, FilterGroupSequence};
use query_engine_translation::translation;

fn golden_directory(testname: &str) -> PathBuf {
    PathBuf::from("tests/goldenfiles").join(testname)
}

/// Load the sequence of a golden test.
pub fn load_sequence(testname: &str) -> anyhow::Result<FilterGroupSequence> {
    let directory = golden_directory(testname);
    let sequence = serde_json::from_str(&fs::read_to_string(directory.join("sequence.json"))?)?;
    Ok(sequence)
}

/// Compile the sequence of a golden test into the given dialect.
pub fn test_translation(testname: &str, dialect: Dialect) -> anyhow::Result<String> {
    let sequence = load_sequence(testname)?;
    let compiled = translation::query::compile(&sequence, dialect)?;
    Ok(compiled.to_string())
}

/// The expected output of a golden test, without the trailing newline.
pub fn expected_output(testname: &str, dialect: Dialect) -> anyhow::Result<String> {
    let file = match dialect {
        Dialect::Rest => "expected.rest",
        Dialect::Xml => "expected.xml",
    };
    let expected = fs::read_to_string(golden_directory(testname).join(file))?;
    Ok(expected.trim_end_matches('\n').to_string())
}

/// Compile a golden test in both dialects and compare against the expected files.
pub fn assert_translation(testname: &str) {
    for dialect in [Dialect::Rest, Dialect::Xml] {
        let actual = test_translation(testname, dialect).unwrap();
        let expected = expected_output(testname, dialect).unwrap();
        similar_asserts::assert_eq!(expected, actual, "{testname} ({dialect})");
    }
}
