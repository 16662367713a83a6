use crate::{Axis, LocationFormatter, PatternError};

fn error(pattern: &str) -> PatternError {
    LocationFormatter::of_pattern(pattern).unwrap_err()
}

#[test]
fn test_illegal_patterns() {
    let patterns = [
        "DD[MM",
        "[[D]",
        "D]",
        "DMM",
        "D'5'",
        "DD.MM",
        "D.d",
        "+",
        "D+",
        "+X",
        "++D",
        "DX+D",
        "D M M",
        "D d D",
        "MM",
        "dd ss",
        "D.DD MM",
        "L M",
        "+LL",
        "lx",
        "E H",
    ];

    for pattern in patterns {
        assert!(
            LocationFormatter::of_pattern(pattern).is_err(),
            "pattern '{pattern}' should not compile"
        );
    }
}

#[test]
fn test_error_positions() {
    assert_eq!(error("DD[MM"), PatternError::UnmatchedOpenBracket { position: 2 });
    assert_eq!(error("D[[d]"), PatternError::UnmatchedOpenBracket { position: 1 });
    assert_eq!(error("[D]]"), PatternError::UnmatchedCloseBracket { position: 3 });
    assert_eq!(error("D+ d"), PatternError::DanglingSign { position: 1 });
    assert_eq!(
        error("°D.dd"),
        PatternError::InvalidField {
            token: "D.dd".to_string(),
            position: 2
        }
    );
}

#[test]
fn test_error_messages() {
    assert_eq!(
        error("DD[MM").to_string(),
        "missing closing ']' for the '[' at position 2"
    );
    assert_eq!(
        error("DX+DD").to_string(),
        "the latitude sign is given by more than one kind of field"
    );
    assert_eq!(
        error("dd ss").to_string(),
        "the longitude field 's' requires the field 'm'"
    );
    assert_eq!(
        error("DMM").to_string(),
        "the latitude field 'D' has no fixed width but is directly followed by a number"
    );
    assert_eq!(
        error("H[ E]").to_string(),
        "the elevation field 'E' appears more than once"
    );
}

#[test]
fn test_structural_errors() {
    assert_eq!(
        error("DX+DD"),
        PatternError::ConflictingSign {
            axis: Axis::Latitude
        }
    );
    assert_eq!(
        error("D.DD MM"),
        PatternError::FractionalNotLast {
            axis: Axis::Latitude,
            letter: 'D'
        }
    );
    assert_eq!(
        error("ll mm"),
        PatternError::SignedWithSubField {
            axis: Axis::Longitude,
            letter: 'l'
        }
    );
}

#[test]
fn test_legal_patterns() {
    let patterns = [
        "DD°MM''SS.SSS\"X dd°mm''ss.sss\"x[ E.EE'm']",
        "+DD.DD+ddd.dd[+H'CRS']",
        "DD.DD,dd.dd",
        "LL.LLL ll.lll E",
        "[DD][MM][SS]",
        "[MM']DD",
        "D°'M",
        "D'°",
        "D M S.SS",
        "XD x d",
        "'DMS: 'D M S",
        "[]",
        "",
    ];

    for pattern in patterns {
        assert!(
            LocationFormatter::of_pattern(pattern).is_ok(),
            "pattern '{pattern}' should compile"
        );
    }
}

#[test]
fn test_to_pattern_normalizes() {
    let cases = [
        ("D'°'M", "D°M"),
        ("'abc'", "abc"),
        ("'D'D", "'D'D"),
        ("'DM'D", "'DM'D"),
        ("DD'.'MM", "DD'.'MM"),
        ("D','", "D','"),
        ("'a''b'", "a''b"),
        ("[MM']DD", "[MM'']DD"),
        ("D°'M", "D°''M"),
        ("''''", "''''"),
        ("'+'D", "'+'D"),
        ("H'CRS'", "H'CRS'"),
        ("[ E.EE'm']", "[ E.EE'm']"),
    ];

    for (pattern, expected) in cases {
        let formatter = LocationFormatter::of_pattern(pattern).unwrap();
        assert_eq!(formatter.to_pattern(), expected, "{pattern}");
    }
}

#[test]
fn test_to_pattern_recompiles() {
    let patterns = [
        "DD°MM''SS.SSS\"X",
        "'D='D",
        "D'.5'",
        "+DDMMSS.SS+dddmmss.ss[+H.HH'CRS']",
        "[MM']DD",
        "'lat: 'DD.DDX' lon: 'ddd.ddx",
    ];

    for pattern in patterns {
        let formatter = LocationFormatter::of_pattern(pattern).unwrap();
        let recompiled = LocationFormatter::of_pattern(&formatter.to_pattern()).unwrap();
        assert_eq!(recompiled, formatter, "{pattern}");
    }
}
