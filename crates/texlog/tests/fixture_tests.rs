use texlog::{Level, LogParser, ParseOptions, ParseResult};

const ERRORS_LOG: &str = include_str!("fixtures/errors.log");
const WARNINGS_LOG: &str = include_str!("fixtures/warnings.log");
const BAD_BOXES_LOG: &str = include_str!("fixtures/bad-boxes.log");
const BAD_DOCUMENTCLASS_LOG: &str = include_str!("fixtures/bad-documentclass.log");

fn parse(log: &str, ignore_duplicates: bool) -> ParseResult {
    LogParser::with_options(ParseOptions::default().ignore_duplicates(ignore_duplicates)).parse(log)
}

fn line_and_message(result: &[texlog::Diagnostic]) -> Vec<(Option<u32>, &str)> {
    result.iter().map(|d| (d.line, d.message.as_str())).collect()
}

#[test]
fn test_error_parsing() {
    let result = parse(ERRORS_LOG, true);

    assert_eq!(
        line_and_message(&result.errors),
        vec![
            (Some(29), "Undefined control sequence."),
            (
                Some(30),
                "LaTeX Error: \\begin{equation} on input line 28 ended by \\end{equaion}."
            ),
            (Some(30), "Missing $ inserted."),
            (Some(30), "Display math should end with $$."),
            (Some(46), "Extra }, or forgotten \\right."),
            (Some(46), "Missing \\right. inserted."),
            (Some(46), "Missing } inserted."),
        ]
    );
    assert!(result.warnings.is_empty());
    assert!(result.typesetting.is_empty());
}

#[test]
fn test_ignore_duplicates() {
    assert_eq!(parse(ERRORS_LOG, false).errors.len(), 10, "Duplicates included");
    assert_eq!(parse(ERRORS_LOG, true).errors.len(), 7, "Duplicates ignored");
}

#[test]
fn test_error_file_paths() {
    let result = parse(ERRORS_LOG, false);
    for error in &result.errors {
        assert_eq!(
            error.file.as_deref(),
            Some("compiles/dff0c37d892f346e58fc14975a16bf69/sections/appendices.tex")
        );
    }
}

#[test]
fn test_error_log_file_tree() {
    let result = parse(ERRORS_LOG, false);
    assert_eq!(result.files.len(), 1);

    let main = &result.files[0];
    assert_eq!(main.path, "compiles/dff0c37d892f346e58fc14975a16bf69/output.tex");
    let children: Vec<&str> = main.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        children,
        vec![
            "/usr/share/texlive/texmf-dist/tex/latex/base/article.cls",
            "/usr/share/texlive/texmf-dist/tex/latex/amsmath/amsmath.sty",
            "compiles/dff0c37d892f346e58fc14975a16bf69/output.aux",
            "compiles/dff0c37d892f346e58fc14975a16bf69/sections/appendices.tex",
            "compiles/dff0c37d892f346e58fc14975a16bf69/output.aux",
        ]
    );
    assert_eq!(
        main.files[0].files[0].path,
        "/usr/share/texlive/texmf-dist/tex/latex/base/size10.clo"
    );
}

#[test]
fn test_badbox_parsing() {
    let result = parse(BAD_BOXES_LOG, false);

    assert_eq!(
        line_and_message(&result.typesetting),
        vec![
            (Some(9), "Overfull \\hbox (29.11179pt too wide) in paragraph at lines 9--10"),
            (Some(11), "Underfull \\hbox (badness 10000) in paragraph at lines 11--13"),
            (Some(27), "Overfull \\vbox (12.00034pt too high) detected at line 27"),
            (Some(46), "Underfull \\vbox (badness 10000) detected at line 46"),
            (Some(54), "Underfull \\hbox (badness 10000) in paragraph at lines 54--55"),
            (Some(58), "Underfull \\hbox (badness 10000) in paragraph at lines 58--60"),
        ]
    );
    assert!(result.typesetting.iter().all(|d| d.level == Level::Typesetting));
}

#[test]
fn test_badbox_file_paths() {
    let result = parse(BAD_BOXES_LOG, false);
    assert_eq!(result.all.len(), 6);
    for diagnostic in &result.all {
        assert_eq!(
            diagnostic.file.as_deref(),
            Some("compiles/b6cf470376785e64ad84c57e3296c912/logs/bad-boxes.tex")
        );
    }
}

#[test]
fn test_warning_parsing() {
    let result = parse(WARNINGS_LOG, false);
    let dir = "compiles/d1585ce575dea4cab55f784a22a88652/sections";

    let expected = [
        (7, "Lambert:2010iw", 1, "introduction"),
        (7, "Lambert:2010iw", 1, "introduction"),
        (72, "Manton:2004tk", 3, "instantons"),
        (108, "Atiyah1978", 4, "instantons"),
        (176, "Dorey:1996hu", 5, "instantons"),
        (3, "Manton1982", 8, "moduli_space_approximation"),
        (21, "Weinberg:2006rq", 9, "moduli_space_approximation"),
        (192, "Bak:1999sv", 12, "moduli_space_approximation"),
        (9, "Peeters:2001np", 13, "dynamics_of_single_instanton"),
        (27, "Osborn:1981yf", 15, "dynamics_of_two_instantons"),
        (27, "Peeters:2001np", 15, "dynamics_of_two_instantons"),
        (20, "Osborn:1981yf", 22, "appendices"),
        (103, "Osborn:1981yf", 23, "appendices"),
        (103, "Peeters:2001np", 23, "appendices"),
        (352, "Peeters:2001np", 27, "appendices"),
    ];

    assert_eq!(result.warnings.len(), expected.len());
    for (warning, (line, key, page, section)) in result.warnings.iter().zip(expected) {
        assert_eq!(warning.line, Some(line));
        assert_eq!(
            warning.message,
            format!("Citation `{key}' on page {page} undefined on input line {line}.")
        );
        assert_eq!(warning.file, Some(format!("{dir}/{section}.tex")));
        assert_eq!(warning.level, Level::Warning);
    }
    assert!(result.errors.is_empty());
}

#[test]
fn test_missing_document_class() {
    let result = parse(BAD_DOCUMENTCLASS_LOG, false);

    assert_eq!(
        line_and_message(&result.errors),
        vec![
            (Some(2), "LaTeX Error: File `aricle.cls' not found."),
            (None, " ==> Fatal error occurred, no output PDF file produced!"),
        ]
    );
    assert_eq!(
        result.errors[0].file.as_deref(),
        Some("compiles/3f68b1d4c5d1c5e35a9d3d1b31a56e8a/output.tex")
    );
}

#[test]
fn test_partition_holds_for_all_fixtures() {
    for log in [ERRORS_LOG, WARNINGS_LOG, BAD_BOXES_LOG, BAD_DOCUMENTCLASS_LOG] {
        for ignore in [false, true] {
            let result = parse(log, ignore);
            assert_eq!(
                result.all.len(),
                result.errors.len() + result.warnings.len() + result.typesetting.len()
            );
        }
    }
}

#[test]
fn test_deduplication_is_idempotent() {
    for log in [ERRORS_LOG, WARNINGS_LOG, BAD_BOXES_LOG, BAD_DOCUMENTCLASS_LOG] {
        let once = parse(log, true);
        let again = parse(log, true);
        let kept_all = parse(log, false);

        assert_eq!(once, again);
        assert!(once.len() <= kept_all.len());
        assert_eq!(texlog::dedup::retain_first(once.all.clone()), once.all);
    }
}

#[test]
fn test_crlf_log_parses_the_same() {
    let crlf = ERRORS_LOG.replace('\n', "\r\n");
    assert_eq!(parse(&crlf, false), parse(ERRORS_LOG, false));
}
