use expect_test::expect;
use texlog::LogParser;

#[test]
fn test_diagnostic_json_shape() {
    let input = "(compiles/d1585ce575dea4cab55f784a22a88652/sections/introduction.tex\n\
                 LaTeX Warning: Citation `Lambert:2010iw' on page 1 undefined on input line 7.\n\
                 \n\
                 )\n\
                 !  ==> Fatal error occurred, no output PDF file produced!\n";
    let result = LogParser::new().parse(input);

    let warning = serde_json::to_string(&result.warnings[0]).unwrap();
    expect![[r#"{"line":7,"message":"Citation `Lambert:2010iw' on page 1 undefined on input line 7.","file":"compiles/d1585ce575dea4cab55f784a22a88652/sections/introduction.tex","level":"warning"}"#]]
        .assert_eq(&warning);

    let fatal = serde_json::to_string(&result.errors[0]).unwrap();
    expect![[r#"{"message":" ==> Fatal error occurred, no output PDF file produced!","level":"error"}"#]]
        .assert_eq(&fatal);

    let files = serde_json::to_string(&result.files).unwrap();
    expect![[r#"[{"path":"compiles/d1585ce575dea4cab55f784a22a88652/sections/introduction.tex"}]"#]]
        .assert_eq(&files);
}
