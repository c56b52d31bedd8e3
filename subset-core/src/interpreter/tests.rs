use std::{path::Path, rc::Rc};

use crate::{
    environment::prelude::{Value, ValueType},
    utils::prelude::{Error, VectorWarningEmitterIO, Warning},
};

use super::prelude::*;

fn execute(src: &str) -> String {
    Session::new().execute(src)
}

#[test]
fn test_classify() {
    assert_eq!(
        classify("int x = max(1, 2);"),
        Shape::FunctionDeclaration { declared: ValueType::Integer, name: "x", call: "max(1, 2)" }
    );
    assert_eq!(
        classify("boolean ok = true ;"),
        Shape::BooleanDeclaration { name: "ok", value: true }
    );
    assert_eq!(
        classify("String s = \"a;b\";"),
        Shape::Declaration { declared: ValueType::Text, name: "s", value: "\"a;b\"" }
    );
    assert_eq!(classify("System.out.println( x );"), Shape::Print { argument: "x" });
    assert_eq!(classify("print();"), Shape::Print { argument: "" });
    assert_eq!(classify("closeFile();"), Shape::Call { call: "closeFile()" });
    assert_eq!(classify("x = x + 1;"), Shape::Assignment { name: "x", value: "x + 1" });
    assert_eq!(classify("boolean b = 1;"), Shape::Unsupported);
    assert_eq!(classify("if (x) {"), Shape::Unsupported);
    assert_eq!(classify("int x = 5"), Shape::Unsupported);
}

#[test]
fn test_declarations_and_print() {
    let src = r#"
        int a = 5;
        double d = 2.5;
        String s = "hello world";
        boolean b = false;
        print(a);
        print(d);
        print(s);
        System.out.println(b);
        print("literal");
        print(true);
    "#;

    assert_eq!(execute(src), "5\n2.5\nhello world\nfalse\nliteral\ntrue");
}

#[test]
fn test_int_declaration_uses_evaluator() {
    assert_eq!(execute("int a = 2;\nint b = (a + 3) * 4;\nprint(b);"), "20");
    assert_eq!(execute("int x = -7;\nprint(x);"), "-7");
    assert_eq!(execute("double d = 3;\nprint(d);"), "3.0");
}

#[test]
fn test_session_persists_between_calls() {
    let mut session = Session::new();

    assert_eq!(session.execute("int a = 5;"), "");
    assert_eq!(session.execute("a = a + 1;\nprint(a);"), "6");
    assert_eq!(session.environment().get("a"), Some(&Value::from(6_i64)));

    session.reset();

    assert!(session.environment().is_empty());
    assert_eq!(session.execute("print(a);"), "Error: Cannot evaluate a");
}

#[test]
fn test_unsupported_statement_continues() {
    let output = execute("foo bar baz\nprint(1);");

    assert_eq!(output, "Syntax Error: Unsupported statement → foo bar baz\n1");
}

#[test]
fn test_division_by_zero_is_reported() {
    let mut session = Session::new();

    let report = session.run("int x = 4/0;\nprint(2);");

    assert_eq!(report.output(), "Error: Invalid arithmetic expression → 4/0\n2");
    assert_eq!(report.problems().len(), 1);
    assert_eq!(report.problems()[0].kind, ProblemKind::Evaluation);
    assert_eq!(report.problems()[0].line, 1);
    assert_eq!(report.problems()[0].cause.as_deref(), Some("division by zero"));
    assert!(!session.environment().contains("x"));
}

#[test]
fn test_invalid_declarations() {
    let src = r#"
        int a = "5";
        int b = 1.5;
        int c = true;
        double d = abc;
        String s = hello;
    "#;

    assert_eq!(
        execute(src),
        "Invalid integer value: \"5\"\n\
         Invalid integer value: 1.5\n\
         Invalid integer value: true\n\
         Invalid double value: abc\n\
         Invalid string value: hello"
    );
}

#[test]
fn test_last_successful_value_wins() {
    let mut session = Session::new();

    session.execute("int v = 1;\nv = 2;\nv = 2 / 0;\nint v = 3;\nv = oops;");

    assert_eq!(session.environment().get("v"), Some(&Value::from(3_i64)));
}

#[test]
fn test_assignment() {
    let src = r#"
        double d = 1.0;
        d = 2.5;
        d = nope;
        String s = "a";
        s = "b";
        s = b;
        boolean f = true;
        f = false;
        f = 1;
        missing = 3;
        print(d);
        print(s);
        print(f);
    "#;

    assert_eq!(
        execute(src),
        "Invalid double value: nope\n\
         Invalid string assignment\n\
         Invalid boolean value: 1\n\
         Error: Undefined variable → missing\n\
         2.5\n\
         b\n\
         false"
    );
}

#[test]
fn test_print_concatenation() {
    let src = r#"
        int a = 5;
        String name = "x";
        print("a=" + a);
        print(name + " " + toUpperCase(name));
        print(1 + );
        print(a + b);
    "#;

    assert_eq!(
        execute(src),
        "a=5\n\
         x X\n\
         1Error: Invalid print statement\n\
         5Error: Cannot evaluate b"
    );
}

#[test]
fn test_print_quoted_argument_is_verbatim() {
    let src = r#"
        print("a" + "b");
        print("say "hi"");
        print("x=" + 1 + "!");
        print("");
    "#;

    assert_eq!(execute(src), "a\" + \"b\nsay \"hi\"\nx=\" + 1 + \"!");
}

#[test]
fn test_quoted_argument_does_not_warn() {
    let warnings = VectorWarningEmitterIO::new();
    let mut session = Session::with_warnings(Rc::new(warnings.clone()));

    assert_eq!(session.execute("print(\"1+1\");"), "1+1");
    assert!(warnings.is_empty());
}

#[test]
fn test_print_forms() {
    let src = r#"
        print();
        print(2 * (5 - 3));
        print(sqrt(16));
        print(closeFile());
        print(max(1, "a"));
        print(nothing here);
    "#;

    assert_eq!(
        execute(src),
        "Error: Invalid print statement\n\
         4\n\
         4.0\n\
         null\n\
         Error: Function 'max' with these parameter types not found\n\
         Error: Cannot evaluate nothing here"
    );
}

#[test]
fn test_function_result_declarations() {
    let src = r#"
        int m = max(3, 8);
        double p = power(2, 3);
        double w = add(1, 2);
        int bad = sqrt(4);
        int s = concat("a", "b");
        double v = closeFile();
        int e = charAt("abc", 9);
        print(m);
        print(p);
        print(w);
    "#;

    assert_eq!(
        execute(src),
        "Error: Function must return an integer for int assignment\n\
         Error: Function must return a number for int assignment\n\
         Error: Function must return a number for double assignment\n\
         Error: Index 9 out of bounds for length 3\n\
         8\n\
         8.0\n\
         3.0"
    );
}

#[test]
fn test_bare_calls() {
    let src = r#"
        String s = "abc";
        reverseString(s);
        closeFile();
        toString("");
        unknownCall(1);
    "#;

    assert_eq!(
        execute(src),
        "cba\nError: Function 'unknownCall' with these parameter types not found"
    );
}

#[test]
fn test_widening_through_variables() {
    let src = r#"
        int n = 9;
        print(sqrt(n));
        double r = sqrt(n);
        print(r);
    "#;

    assert_eq!(execute(src), "3.0\n3.0");
}

#[test]
fn test_comments() {
    let src = "int a = 1; // one\n/* block */ print(a);\n// print(2);\nprint(3); /* trailing */";

    assert_eq!(execute(src), "1\n3");
}

#[test]
fn test_problems() {
    let src = "int a = 1;\n\nfoo;\nprint(b);\nmissing = 2;\nint c = \"x\";";

    let report = Session::new().run(src);

    let problems = report.problems()
        .iter()
        .map(|problem| (problem.kind, problem.line))
        .collect::<Vec<_>>();

    assert_eq!(problems, vec![
        (ProblemKind::Syntax, 3),
        (ProblemKind::Evaluation, 4),
        (ProblemKind::Resolution, 5),
        (ProblemKind::Declaration, 6),
    ]);

    assert_eq!(report.problems()[0].span, crate::utils::prelude::SrcSpan::from(12, 16));
    assert!(report.has_problems());
}

#[test]
fn test_report_to_error() {
    let src = "foo;";
    let report = Session::new().run(src);

    let error = report.to_error(Path::new("main.java"), src).expect("problems");

    assert!(matches!(&error, Error::Statements { problems, .. } if problems.len() == 1));

    let pretty = error.pretty_string();
    assert!(pretty.contains("Unsupported statement"));
    assert!(pretty.contains("main.java"));

    assert!(Session::new().run("int a = 1;").to_error(Path::new("ok"), "").is_none());
}

#[test]
fn test_redeclaration_warning() {
    let warnings = VectorWarningEmitterIO::new();
    let mut session = Session::with_warnings(Rc::new(warnings.clone()));

    session.execute("int x = 1;\nint x = 2;\ndouble x = 1.5;\nprint(x);");

    let emitted = warnings.take();
    assert_eq!(emitted.len(), 1);
    assert_eq!(session.warning_count(), 1);

    let Warning::Source { warning, .. } = &emitted[0];
    assert!(matches!(
        warning,
        SessionWarning::Redeclaration { name, previous: ValueType::Integer, declared: ValueType::Double, .. }
            if name == "x"
    ));

    assert!(emitted[0].pretty_string().contains("Variable redeclared with another type"));
    assert_eq!(session.environment().get("x"), Some(&Value::from(1.5)));
}

#[test]
fn test_split_quoted_literal_warning() {
    let warnings = VectorWarningEmitterIO::new();
    let mut session = Session::with_warnings(Rc::new(warnings.clone()));

    let output = session.execute("print(\"a+b\" + 1);");

    assert_eq!(output, "Error: Cannot evaluate \"aError: Cannot evaluate b\"1");
    assert_eq!(warnings.len(), 1);
}

#[test]
fn test_read_source() -> Result<(), Error> {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "print(\"héllo\");").expect("write");

    let src = read_source(file.path())?;
    assert_eq!(src, "print(\"héllo\");");
    assert_eq!(Session::new().execute(&src), "héllo");

    let missing = file.path().with_extension("missing");
    assert!(matches!(read_source(&missing), Err(Error::StdIo { .. })));

    let mut invalid = tempfile::NamedTempFile::new().expect("temp file");
    invalid.write_all(&[0x70, 0xff, 0xfe]).expect("write");
    assert!(matches!(read_source(invalid.path()), Err(Error::Encoding { .. })));

    Ok(())
}
