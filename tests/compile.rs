use expreval::{Config, ErrorKind, compile, compile_and_evaluate, compile_and_evaluate_with};
use rstest::rstest;

#[rstest]
#[case("(4 + 5 * (7 - 3)) - 2", 22.0)]
#[case("4+5+7/2", 12.5)]
#[case("(2 * 4) + (8 * 5) - ( 6 / 3 )", 46.0)]
#[case("((2 * 4) + (8 * 5) - ( 6 / 3 )) / 2", 23.0)]
#[case("0", 0.0)]
#[case("9-8-7", -6.0)]
#[case("2*3+4*5", 26.0)]
#[case("2*(3+4)*5", 70.0)]
#[case("9/3/3", 1.0)]
#[case("1-2*3/4+5", 4.5)]
#[case("((((9))))", 9.0)]
fn evaluates(#[case] expression: &str, #[case] expected: f64) {
    assert_eq!(compile_and_evaluate(expression).unwrap(), expected);
}

#[rstest]
#[case("10+1", ErrorKind::MultiDigitNotSupported)]
#[case("-10", ErrorKind::InsufficientOperands)]
#[case("", ErrorKind::MalformedExpression)]
#[case("asdf", ErrorKind::InvalidCharacter)]
#[case("1++2", ErrorKind::InsufficientOperands)]
#[case("*3", ErrorKind::InsufficientOperands)]
#[case("(1+2", ErrorKind::MalformedExpression)]
#[case("3 4", ErrorKind::MultiDigitNotSupported)]
#[case("x", ErrorKind::InvalidCharacter)]
fn rejects(#[case] expression: &str, #[case] expected: ErrorKind) {
    assert_eq!(compile_and_evaluate(expression).unwrap_err().kind(), expected);
}

#[rstest]
#[case("(4+5*(7-3))-2")]
#[case("4+5+7/2")]
#[case("10+1")]
#[case("-10")]
#[case("asdf")]
#[case("(1+2")]
fn whitespace_does_not_matter(#[case] compact: &str) {
    let spaced: String = compact
        .chars()
        .flat_map(|c| [' ', c, '\t'])
        .collect();

    match (compile_and_evaluate(compact), compile_and_evaluate(&spaced)) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(a), Err(b)) => assert_eq!(a.kind(), b.kind()),
        (a, b) => panic!("{compact:?} gave {a:?} but {spaced:?} gave {b:?}"),
    }
}

#[test]
fn repeated_calls_agree() {
    let expression = "((2 * 4) + (8 * 5) - ( 6 / 3 )) / 2";
    let first = compile_and_evaluate(expression).unwrap();
    for _ in 0..10 {
        assert_eq!(compile_and_evaluate(expression).unwrap(), first);
    }

    let first = compile_and_evaluate("10+1").unwrap_err().kind();
    for _ in 0..10 {
        assert_eq!(compile_and_evaluate("10+1").unwrap_err().kind(), first);
    }
}

#[test]
fn division_by_zero_is_not_an_error() {
    assert_eq!(compile_and_evaluate("5/0").unwrap(), f64::INFINITY);
    assert!(compile_and_evaluate("(3-3)/(2-2)").unwrap().is_nan());
}

#[test]
fn config_limits_tree_height() {
    let config = Config::default().with_max_depth(2);
    assert_eq!(compile_and_evaluate_with("1+2", &config).unwrap(), 3.0);
    assert_eq!(
        compile_and_evaluate_with("1+2+3", &config).unwrap_err().kind(),
        ErrorKind::TooDeep
    );
}

#[test]
fn compiled_tree_prints_in_prefix_notation() {
    let tree = compile("4+5+7/2", &Config::default()).unwrap();
    assert_eq!(tree.to_string(), "(+ (+ 4 5) (/ 7 2))");
}
