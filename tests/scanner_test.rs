use phylotext::{NewickError, TreeScanner};

#[test]
fn test_splits_statements_on_semicolons() {
    let input = "(A,B);\n(C,D)E;\n";
    let mut scanner = TreeScanner::new(input.as_bytes());

    assert!(scanner.advance().unwrap());
    assert_eq!(scanner.current_text(), "(A,B);");

    assert!(scanner.advance().unwrap());
    assert_eq!(scanner.current_text(), "\n(C,D)E;");

    assert!(!scanner.advance().unwrap());
}

#[test]
fn test_empty_input_ends_cleanly() {
    let mut scanner = TreeScanner::new("".as_bytes());
    assert!(!scanner.advance().unwrap());
}

#[test]
fn test_trailing_whitespace_ends_cleanly() {
    let mut scanner = TreeScanner::new("(A,B);\n\n".as_bytes());
    assert!(scanner.advance().unwrap());
    assert!(!scanner.advance().unwrap());
}

#[test]
fn test_unterminated_statement_is_fatal() {
    let mut scanner = TreeScanner::new("(A,B".as_bytes());
    assert!(matches!(
        scanner.advance(),
        Err(NewickError::UnterminatedStatement(_))
    ));
}

#[test]
fn test_trailing_garbage_after_last_statement() {
    let mut scanner = TreeScanner::new("(A,B); (C,D".as_bytes());
    assert!(scanner.advance().unwrap());
    assert_eq!(scanner.current_text(), "(A,B);");
    assert!(matches!(
        scanner.advance(),
        Err(NewickError::UnterminatedStatement(_))
    ));
}

#[test]
fn test_statements_arrive_one_at_a_time() {
    let input = "A;B;C;";
    let mut scanner = TreeScanner::new(input.as_bytes());
    let mut statements: Vec<String> = Vec::new();
    while scanner.advance().unwrap() {
        statements.push(scanner.current_text().to_string());
    }
    assert_eq!(statements, vec!["A;", "B;", "C;"]);
}
