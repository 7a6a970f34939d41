use crate::lexer::prelude::*;
use crate::utils::prelude::SrcSpan;
use super::prelude::*;

fn parse(input: &str) -> Parsed {
    parse_program(input).expect("program should parse")
}

fn parse_expression(input: &str) -> Expression {
    let parsed = parse(&format!("x = {input};"));

    match parsed.program.statements.into_iter().next() {
        Some(Statement::Assign(assign)) => assign.value,
        other => panic!("expected an assignment, got {:?}", other),
    }
}

fn parse_err(input: &str) -> ParseError {
    parse_program(input).expect_err("program should not parse")
}

#[test]
fn test_declarations() {
    let parsed = parse("int a; float b = 2.5; string s = \"hi\"; boolean ok = true;");
    let statements = parsed.program.statements;

    assert_eq!(statements.len(), 4);

    match &statements[0] {
        Statement::Declare(declare) => {
            assert_eq!(declare.var_type, VarType::Int);
            assert_eq!(declare.name.value, "a");
            assert_eq!(declare.value, None);
        }
        other => panic!("expected a declaration, got {:?}", other),
    }

    match &statements[3] {
        Statement::Declare(declare) => {
            assert_eq!(declare.var_type, VarType::Boolean);
            assert!(matches!(
                declare.value,
                Some(Expression::Literal(Literal::Bool { value: true, .. }))
            ));
        }
        other => panic!("expected a declaration, got {:?}", other),
    }
}

#[test]
fn test_product_binds_tighter_than_sum() {
    match parse_expression("1 + 2 * 3") {
        Expression::Infix(infix) => {
            assert_eq!(infix.operator, Token::Plus);
            assert!(matches!(
                *infix.right,
                Expression::Infix(Infix { operator: Token::Asterisk, .. })
            ));
        }
        other => panic!("expected an infix expression, got {:?}", other),
    }
}

#[test]
fn test_parentheses_override_precedence() {
    match parse_expression("(1 + 2) * 3") {
        Expression::Infix(infix) => {
            assert_eq!(infix.operator, Token::Asterisk);
            assert!(matches!(*infix.left, Expression::Grouped { .. }));
        }
        other => panic!("expected an infix expression, got {:?}", other),
    }
}

#[test]
fn test_exponent_binds_tighter_than_product() {
    match parse_expression("2 ^ 3 * 2") {
        Expression::Infix(infix) => {
            assert_eq!(infix.operator, Token::Asterisk);
            assert!(matches!(
                *infix.left,
                Expression::Infix(Infix { operator: Token::Caret, .. })
            ));
        }
        other => panic!("expected an infix expression, got {:?}", other),
    }
}

#[test]
fn test_exponent_is_left_associative() {
    match parse_expression("2 ^ 3 ^ 2") {
        Expression::Infix(infix) => {
            assert_eq!(infix.operator, Token::Caret);
            assert!(matches!(
                *infix.left,
                Expression::Infix(Infix { operator: Token::Caret, .. })
            ));
        }
        other => panic!("expected an infix expression, got {:?}", other),
    }
}

#[test]
fn test_unary_minus_binds_tighter_than_sum() {
    match parse_expression("-3 + 4") {
        Expression::Infix(infix) => {
            assert_eq!(infix.operator, Token::Plus);
            assert!(matches!(*infix.left, Expression::Prefix(_)));
        }
        other => panic!("expected an infix expression, got {:?}", other),
    }
}

#[test]
fn test_logic_binds_weaker_than_comparison() {
    match parse_expression("a < b and b < c") {
        Expression::Infix(infix) => {
            assert_eq!(infix.operator, Token::And);
            assert!(matches!(
                *infix.left,
                Expression::Infix(Infix { operator: Token::LessThan, .. })
            ));
            assert!(matches!(
                *infix.right,
                Expression::Infix(Infix { operator: Token::LessThan, .. })
            ));
        }
        other => panic!("expected an infix expression, got {:?}", other),
    }
}

#[test]
fn test_chained_comparison_is_rejected() {
    let err = parse_err("x = 1 < 2 < 3;");

    assert_eq!(err.error, ParseErrorType::ChainedComparison);
}

#[test]
fn test_parenthesized_comparison_can_be_compared() {
    match parse_expression("(a < b) == c") {
        Expression::Infix(infix) => {
            assert_eq!(infix.operator, Token::Equal);
            assert!(matches!(*infix.left, Expression::Grouped { .. }));
        }
        other => panic!("expected an infix expression, got {:?}", other),
    }
}

#[test]
fn test_if_elif_else() {
    let parsed = parse(
        "if (a < 1) { print(1); } elif (a < 2) { print(2); } elif (a < 3) { print(3); } else { print(4); }"
    );

    match &parsed.program.statements[0] {
        Statement::If(conditional) => {
            assert_eq!(conditional.consequence.statements.len(), 1);
            assert_eq!(conditional.elif_clauses.len(), 2);
            assert!(conditional.alternative.is_some());
        }
        other => panic!("expected a conditional, got {:?}", other),
    }
}

#[test]
fn test_for_loop() {
    let parsed = parse("for (int i = 0; i < 3; i = i + 1) { print(i); }");

    match &parsed.program.statements[0] {
        Statement::For(loop_) => {
            assert_eq!(loop_.init.name.value, "i");
            assert!(loop_.init.value.is_some());
            assert_eq!(loop_.step.name.value, "i");
            assert_eq!(loop_.body.statements.len(), 1);
        }
        other => panic!("expected a for loop, got {:?}", other),
    }
}

#[test]
fn test_for_loop_requires_initializer() {
    let err = parse_err("for (int i; i < 3; i = i + 1) { print(i); }");

    assert_eq!(err.error, ParseErrorType::ExpectedInitializer);
}

#[test]
fn test_while_loop() {
    let parsed = parse("while (x > 0) { x = x - 1; }");

    match &parsed.program.statements[0] {
        Statement::While(loop_) => {
            assert_eq!(loop_.body.statements.len(), 1);
        }
        other => panic!("expected a while loop, got {:?}", other),
    }
}

#[test]
fn test_missing_semicolon() {
    let err = parse_err("int x = 1\nprint(x);");

    assert_eq!(err.error, ParseErrorType::MissingSemicolon);
    // Points at the gap right after the statement
    assert_eq!(err.span, SrcSpan { start: 9, end: 10 });
}

#[test]
fn test_dangling_semicolon_is_rejected() {
    let err = parse_err("x = 1;;");

    assert!(matches!(err.error, ParseErrorType::UnexpectedToken { .. }));
}

#[test]
fn test_unclosed_block() {
    let err = parse_err("while (true) { print(1);");

    assert_eq!(err.error, ParseErrorType::UnexpectedEof);
}

#[test]
fn test_lex_errors_are_collected_not_fatal() {
    let parsed = parse("int x = 1; @ print(x);");

    assert_eq!(parsed.program.statements.len(), 2);
    assert_eq!(parsed.lex_errors.len(), 1);
    assert_eq!(
        parsed.lex_errors[0].error,
        LexicalErrorType::UnrecognizedCharacter { ch: '@' },
    );
}

#[test]
fn test_display_round_trips_source_shape() {
    let source = "int x = 1 + 2 * 3; if (x > 3) { print(x); } else { print(-x); }";
    let parsed = parse(source);

    assert_eq!(parsed.program.to_string(), source);
}
