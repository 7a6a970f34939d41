use super::prelude::*;
use crate::parser::prelude::parse_program;

fn run(src: &str) -> (String, Vec<Instruction>, Vec<RuntimeError>) {
    let parsed = parse_program(src).expect("program should parse");

    let mut out = Vec::new();
    let mut evaluator = Evaluator::new(&mut out);

    evaluator
        .eval_program(&parsed.program)
        .expect("writing to a Vec can not fail");

    let code = evaluator.instructions().to_vec();
    let errors = evaluator.take_errors();
    drop(evaluator);

    (String::from_utf8(out).expect("output is utf-8"), code, errors)
}

fn output(src: &str) -> String {
    let (output, _, errors) = run(src);
    assert_eq!(errors, vec![]);

    output
}

fn tac(src: &str) -> Vec<String> {
    let (_, code, _) = run(src);

    code.iter().map(|instruction| instruction.to_string()).collect()
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(output("print(1 + 2 * 3);"), "7\n");
    assert_eq!(output("print((1 + 2) * 3);"), "9\n");
    assert_eq!(output("print(-3 + 4);"), "1\n");
    assert_eq!(output("print(2 ^ 3 * 2);"), "16\n");
    assert_eq!(output("print(2 ^ 3 ^ 2);"), "64\n");
}

#[test]
fn test_division_always_floats() {
    assert_eq!(output("print(7 / 2);"), "3.5\n");
    assert_eq!(output("print(6 / 3);"), "2\n");
    assert_eq!(output("print(1 / 0);"), "inf\n");
}

#[test]
fn test_integer_overflow_degrades_to_float() {
    assert_eq!(
        output("print(9223372036854775807 + 1);"),
        "9223372036854775808\n"
    );
    assert_eq!(
        output("print(9223372036854775807 * 2);"),
        "18446744073709551616\n"
    );
    assert_eq!(
        output("print(-(-9223372036854775807 - 1));"),
        "9223372036854775808\n"
    );
}

#[test]
fn test_int_to_float_coercion() {
    assert_eq!(output("float f = 2; print(f + 0.5);"), "2.5\n");
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        output("string a = \"foo\"; string b = \"bar\"; print(a + b);"),
        "foobar\n"
    );
}

#[test]
fn test_logic_operators() {
    assert_eq!(output("print(true and false);"), "false\n");
    assert_eq!(output("print(true or false);"), "true\n");
    assert_eq!(output("print(1 < 2 and 2 <= 2);"), "true\n");
}

#[test]
fn test_logic_does_not_short_circuit() {
    // The right side still evaluates (and still reports) when the left
    // side already decides the result
    let (output, _, errors) = run("print(true or y > 0);");

    assert_eq!(output, "true\n");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].error,
        RuntimeErrorType::UndefinedName { .. }
    ));
}

#[test]
fn test_float_declaration_rejected_for_int() {
    let (output, _, errors) = run("int x = 5.5; print(x);");

    // The declaration is skipped, so the later read reports and yields 0
    assert_eq!(output, "0\n");
    assert_eq!(errors.len(), 2);
    assert!(matches!(
        errors[0].error,
        RuntimeErrorType::FloatToIntDeclaration { .. }
    ));
    assert!(matches!(
        errors[1].error,
        RuntimeErrorType::UndefinedName { .. }
    ));
}

#[test]
fn test_string_declaration_requires_quotes() {
    let (_, _, errors) = run("string s = 5;");

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].error,
        RuntimeErrorType::QuotesRequired { .. }
    ));
}

#[test]
fn test_assign_to_undeclared_is_skipped() {
    // No entry is created, so the later read still reports
    let (output, _, errors) = run("x = 3; print(x);");

    assert_eq!(output, "0\n");
    assert_eq!(errors.len(), 2);
    assert!(matches!(
        errors[0].error,
        RuntimeErrorType::AssignToUndeclared { .. }
    ));
    assert!(matches!(
        errors[1].error,
        RuntimeErrorType::UndefinedName { .. }
    ));
}

#[test]
fn test_declared_type_is_stable() {
    let (output, _, errors) = run("int x = 1; x = 2.5; print(x);");

    // The bad assignment is a no-op, the old value survives
    assert_eq!(output, "1\n");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].error,
        RuntimeErrorType::AssignTypeMismatch { .. }
    ));
}

#[test]
fn test_redeclaration_overwrites() {
    assert_eq!(output("int x = 1; float x = 2.5; print(x);"), "2.5\n");
}

#[test]
fn test_if_elif_else() {
    let src = "int x = 2; \
        if (x == 1) { print(1); } \
        elif (x == 2) { print(2); } \
        else { print(3); }";

    assert_eq!(output(src), "2\n");
}

#[test]
fn test_else_branch() {
    assert_eq!(
        output("if (1 > 2) { print(1); } else { print(0); }"),
        "0\n"
    );
}

#[test]
fn test_for_loop() {
    assert_eq!(
        output("for (int i = 0; i < 3; i = i + 1) { print(i); }"),
        "0\n1\n2\n"
    );
}

#[test]
fn test_for_loop_with_rejected_initializer_is_skipped() {
    let (output, _, errors) = run("for (int i = 0.5; i < 3; i = i + 1) { print(i); }");

    assert_eq!(output, "");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].error,
        RuntimeErrorType::FloatToIntDeclaration { .. }
    ));
}

#[test]
fn test_while_loop() {
    assert_eq!(
        output("int x = 3; while (x > 0) { x = x - 1; } print(x);"),
        "0\n"
    );
}

#[test]
fn test_non_boolean_condition_is_false() {
    let (output, _, errors) = run("if (1) { print(1); }");

    assert_eq!(output, "");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].error,
        RuntimeErrorType::ConditionNotBoolean { .. }
    ));
}

#[test]
fn test_operand_mismatch_yields_default() {
    let (output, _, errors) = run("print(1 + \"a\");");

    assert_eq!(output, "0\n");
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0].error,
        RuntimeErrorType::OperandTypeMismatch { .. }
    ));
}

#[test]
fn test_tac_for_nested_expression() {
    assert_eq!(tac("int x = 1 + 2 * 3;"), vec!["t1 = 2 * 3", "t2 = 1 + t1"]);
}

#[test]
fn test_tac_unary() {
    assert_eq!(tac("int y = -5;"), vec!["t1 = - 5"]);
}

#[test]
fn test_tac_uses_variable_names() {
    assert_eq!(tac("int x = 2; int y = x ^ 2;"), vec!["t1 = x ^ 2"]);
}

#[test]
fn test_tac_string_literals_are_quoted() {
    assert_eq!(
        tac("string s = \"a\" + \"b\";"),
        vec!["t1 = \"a\" + \"b\""]
    );
}

#[test]
fn test_temp_counter_spans_statements() {
    assert_eq!(
        tac("print(1 + 2); print(3 + 4);"),
        vec!["t1 = 1 + 2", "t2 = 3 + 4"]
    );
}

#[test]
fn test_loop_bodies_emit_every_iteration() {
    assert_eq!(
        tac("for (int i = 0; i < 2; i = i + 1) { print(i * 10); }"),
        vec![
            "t1 = i < 2",
            "t2 = i * 10",
            "t3 = i + 1",
            "t4 = i < 2",
            "t5 = i * 10",
            "t6 = i + 1",
            "t7 = i < 2",
        ]
    );
}
