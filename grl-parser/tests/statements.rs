// Statement parsing tests
// Statement forms, separators, blocks, and whole-program rejection

use grl_parser::{ast::*, parse_program, ParseError};

fn parse(input: &str) -> Program {
    parse_program(input).unwrap()
}

fn single_statement(input: &str) -> StatementKind {
    let mut program = parse(input);
    assert_eq!(program.statements.len(), 1, "in: {}", input);
    program.statements.remove(0).kind
}

#[test]
fn test_semicolons_and_newlines_both_separate() {
    assert_eq!(parse("PRINT 1; PRINT 2").statements.len(), 2);
    assert_eq!(parse("PRINT 1\nPRINT 2").statements.len(), 2);
    assert_eq!(parse("PRINT 1\r\nPRINT 2").statements.len(), 2);
}

#[test]
fn test_empty_statements_are_allowed() {
    assert_eq!(parse("").statements.len(), 0);
    assert_eq!(parse(";;;").statements.len(), 0);
    assert_eq!(parse("\n\nPRINT 1\n\n").statements.len(), 1);
}

#[test]
fn test_add_statements() {
    match single_statement("ADD GRAPH g") {
        StatementKind::Add(Entity::Graph(GraphKind::Graph), name) => assert_eq!(name.name, "g"),
        other => panic!("Expected ADD GRAPH, got: {:?}", other),
    }
    match single_statement("ADD DIGRAPH g") {
        StatementKind::Add(Entity::Graph(GraphKind::Digraph), _) => {}
        other => panic!("Expected ADD DIGRAPH, got: {:?}", other),
    }
    match single_statement("ADD NODE \"a\" g") {
        StatementKind::Add(Entity::Node(node), _) => {
            assert_eq!(node.kind, NodeRefKind::Literal("a".to_string()));
        }
        other => panic!("Expected ADD NODE, got: {:?}", other),
    }
    match single_statement("ADD EDGE \"a\" source g") {
        StatementKind::Add(Entity::Edge(edge), _) => {
            assert_eq!(edge.source.kind, NodeRefKind::Literal("a".to_string()));
            assert_eq!(edge.target.kind, NodeRefKind::Variable("source".to_string()));
        }
        other => panic!("Expected ADD EDGE, got: {:?}", other),
    }
}

#[test]
fn test_rm_statements() {
    assert!(matches!(
        single_statement("RM GRAPH g"),
        StatementKind::Remove(Entity::Graph(GraphKind::Graph), _)
    ));
    assert!(matches!(
        single_statement("RM NODE \"a\" g"),
        StatementKind::Remove(Entity::Node(_), _)
    ));
    assert!(matches!(
        single_statement("RM EDGE \"a\" \"b\" g"),
        StatementKind::Remove(Entity::Edge(_), _)
    ));
}

#[test]
fn test_set_weight_statement() {
    match single_statement("SET WEIGHT OF EDGE \"a\" \"b\" 5 g") {
        StatementKind::SetWeight { edge, weight, graph } => {
            assert_eq!(edge.source.kind, NodeRefKind::Literal("a".to_string()));
            assert!(matches!(weight.kind, ExpressionKind::Number(n) if n == 5.0));
            assert_eq!(graph.name, "g");
        }
        other => panic!("Expected SET WEIGHT, got: {:?}", other),
    }

    // A negative weight is one literal
    match single_statement("SET WEIGHT OF EDGE \"a\" \"b\" -2 g") {
        StatementKind::SetWeight { weight, .. } => {
            assert!(matches!(weight.kind, ExpressionKind::Number(n) if n == -2.0));
        }
        other => panic!("Expected SET WEIGHT, got: {:?}", other),
    }
}

#[test]
fn test_set_statement_binds_any_expression() {
    match single_statement("SET x 1 + 2") {
        StatementKind::Set { name, value } => {
            assert_eq!(name.name, "x");
            assert!(matches!(value.kind, ExpressionKind::BinaryOp(_)));
        }
        other => panic!("Expected SET, got: {:?}", other),
    }
    // SET id id copies another binding
    match single_statement("SET y x") {
        StatementKind::Set { value, .. } => {
            assert!(matches!(value.kind, ExpressionKind::Identifier(_)));
        }
        other => panic!("Expected SET, got: {:?}", other),
    }
}

#[test]
fn test_if_elseif_else_structure() {
    let source = "IF a { PRINT 1 } ELSEIF b { PRINT 2 } ELSEIF c { PRINT 3 } ELSE { PRINT 4 }";
    match single_statement(source) {
        StatementKind::If(if_statement) => {
            assert_eq!(if_statement.then_block.statements.len(), 1);
            assert_eq!(if_statement.elseif_clauses.len(), 2);
            assert!(if_statement.else_block.is_some());
        }
        other => panic!("Expected IF, got: {:?}", other),
    }

    match single_statement("IF a { }") {
        StatementKind::If(if_statement) => {
            assert!(if_statement.then_block.statements.is_empty());
            assert!(if_statement.elseif_clauses.is_empty());
            assert!(if_statement.else_block.is_none());
        }
        other => panic!("Expected IF, got: {:?}", other),
    }
}

#[test]
fn test_blocks_may_span_lines() {
    let source = "IF a {\n  PRINT 1\n  PRINT 2;\n}";
    match single_statement(source) {
        StatementKind::If(if_statement) => {
            assert_eq!(if_statement.then_block.statements.len(), 2);
        }
        other => panic!("Expected IF, got: {:?}", other),
    }
}

#[test]
fn test_nested_control_flow() {
    let source = "FOR n OF NODES g { IF n == \"a\" { PRINT n } }";
    match single_statement(source) {
        StatementKind::For(for_statement) => {
            assert_eq!(for_statement.variables.len(), 1);
            assert!(matches!(
                for_statement.body.statements[0].kind,
                StatementKind::If(_)
            ));
        }
        other => panic!("Expected FOR, got: {:?}", other),
    }
}

#[test]
fn test_simple_statements() {
    assert!(matches!(single_statement("EXIT"), StatementKind::Exit));
    assert!(matches!(
        single_statement("PRINT x"),
        StatementKind::Print(_)
    ));
    assert!(matches!(
        single_statement("RUN \"script.grl\""),
        StatementKind::Run(_)
    ));
    assert!(matches!(single_statement("DRAW g"), StatementKind::Draw(_)));
    assert!(matches!(
        single_statement("IMPORT g \"saved\""),
        StatementKind::Import { .. }
    ));
    assert!(matches!(
        single_statement("EXPORT g \"saved\""),
        StatementKind::Export { .. }
    ));
}

#[test]
fn test_keywords_are_not_split_inside_longer_words() {
    // NODES must never lex as NODE + S; a loop over NODES still parses
    let program = parse("FOR n OF NODES g { }");
    assert_eq!(program.statements.len(), 1);

    // Lowercase identifiers may embed keyword spellings
    match single_statement("SET nodes 1") {
        StatementKind::Set { name, .. } => assert_eq!(name.name, "nodes"),
        other => panic!("Expected SET, got: {:?}", other),
    }
}

#[test]
fn test_whole_program_is_rejected_on_any_bad_statement() {
    assert!(parse_program("PRINT 1\nPRINT\nPRINT 3").is_err());
    assert!(matches!(
        parse_program("ADD GRAPH"),
        Err(ParseError::Syntax { .. })
    ));
}

#[test]
fn test_multi_word_keywords_span_spaces_only() {
    assert!(parse_program("SET WEIGHT OF EDGE \"a\" \"b\" 1 g").is_ok());
    assert!(parse_program("FOR n OF TOPOLOGICAL  SORT g { }").is_ok());
    // A newline may not split a multi-word keyword
    assert!(parse_program("FOR n OF TOPOLOGICAL\nSORT g { }").is_err());
}
