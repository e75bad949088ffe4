//! End-to-end scenarios (§8): parse a formula in the concrete syntax and check the solver's
//! verdict and, where relevant, the shape of the model it reports.

use vericore::api::solve_sat;
use vericore::api::solve_smt;
use vericore::api::Status;
use vericore::error::Error;
use vericore::interner::Interner;
use vericore::parser::parse_first_order;
use vericore::parser::parse_propositional;

#[test]
fn unsat_over_an_iff_and_its_negation() {
    let mut interner = Interner::new();
    let formula = parse_propositional("((p & ~q) & (p <-> q))", &mut interner).unwrap();
    let outcome = solve_sat(&formula, None, None, 10_000, &mut interner).unwrap();
    assert_eq!(outcome.status, Status::Unsat);
}

#[test]
fn sat_model_is_restricted_to_the_formulas_own_variables() {
    let mut interner = Interner::new();
    let formula = parse_propositional("(~p2 & (p2 | ((p1 <-> p3) -> p2)))", &mut interner).unwrap();
    let outcome = solve_sat(&formula, None, None, 10_000, &mut interner).unwrap();
    assert_eq!(outcome.status, Status::Sat);

    let p1 = interner.intern("p1");
    let p2 = interner.intern("p2");
    let p3 = interner.intern("p3");
    assert_eq!(outcome.model.len(), 3);
    assert_eq!(outcome.model.get(p2), Some(false));
    assert_ne!(outcome.model.get(p1), outcome.model.get(p3));
}

#[test]
fn sat_formula_satisfies_every_unit_and_binary_clause() {
    let mut interner = Interner::new();
    let source = "(x1 & ((~x1 | x2) & ((~x3 | x4) & ((~x5 | ~x6) & ((~x1 | (~x5 | x7)) & \
                  ((~x2 | ~x5) | (x6 | ~x7)))))))";
    let formula = parse_propositional(source, &mut interner).unwrap();
    let outcome = solve_sat(&formula, None, None, 10_000, &mut interner).unwrap();
    assert_eq!(outcome.status, Status::Sat);

    let model = &outcome.model;
    let x1 = interner.intern("x1");
    let x2 = interner.intern("x2");
    let x3 = interner.intern("x3");
    let x4 = interner.intern("x4");
    let x5 = interner.intern("x5");

    assert_eq!(model.get(x1), Some(true));
    assert_eq!(model.get(x2), Some(true));
    assert_eq!(model.get(x5), Some(false));
    assert!(model.get(x4) == Some(true) || model.get(x3) == Some(false));
}

#[test]
fn t_uf_sat_over_a_disjunction_of_equalities() {
    let mut interner = Interner::new();
    let formula = parse_first_order("((f(a,c)=b | f(a,g(b))=b) & ~c=g(b))", &mut interner).unwrap();
    let outcome = solve_smt(&formula, 10_000, &mut interner).unwrap();
    assert_eq!(outcome.status, Status::Sat);
}

#[test]
fn t_uf_unsat_when_congruence_forces_a_cycle_back_to_the_start() {
    let mut interner = Interner::new();
    let formula =
        parse_first_order("(f(f(f(a)))=a & (f(f(f(f(f(a)))))=a & ~f(a)=a))", &mut interner).unwrap();
    let outcome = solve_smt(&formula, 10_000, &mut interner).unwrap();
    assert_eq!(outcome.status, Status::Unsat);
}

#[test]
fn t_uf_unsat_when_a_false_equality_contradicts_congruence() {
    let mut interner = Interner::new();
    let formula = parse_first_order(
        "(g(a)=c & ((~f(g(a))=f(c) | g(a)=d) & ~c=d))",
        &mut interner,
    )
    .unwrap();
    let outcome = solve_smt(&formula, 10_000, &mut interner).unwrap();
    assert_eq!(outcome.status, Status::Unsat);
}

#[test]
fn quantified_formula_is_rejected_before_any_solving_work() {
    let mut interner = Interner::new();
    let formula = parse_first_order("A[u](u=u)", &mut interner).unwrap();
    let result = solve_smt(&formula, 10_000, &mut interner);
    assert!(matches!(result, Err(Error::UnsupportedFragment(_))));
}

#[test]
fn malformed_propositional_syntax_is_a_parse_error() {
    let mut interner = Interner::new();
    let result = parse_propositional("(p & )", &mut interner);
    assert!(matches!(result, Err(Error::Parse { .. })));
}

#[test]
fn exhausted_is_a_distinct_error_variant_from_parse_and_unsupported_fragment() {
    let error = Error::Exhausted {
        partial_model: vericore::basic_types::Model::new(),
        resumed_formula: vericore::formula::prop::PropFormula::Const(true),
    };
    assert_eq!(error.to_string(), "decision depth cap reached without a verdict");
}
