mod common;

use common::*;
use dex_verify::prelude::*;
use dex_verify::RegisterType;

#[test]
fn falling_off_the_last_instruction_is_malformed() {
    let classpath = test_classpath();
    let method = static_method(&[], "V", 1, vec![op::const4(0, 0)]);

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("const/4 continues past the end");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("past the last instruction"),
        "unexpected message: {message}"
    );
}

#[test]
fn move_exception_rejects_normal_control_flow() {
    let classpath = test_classpath();
    let method = static_method(
        &[],
        "V",
        1,
        vec![op::nop(), op::move_exception(0), op::return_void()],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("nop falls through into move-exception");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("first instruction of an exception handler"),
        "unexpected message: {message}"
    );
}

#[test]
fn handlers_receive_the_state_entering_the_throwing_instruction() {
    let classpath = test_classpath();
    let field = FieldRef::new(d("Lcom/example/Holder;"), "a", d("Ljava/util/ArrayList;"));
    let method = with_tries(
        static_method(
            &[],
            "V",
            2,
            vec![
                op::sget_object(1, field),
                op::return_void(),
                op::move_exception(0),
                op::return_void(),
            ],
        ),
        vec![TryBlock::new(0, 2).with_handler(d("Lcom/example/Boom;"), 3)],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    // the handler is entered from the top of the method, before the sget
    // ever wrote v1
    assert!(analysis.is_entry_successor(2));
    assert_eq!(analysis.pre_types(2)[1], RegisterType::Unknown);
    assert_eq!(
        analysis.post_types(2)[0],
        RegisterType::Reference(d("Lcom/example/Boom;"))
    );
}

#[test]
fn every_throwing_edge_reaches_the_covering_handler() {
    let classpath = test_classpath();
    let field_a = FieldRef::new(d("Lcom/example/Holder;"), "a", d("Ljava/util/ArrayList;"));
    let field_b = FieldRef::new(d("Lcom/example/Holder;"), "b", d("Ljava/util/LinkedList;"));
    let method = with_tries(
        static_method(
            &[],
            "V",
            2,
            vec![
                op::sget_object(1, field_a),
                op::sget_object(1, field_b),
                op::return_void(),
                op::move_exception(0),
                op::return_void(),
            ],
        ),
        vec![TryBlock::new(0, 4).with_handler(d("Lcom/example/Boom;"), 5)],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    // each predecessor of a covered throwing instruction also branches to
    // the handler: instruction 0 precedes throwing instruction 1
    let successors: Vec<_> = analysis.successors(0).collect();
    assert!(successors.contains(&1));
    assert!(successors.contains(&3), "successors of 0: {successors:?}");

    // the handler merges the states entering both throwing instructions,
    // so v1 holds the first field's type on the edge from instruction 0
    assert_eq!(
        analysis.pre_types(3)[1],
        RegisterType::Reference(d("Ljava/util/ArrayList;"))
    );
}

#[test]
fn catch_all_and_typed_handlers_merge_at_the_same_address() {
    let classpath = test_classpath();
    let field = FieldRef::new(d("Lcom/example/Holder;"), "a", d("Ljava/util/ArrayList;"));
    let method = with_tries(
        static_method(
            &[],
            "V",
            2,
            vec![
                op::sget_object(1, field),
                op::return_void(),
                op::move_exception(0),
                op::return_void(),
            ],
        ),
        vec![TryBlock::new(0, 2)
            .with_handler(d("Lcom/example/Boom;"), 3)
            .with_catch_all(3)],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    // the Boom and Throwable clauses widen to Throwable
    assert_eq!(
        analysis.post_types(2)[0],
        RegisterType::Reference(d("Ljava/lang/Throwable;"))
    );
}

#[test]
fn switch_edges_follow_the_payload_targets() {
    let classpath = test_classpath();
    let method = static_method(
        &["I"],
        "V",
        1,
        vec![
            op::packed_switch(0, 4),
            op::return_void(),
            op::packed_switch_payload(0, vec![3]),
        ],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    let successors: Vec<_> = analysis.successors(0).collect();
    assert_eq!(successors, vec![1]);
}

#[test]
fn switch_payload_kinds_must_match() {
    let classpath = test_classpath();
    let method = static_method(
        &["I"],
        "V",
        1,
        vec![
            op::sparse_switch(0, 4),
            op::return_void(),
            op::packed_switch_payload(0, vec![3]),
        ],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("sparse-switch over a packed payload");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("matching switch payload"),
        "unexpected message: {message}"
    );
}

#[test]
fn branches_must_land_on_instruction_boundaries() {
    let classpath = test_classpath();
    let method = static_method(
        &["I"],
        "V",
        1,
        vec![op::if_eqz(0, 1), op::return_void()],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("target splits the if instruction");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("not an instruction boundary"),
        "unexpected message: {message}"
    );
}
