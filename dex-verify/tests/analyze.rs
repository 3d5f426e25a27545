mod common;

use common::*;
use dex_verify::prelude::*;
use dex_verify::RegisterType;

#[test]
fn trivial_identity() {
    let classpath = test_classpath();
    let method = static_method(&["I"], "I", 1, vec![op::return_value(0)]);

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    assert_eq!(analysis.len(), 1);
    assert_eq!(analysis.pre_types(0)[0], RegisterType::Integer);
}

#[test]
fn object_construction_promotes_the_allocation() {
    let classpath = test_classpath();
    let method = static_method(
        &[],
        "V",
        1,
        vec![
            op::new_instance(0, d("Ljava/lang/Object;")),
            op::invoke_direct(vec![0], object_init()),
            op::return_void(),
        ],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    assert_eq!(
        analysis.post_types(0)[0],
        RegisterType::UninitRef {
            class: d("Ljava/lang/Object;"),
            site: Some(0),
        }
    );
    assert_eq!(
        analysis.post_types(1)[0],
        RegisterType::Reference(d("Ljava/lang/Object;"))
    );
}

#[test]
fn constructor_must_chain_to_the_superclass_init() {
    let classpath = test_classpath();
    let method = constructor(1, vec![op::return_void()]);

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("returning with an uninitialized this");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("without calling the superclass' <init>"),
        "unexpected message: {message}"
    );
}

#[test]
fn constructor_chaining_initializes_this() {
    let classpath = test_classpath();
    let method = constructor(
        1,
        vec![op::invoke_direct(vec![0], object_init()), op::return_void()],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    assert_eq!(
        analysis.post_types(0)[0],
        RegisterType::Reference(d("Lcom/example/Widget;"))
    );
}

#[test]
fn branch_join_finds_the_common_superclass() {
    let classpath = test_classpath();
    let list_a = FieldRef::new(d("Lcom/example/Holder;"), "a", d("Ljava/util/ArrayList;"));
    let list_b = FieldRef::new(d("Lcom/example/Holder;"), "b", d("Ljava/util/LinkedList;"));
    let method = static_method(
        &["I"],
        "V",
        2,
        vec![
            op::if_eqz(1, 5),
            op::sget_object(0, list_a),
            op::goto(3),
            op::sget_object(0, list_b),
            op::return_void(),
        ],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    assert_eq!(
        analysis.pre_types(4)[0],
        RegisterType::Reference(d("Ljava/util/AbstractList;"))
    );
}

#[test]
fn clobbered_wide_pair_is_rejected() {
    let classpath = test_classpath();
    let method = static_method(
        &["J"],
        "J",
        4,
        vec![
            op::move_wide(0, 2),
            op::const4(1, 0),
            op::return_wide(0),
        ],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("the high half was clobbered");
    let (address, message) = validation_error(error);

    assert_eq!(address, 2);
    assert!(
        message.contains("not a valid wide register pair"),
        "unexpected message: {message}"
    );
}

#[test]
fn loop_widens_the_counter_to_integer() {
    let classpath = test_classpath();
    let method = static_method(
        &[],
        "I",
        1,
        vec![
            op::const4(0, 0),
            op::add_int_lit8(0, 0, 1),
            op::if_lez(0, -2),
            op::return_value(0),
        ],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    assert_eq!(analysis.pre_types(1)[0], RegisterType::Integer);
    assert_eq!(analysis.pre_types(3)[0], RegisterType::Integer);
}

#[test]
fn move_result_reads_the_invoked_return_type() {
    let classpath = test_classpath();
    let factory = MethodRef::new(
        d("Lcom/example/Holder;"),
        "create",
        proto(&[], "Ljava/lang/String;"),
    );
    let method = static_method(
        &[],
        "Ljava/lang/String;",
        1,
        vec![
            op::invoke_static(vec![], factory),
            op::move_result_object(0),
            op::return_object(0),
        ],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    assert_eq!(
        analysis.post_types(1)[0],
        RegisterType::Reference(d("Ljava/lang/String;"))
    );
}

#[test]
fn move_result_requires_a_result_setter() {
    let classpath = test_classpath();
    let method = static_method(
        &[],
        "V",
        1,
        vec![op::nop(), op::move_result(0), op::return_void()],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("nop stores no result");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("must immediately follow"),
        "unexpected message: {message}"
    );
}

#[test]
fn analysis_is_idempotent() {
    let classpath = test_classpath();
    let method = static_method(
        &[],
        "I",
        1,
        vec![
            op::const4(0, 0),
            op::add_int_lit8(0, 0, 1),
            op::if_lez(0, -2),
            op::return_value(0),
        ],
    );

    let first = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");
    let second = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    for index in 0..first.len() {
        assert_eq!(first.pre_types(index), second.pre_types(index));
        assert_eq!(first.post_types(index), second.post_types(index));
    }
}

#[test]
fn wide_pairs_stay_consistent_in_post_maps() {
    let classpath = test_classpath();
    let method = static_method(
        &["J", "D"],
        "J",
        6,
        vec![
            op::move_wide(0, 2),
            op::add_long_2addr(0, 2),
            op::return_wide(0),
        ],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    for index in 0..analysis.len() {
        let post = analysis.post_types(index);
        for register in 0..post.len() {
            if post[register] == RegisterType::LongLo {
                assert_eq!(post[register + 1], RegisterType::LongHi, "at {index}/{register}");
            }
            if post[register] == RegisterType::DoubleLo {
                assert_eq!(post[register + 1], RegisterType::DoubleHi, "at {index}/{register}");
            }
        }
    }
}
