mod common;

use common::*;
use dex_verify::prelude::*;
use dex_verify::RegisterType;

#[test]
fn aget_wide_needs_a_wide_element_type() {
    let classpath = test_classpath();
    let method = static_method(
        &[],
        "V",
        4,
        vec![
            op::const4(0, 0),
            op::new_array(1, 0, d("[I")),
            op::aget_wide(2, 1, 0),
            op::return_void(),
        ],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("int arrays have no wide elements");
    let (address, message) = validation_error(error);

    assert_eq!(address, 3);
    assert!(
        message.contains("Cannot use aget-wide with array type [I"),
        "unexpected message: {message}"
    );
}

#[test]
fn aget_object_on_null_produces_null() {
    let classpath = test_classpath();
    let method = static_method(
        &[],
        "V",
        2,
        vec![
            op::const4(0, 0),
            op::aget_object(1, 0, 0),
            op::return_void(),
        ],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    assert_eq!(analysis.post_types(1)[1], RegisterType::Null);
}

#[test]
fn aget_object_unwraps_one_array_level() {
    let classpath = test_classpath();
    let field = FieldRef::new(d("Lcom/example/Holder;"), "grid", d("[[I"));
    let method = static_method(
        &[],
        "V",
        3,
        vec![
            op::const4(0, 0),
            op::sget_object(1, field),
            op::aget_object(2, 1, 0),
            op::return_void(),
        ],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    assert_eq!(
        analysis.post_types(2)[2],
        RegisterType::Reference(d("[I"))
    );
}

#[test]
fn array_length_requires_an_array() {
    let classpath = test_classpath();
    let method = static_method(
        &["Ljava/lang/String;"],
        "V",
        2,
        vec![op::array_length(0, 1), op::return_void()],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("strings are not arrays");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("array-length on non-array type"),
        "unexpected message: {message}"
    );
}

#[test]
fn filled_new_array_checks_element_assignability() {
    let classpath = test_classpath();
    let method = static_method(
        &["Ljava/lang/String;", "I"],
        "V",
        3,
        vec![
            op::filled_new_array(vec![1, 2], d("[Ljava/lang/Object;")),
            op::move_result_object(0),
            op::return_void(),
        ],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("an int is not an Object");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("not assignable to the element type"),
        "unexpected message: {message}"
    );
}

#[test]
fn filled_new_array_feeds_move_result_object() {
    let classpath = test_classpath();
    let method = static_method(
        &["I", "I"],
        "V",
        3,
        vec![
            op::filled_new_array(vec![1, 2], d("[I")),
            op::move_result_object(0),
            op::return_void(),
        ],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    assert_eq!(analysis.post_types(1)[0], RegisterType::Reference(d("[I")));
}

#[test]
fn filled_new_array_rejects_wide_elements() {
    let classpath = test_classpath();
    let method = static_method(
        &["J"],
        "V",
        3,
        vec![
            op::filled_new_array(vec![1, 2], d("[J")),
            op::return_void(),
        ],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("wide elements are not allowed");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("cannot hold wide elements"),
        "unexpected message: {message}"
    );
}

#[test]
fn fill_array_data_checks_the_element_width() {
    let classpath = test_classpath();
    let method = static_method(
        &[],
        "V",
        2,
        vec![
            op::const4(0, 2),
            op::new_array(1, 0, d("[I")),
            op::fill_array_data(1, 4),
            op::return_void(),
            op::array_payload(2, 3),
        ],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("2-byte elements cannot fill an int array");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("cannot fill [I"),
        "unexpected message: {message}"
    );
}

#[test]
fn fill_array_data_accepts_matching_widths() {
    let classpath = test_classpath();
    let method = static_method(
        &[],
        "V",
        2,
        vec![
            op::const4(0, 2),
            op::new_array(1, 0, d("[I")),
            op::fill_array_data(1, 4),
            op::return_void(),
            op::array_payload(4, 2),
        ],
    );

    MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("4-byte elements fill an int array");
}

#[test]
fn aput_rejects_mismatched_element_types() {
    let classpath = test_classpath();
    let method = static_method(
        &["I"],
        "V",
        3,
        vec![
            op::const4(0, 1),
            op::new_array(1, 0, d("[Z")),
            op::aput(2, 1, 0),
            op::return_void(),
        ],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("aput stores ints, not booleans");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("Cannot use aput with array type [Z"),
        "unexpected message: {message}"
    );
}

#[test]
fn aput_boolean_accepts_boolean_values() {
    let classpath = test_classpath();
    let method = static_method(
        &[],
        "V",
        3,
        vec![
            op::const4(0, 1),
            op::new_array(1, 0, d("[Z")),
            op::aput_boolean(0, 1, 0),
            op::return_void(),
        ],
    );

    MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("the literal one is a boolean value");
}
