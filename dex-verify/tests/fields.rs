mod common;

use common::*;
use dex_verify::prelude::*;
use dex_verify::RegisterType;

fn point_field(name: &str, field_type: &str) -> FieldRef {
    FieldRef::new(d("Lcom/example/Point;"), name, d(field_type))
}

#[test]
fn instance_get_produces_the_field_type() {
    let classpath = test_classpath();
    let method = static_method(
        &["Lcom/example/Point;"],
        "V",
        2,
        vec![op::iget(0, 1, point_field("x", "I")), op::return_void()],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    assert_eq!(analysis.post_types(0)[0], RegisterType::Integer);
}

#[test]
fn opcode_family_must_match_the_field_type() {
    let classpath = test_classpath();
    let method = static_method(
        &["Lcom/example/Point;"],
        "V",
        2,
        vec![
            op::iget_boolean(0, 1, point_field("x", "I")),
            op::return_void(),
        ],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("an int field is not a boolean field");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("Cannot use iget-boolean with field type I"),
        "unexpected message: {message}"
    );
}

#[test]
fn receivers_must_extend_the_declaring_class() {
    let classpath = test_classpath();
    let method = static_method(
        &["Ljava/lang/String;"],
        "V",
        2,
        vec![op::iget(0, 1, point_field("x", "I")), op::return_void()],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("strings have no Point fields");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("not compatible with Lcom/example/Point;"),
        "unexpected message: {message}"
    );
}

#[test]
fn byte_values_may_be_stored_into_boolean_fields() {
    let classpath = test_classpath();
    let method = static_method(
        &["Lcom/example/Point;"],
        "V",
        2,
        vec![
            op::const16(0, 100),
            op::iput_boolean(0, 1, point_field("flag", "Z")),
            op::return_void(),
        ],
    );

    MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("the byte range squeezes into a boolean field");
}

#[test]
fn short_values_do_not_fit_boolean_fields() {
    let classpath = test_classpath();
    let method = static_method(
        &["Lcom/example/Point;"],
        "V",
        2,
        vec![
            op::const16(0, 200),
            op::iput_boolean(0, 1, point_field("flag", "Z")),
            op::return_void(),
        ],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("200 does not fit the byte range");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("requires one of"),
        "unexpected message: {message}"
    );
}

#[test]
fn static_wide_get_writes_the_pair() {
    let classpath = test_classpath();
    let field = FieldRef::new(d("Lcom/example/Holder;"), "stamp", d("J"));
    let method = static_method(
        &[],
        "V",
        2,
        vec![op::sget_wide(0, field), op::return_void()],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("analysis succeeds");

    assert_eq!(analysis.post_types(0)[0], RegisterType::LongLo);
    assert_eq!(analysis.post_types(0)[1], RegisterType::LongHi);
}

#[test]
fn static_put_checks_assignability() {
    let classpath = test_classpath();
    let field = FieldRef::new(d("Lcom/example/Holder;"), "a", d("Ljava/util/ArrayList;"));
    let method = static_method(
        &["Ljava/lang/String;"],
        "V",
        1,
        vec![op::sput_object(0, field), op::return_void()],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("a String is not an ArrayList");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("cannot be stored into a field"),
        "unexpected message: {message}"
    );
}
