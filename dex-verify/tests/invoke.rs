mod common;

use common::*;
use dex_verify::prelude::*;
use dex_verify::RegisterType;

#[test]
fn argument_count_must_match_the_prototype() {
    let classpath = test_classpath();
    let callee = MethodRef::new(d("Lcom/example/Point;"), "scale", proto(&["I"], "V"));
    let method = static_method(
        &["Lcom/example/Point;"],
        "V",
        1,
        vec![op::invoke_virtual(vec![0], callee), op::return_void()],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("one register cannot carry this and an int");
    let (_, message) = validation_error(error);

    assert!(message.contains("passes 1 registers"), "unexpected message: {message}");
}

#[test]
fn invoke_virtual_rejects_interface_classes() {
    let classpath = test_classpath();
    let callee = MethodRef::new(d("Ljava/util/List;"), "clear", proto(&[], "V"));
    let method = static_method(
        &["Ljava/util/ArrayList;"],
        "V",
        1,
        vec![op::invoke_virtual(vec![0], callee), op::return_void()],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("List is an interface");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("on interface class"),
        "unexpected message: {message}"
    );
}

#[test]
fn invoke_interface_accepts_interface_classes() {
    let classpath = test_classpath();
    let callee = MethodRef::new(d("Ljava/util/List;"), "clear", proto(&[], "V"));
    let method = static_method(
        &["Ljava/util/ArrayList;"],
        "V",
        1,
        vec![op::invoke_interface(vec![0], callee), op::return_void()],
    );

    MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("ArrayList implements List");
}

#[test]
fn uninitialized_receivers_only_reach_init() {
    let classpath = test_classpath();
    let callee = MethodRef::new(d("Lcom/example/Widget;"), "run", proto(&[], "V"));
    let method = static_method(
        &[],
        "V",
        1,
        vec![
            op::new_instance(0, d("Lcom/example/Widget;")),
            op::invoke_virtual(vec![0], callee),
            op::return_void(),
        ],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("the allocation was never initialized");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("uninitialized register v0"),
        "unexpected message: {message}"
    );
}

#[test]
fn init_promotes_every_alias_of_the_allocation() {
    let classpath = test_classpath();
    let widget_init = MethodRef::new(d("Lcom/example/Widget;"), "<init>", proto(&[], "V"));
    let callee = MethodRef::new(d("Lcom/example/Widget;"), "run", proto(&[], "V"));
    let method = static_method(
        &[],
        "V",
        2,
        vec![
            op::new_instance(0, d("Lcom/example/Widget;")),
            op::move_object(1, 0),
            op::invoke_direct(vec![0], widget_init),
            op::invoke_virtual(vec![1], callee),
            op::return_void(),
        ],
    );

    let analysis = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("both aliases are initialized by the single <init>");

    assert_eq!(
        analysis.post_types(2)[0],
        RegisterType::Reference(d("Lcom/example/Widget;"))
    );
    assert_eq!(
        analysis.post_types(2)[1],
        RegisterType::Reference(d("Lcom/example/Widget;"))
    );
}

#[test]
fn special_names_require_invoke_direct() {
    let classpath = test_classpath();
    let callee = MethodRef::new(d("Lcom/example/Widget;"), "<clinit>", proto(&[], "V"));
    let method = static_method(
        &[],
        "V",
        1,
        vec![op::invoke_static(vec![], callee), op::return_void()],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("<clinit> is not directly callable");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("only invoke-direct may call"),
        "unexpected message: {message}"
    );
}

#[test]
fn invoke_super_requires_a_virtual_method_on_the_superclass() {
    let mut classpath = test_classpath();
    classpath.define(
        ClassDef::new(d("Lcom/example/Base;")).with_virtual_method("frob", proto(&[], "V")),
    );
    classpath.define(ClassDef::new(d("Lcom/example/Derived;")).extends(d("Lcom/example/Base;")));

    let frob = MethodRef::new(d("Lcom/example/Base;"), "frob", proto(&[], "V"));
    let missing = MethodRef::new(d("Lcom/example/Base;"), "twiddle", proto(&[], "V"));

    let make = |callee: MethodRef| {
        Method::new(
            AccessFlags::PUBLIC,
            d("Lcom/example/Derived;"),
            "frob",
            proto(&[], "V"),
            Some(CodeItem::new(
                1,
                vec![op::invoke_super(vec![0], callee), op::return_void()],
            )),
        )
    };

    MethodAnalyzer::new(&classpath, &make(frob))
        .expect("method has code")
        .analyze()
        .expect("Base exposes frob virtually");

    let error = MethodAnalyzer::new(&classpath, &make(missing))
        .expect("method has code")
        .analyze()
        .expect_err("Base has no twiddle");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("no virtual method"),
        "unexpected message: {message}"
    );
}

#[test]
fn wide_arguments_use_consecutive_register_pairs() {
    let classpath = test_classpath();
    let callee = MethodRef::new(d("Lcom/example/Holder;"), "store", proto(&["J"], "V"));
    let method = static_method(
        &["J"],
        "V",
        2,
        vec![op::invoke_static(vec![0, 1], callee), op::return_void()],
    );

    MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect("v0/v1 carry the long pair");
}

#[test]
fn parameters_must_be_assignable() {
    let classpath = test_classpath();
    let callee = MethodRef::new(
        d("Lcom/example/Holder;"),
        "keep",
        proto(&["Ljava/util/AbstractList;"], "V"),
    );
    let method = static_method(
        &["Ljava/lang/String;"],
        "V",
        1,
        vec![op::invoke_static(vec![0], callee), op::return_void()],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("String is not an AbstractList");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("not assignable to the parameter type"),
        "unexpected message: {message}"
    );
}

#[test]
fn repeated_allocation_without_init_is_rejected() {
    let classpath = test_classpath();
    let method = static_method(
        &["I"],
        "V",
        2,
        vec![
            op::new_instance(0, d("Lcom/example/Widget;")),
            op::if_eqz(1, -2),
            op::return_void(),
        ],
    );

    let error = MethodAnalyzer::new(&classpath, &method)
        .expect("method has code")
        .analyze()
        .expect_err("the loop re-enters new-instance with a live allocation");
    let (_, message) = validation_error(error);

    assert!(
        message.contains("uninitialized allocation"),
        "unexpected message: {message}"
    );
}
