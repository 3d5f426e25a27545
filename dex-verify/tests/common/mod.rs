#![allow(dead_code)]

use dex_verify::prelude::*;

/// Parse a descriptor that is known to be well-formed.
pub fn d(raw: &str) -> TypeDescriptor {
    raw.parse().expect("well-formed descriptor")
}

pub fn proto(parameters: &[&str], return_type: &str) -> Prototype {
    Prototype::new(parameters.iter().map(|p| d(p)).collect(), d(return_type))
}

/// A class path with the fixtures the integration tests share: a small
/// collections hierarchy, a throwable and a few plain classes.
pub fn test_classpath() -> ClassPath {
    let mut classpath = ClassPath::new();
    classpath.define(ClassDef::new(d("Ljava/util/List;")).interface());
    classpath.define(ClassDef::new(d("Ljava/util/AbstractList;")).implements(d("Ljava/util/List;")));
    classpath.define(ClassDef::new(d("Ljava/util/ArrayList;")).extends(d("Ljava/util/AbstractList;")));
    classpath.define(ClassDef::new(d("Ljava/util/LinkedList;")).extends(d("Ljava/util/AbstractList;")));
    classpath.define(ClassDef::new(d("Lcom/example/Holder;")));
    classpath.define(ClassDef::new(d("Lcom/example/Point;")));
    classpath.define(ClassDef::new(d("Lcom/example/Widget;")));
    classpath.define(ClassDef::new(d("Lcom/example/Boom;")).extends(d("Ljava/lang/Throwable;")));
    classpath
}

pub fn method(
    access_flags: AccessFlags,
    name: &str,
    parameters: &[&str],
    return_type: &str,
    register_count: u16,
    instructions: Vec<Instruction>,
) -> Method {
    Method::new(
        access_flags,
        d("Lcom/example/Widget;"),
        name,
        proto(parameters, return_type),
        Some(CodeItem::new(register_count, instructions)),
    )
}

pub fn static_method(
    parameters: &[&str],
    return_type: &str,
    register_count: u16,
    instructions: Vec<Instruction>,
) -> Method {
    method(
        AccessFlags::PUBLIC | AccessFlags::STATIC,
        "run",
        parameters,
        return_type,
        register_count,
        instructions,
    )
}

pub fn instance_method(
    parameters: &[&str],
    return_type: &str,
    register_count: u16,
    instructions: Vec<Instruction>,
) -> Method {
    method(
        AccessFlags::PUBLIC,
        "run",
        parameters,
        return_type,
        register_count,
        instructions,
    )
}

pub fn constructor(register_count: u16, instructions: Vec<Instruction>) -> Method {
    method(
        AccessFlags::PUBLIC | AccessFlags::CONSTRUCTOR,
        "<init>",
        &[],
        "V",
        register_count,
        instructions,
    )
}

/// Attach protected regions to a method's code item.
pub fn with_tries(mut method: Method, tries: Vec<TryBlock>) -> Method {
    let code = method.code.take().expect("method has code");
    method.code = Some(code.with_tries(tries));
    method
}

/// The message of a validation error, plus its address.
pub fn validation_error(error: VerifyError) -> (CodeAddress, String) {
    match error {
        VerifyError::Validation { address, message } => (address, message),
        other => panic!("expected a validation error, got: {other}"),
    }
}

/// The `<init>` reference of `java/lang/Object`.
pub fn object_init() -> MethodRef {
    MethodRef::new(d("Ljava/lang/Object;"), "<init>", proto(&[], "V"))
}
