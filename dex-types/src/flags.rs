use bitflags::bitflags;

bitflags! {
    /// Dalvik access flags for classes, fields and methods.
    ///
    /// Flag values above 0x4000 are synthetic flags the runtime derives while
    /// loading; `CONSTRUCTOR` in particular marks `<init>`/`<clinit>`
    /// methods.
    pub struct AccessFlags: u32 {
        /// Visible everywhere.
        const PUBLIC = 0x1;
        /// Visible only to the defining class.
        const PRIVATE = 0x2;
        /// Visible to package and subclasses.
        const PROTECTED = 0x4;
        /// Per-class member, no `this` register.
        const STATIC = 0x8;
        /// Not overridable / not mutable.
        const FINAL = 0x10;
        /// Method locks `this`/class around its body.
        const SYNCHRONIZED = 0x20;
        /// Field: special access rules for concurrency (fields only).
        const VOLATILE = 0x40;
        /// Method: compiler-generated bridge (methods only).
        const BRIDGE = 0x40;
        /// Field: excluded from default serialization (fields only).
        const TRANSIENT = 0x80;
        /// Method: last argument is a rest-argument array (methods only).
        const VARARGS = 0x80;
        /// Implemented in native code.
        const NATIVE = 0x100;
        /// Class is an interface.
        const INTERFACE = 0x200;
        /// Not directly instantiable / not implemented.
        const ABSTRACT = 0x400;
        /// Strict floating-point arithmetic.
        const STRICT = 0x800;
        /// Not directly defined in source code.
        const SYNTHETIC = 0x1000;
        /// Class is an annotation type.
        const ANNOTATION = 0x2000;
        /// Class or field is an enum member.
        const ENUM = 0x4000;
        /// Method is an instance or static initializer.
        const CONSTRUCTOR = 0x10000;
        /// Method is declared `synchronized` (the runtime flag).
        const DECLARED_SYNCHRONIZED = 0x20000;
    }
}

impl AccessFlags {
    /// Whether the `STATIC` flag is set.
    pub const fn is_static(&self) -> bool {
        self.contains(Self::STATIC)
    }

    /// Whether the `CONSTRUCTOR` flag is set.
    pub const fn is_constructor(&self) -> bool {
        self.contains(Self::CONSTRUCTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_and_static_predicates() {
        let flags = AccessFlags::PUBLIC | AccessFlags::CONSTRUCTOR;

        assert!(flags.is_constructor());
        assert!(!flags.is_static());
        assert!((flags | AccessFlags::STATIC).is_static());
    }

    #[test]
    fn raw_bits_round_trip() {
        let flags = AccessFlags::from_bits_truncate(0x10008);

        assert_eq!(flags, AccessFlags::STATIC | AccessFlags::CONSTRUCTOR);
    }
}
