//! The class-hierarchy oracle.
//!
//! A [`ClassPath`] is populated with class definitions up front and is
//! read-only afterwards, so concurrent analyses can share one instance
//! behind a plain shared reference.

use std::sync::Arc;

use dex_asm::Prototype;
use dex_types::TypeDescriptor;
use hashbrown::HashMap;

use crate::error::VerifyError;

/// A registered class definition.
#[derive(Debug, Clone)]
pub struct ClassDef {
    descriptor: TypeDescriptor,
    superclass: Option<TypeDescriptor>,
    interfaces: Vec<TypeDescriptor>,
    interface: bool,
    virtual_methods: Vec<(Arc<str>, Prototype)>,
}

impl ClassDef {
    /// A class with no superclass recorded; [`ClassPath::define`] defaults
    /// the superclass to `java/lang/Object` for everything but Object
    /// itself.
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            superclass: None,
            interfaces: Vec::new(),
            interface: false,
            virtual_methods: Vec::new(),
        }
    }

    /// Set the direct superclass.
    pub fn extends(mut self, superclass: TypeDescriptor) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Mark the definition as an interface.
    pub fn interface(mut self) -> Self {
        self.interface = true;
        self
    }

    /// Add a directly implemented interface.
    pub fn implements(mut self, interface: TypeDescriptor) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Declare a virtual method on this class.
    pub fn with_virtual_method(mut self, name: impl AsRef<str>, proto: Prototype) -> Self {
        self.virtual_methods.push((Arc::from(name.as_ref()), proto));
        self
    }

    /// The descriptor this definition was registered under.
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }

    /// The direct superclass; `None` only for `java/lang/Object`.
    pub fn superclass(&self) -> Option<&TypeDescriptor> {
        self.superclass.as_ref()
    }

    /// Whether this definition is an interface.
    pub fn is_interface(&self) -> bool {
        self.interface
    }

    /// Directly implemented interfaces.
    pub fn interfaces(&self) -> &[TypeDescriptor] {
        &self.interfaces
    }

    /// Whether the class itself declares the given virtual method.
    pub fn declares_virtual_method(&self, name: &str, proto: &Prototype) -> bool {
        self.virtual_methods
            .iter()
            .any(|(n, p)| &**n == name && p == proto)
    }
}

/// The set of class definitions the verifier resolves descriptors against.
#[derive(Debug)]
pub struct ClassPath {
    classes: HashMap<TypeDescriptor, ClassDef>,
    object: TypeDescriptor,
    string: TypeDescriptor,
    class: TypeDescriptor,
    throwable: TypeDescriptor,
}

fn core_descriptor(raw: &str) -> TypeDescriptor {
    TypeDescriptor::new(raw).expect("well-formed core descriptor")
}

impl Default for ClassPath {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassPath {
    /// A class path pre-seeded with the core library classes the verifier
    /// itself refers to: `Object`, `String`, `Class` and `Throwable`.
    pub fn new() -> Self {
        let object = core_descriptor("Ljava/lang/Object;");
        let string = core_descriptor("Ljava/lang/String;");
        let class = core_descriptor("Ljava/lang/Class;");
        let throwable = core_descriptor("Ljava/lang/Throwable;");

        let mut path = Self {
            classes: HashMap::new(),
            object: object.clone(),
            string: string.clone(),
            class: class.clone(),
            throwable: throwable.clone(),
        };

        path.define(ClassDef::new(object));
        path.define(ClassDef::new(string));
        path.define(ClassDef::new(class));
        path.define(ClassDef::new(throwable));
        path
    }

    /// Register a class definition, defaulting its superclass to `Object`.
    pub fn define(&mut self, mut def: ClassDef) {
        if def.superclass.is_none() && def.descriptor != self.object {
            def.superclass = Some(self.object.clone());
        }
        self.classes.insert(def.descriptor.clone(), def);
    }

    /// `Ljava/lang/Object;`
    pub fn object(&self) -> &TypeDescriptor {
        &self.object
    }

    /// `Ljava/lang/String;`
    pub fn string(&self) -> &TypeDescriptor {
        &self.string
    }

    /// `Ljava/lang/Class;`
    pub fn class_type(&self) -> &TypeDescriptor {
        &self.class
    }

    /// `Ljava/lang/Throwable;`
    pub fn throwable(&self) -> &TypeDescriptor {
        &self.throwable
    }

    /// Look up the definition registered for a class descriptor.
    pub fn resolve(&self, descriptor: &TypeDescriptor) -> Result<&ClassDef, VerifyError> {
        self.classes
            .get(descriptor)
            .ok_or_else(|| VerifyError::UnresolvedClass(descriptor.clone()))
    }

    /// Check that a descriptor is backed by a definition: classes must be
    /// registered, arrays must have a registered (or primitive) base
    /// element, primitives always resolve.
    pub fn ensure_resolvable(&self, descriptor: &TypeDescriptor) -> Result<(), VerifyError> {
        if descriptor.is_class() {
            self.resolve(descriptor).map(|_| ())
        } else if descriptor.is_array() {
            let base = descriptor.base_element_type();
            if base.is_class() {
                self.resolve(&base).map(|_| ())
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }

    /// Whether the descriptor names an interface; arrays and primitives are
    /// never interfaces.
    pub fn is_interface(&self, descriptor: &TypeDescriptor) -> Result<bool, VerifyError> {
        if !descriptor.is_class() {
            return Ok(false);
        }
        Ok(self.resolve(descriptor)?.is_interface())
    }

    /// The direct superclass of a reference type; arrays extend `Object`.
    pub fn superclass_of(
        &self,
        descriptor: &TypeDescriptor,
    ) -> Result<Option<TypeDescriptor>, VerifyError> {
        if descriptor.is_array() {
            return Ok(Some(self.object.clone()));
        }
        Ok(self.resolve(descriptor)?.superclass().cloned())
    }

    /// Whether `child` equals `ancestor` or has it on its superclass chain.
    pub fn extends(
        &self,
        child: &TypeDescriptor,
        ancestor: &TypeDescriptor,
    ) -> Result<bool, VerifyError> {
        if child == ancestor {
            return Ok(true);
        }
        if ancestor == &self.object {
            return Ok(child.is_reference());
        }
        if !child.is_class() {
            return Ok(false);
        }

        let mut current = self.resolve(child)?;
        while let Some(superclass) = current.superclass() {
            if superclass == ancestor {
                return Ok(true);
            }
            current = self.resolve(superclass)?;
        }
        Ok(false)
    }

    /// Whether `descriptor` implements `interface`, directly or through any
    /// superclass or super-interface.
    pub fn implements(
        &self,
        descriptor: &TypeDescriptor,
        interface: &TypeDescriptor,
    ) -> Result<bool, VerifyError> {
        if !descriptor.is_class() {
            return Ok(false);
        }

        let mut current = Some(descriptor.clone());
        while let Some(class) = current {
            let def = self.resolve(&class)?;
            for implemented in def.interfaces() {
                if implemented == interface || self.implements(implemented, interface)? {
                    return Ok(true);
                }
            }
            current = def.superclass().cloned();
        }
        Ok(false)
    }

    /// Whether a value of type `source` may be assigned to a location of
    /// type `target`.
    ///
    /// Interface targets accept any reference; the runtime defers those
    /// checks, and flagging them here would reject verifiable code.
    pub fn is_assignable(
        &self,
        source: &TypeDescriptor,
        target: &TypeDescriptor,
    ) -> Result<bool, VerifyError> {
        if source == target {
            return Ok(true);
        }
        if target == &self.object {
            return Ok(source.is_reference());
        }
        if target.is_array() {
            let (Some(source_element), Some(target_element)) =
                (source.element_type(), target.element_type())
            else {
                return Ok(false);
            };
            if target_element.is_primitive() {
                // primitive arrays are invariant and unequal here
                return Ok(false);
            }
            return self.is_assignable(&source_element, &target_element);
        }
        if !target.is_class() || !source.is_reference() {
            return Ok(false);
        }
        if source.is_array() {
            return Ok(false);
        }
        if self.is_interface(target)? {
            return Ok(true);
        }
        self.extends(source, target)
    }

    /// The most specific common superclass of two reference types.
    pub fn common_superclass(
        &self,
        a: &TypeDescriptor,
        b: &TypeDescriptor,
    ) -> Result<TypeDescriptor, VerifyError> {
        if a == b {
            return Ok(a.clone());
        }
        if a == &self.object || b == &self.object {
            return Ok(self.object.clone());
        }

        if a.is_array() && b.is_array() {
            let (Some(a_element), Some(b_element)) = (a.element_type(), b.element_type()) else {
                return Ok(self.object.clone());
            };
            if a_element.is_reference() && b_element.is_reference() {
                let element = self.common_superclass(&a_element, &b_element)?;
                return Ok(TypeDescriptor::new(format!("[{element}"))?);
            }
            // unequal primitive element types only share Object
            return Ok(self.object.clone());
        }
        if a.is_array() || b.is_array() {
            return Ok(self.object.clone());
        }

        // an interface side wins if the other side satisfies it
        if self.is_interface(a)? {
            if b == a || self.implements(b, a)? {
                return Ok(a.clone());
            }
            return Ok(self.object.clone());
        }
        if self.is_interface(b)? {
            if self.implements(a, b)? {
                return Ok(b.clone());
            }
            return Ok(self.object.clone());
        }

        let mut ancestors = Vec::new();
        let mut current = Some(a.clone());
        while let Some(class) = current {
            current = self.resolve(&class)?.superclass().cloned();
            ancestors.push(class);
        }

        let mut current = Some(b.clone());
        while let Some(class) = current {
            if ancestors.contains(&class) {
                return Ok(class);
            }
            current = self.resolve(&class)?.superclass().cloned();
        }
        Ok(self.object.clone())
    }

    /// Whether `class` or any of its superclasses declares the given
    /// virtual method.
    pub fn has_virtual_method(
        &self,
        class: &TypeDescriptor,
        name: &str,
        proto: &Prototype,
    ) -> Result<bool, VerifyError> {
        let mut current = Some(class.clone());
        while let Some(descriptor) = current {
            let def = self.resolve(&descriptor)?;
            if def.declares_virtual_method(name, proto) {
                return Ok(true);
            }
            current = def.superclass().cloned();
        }
        Ok(false)
    }
}
