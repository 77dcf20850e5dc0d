//! Class descriptors for host objects
//!
//! A `HostClass` lists the public surface of one host type: properties
//! (optional getter and setter), fields (a slot that is always readable and
//! writable unless readonly) and methods (possibly several with the same
//! name). Members keep their declaration order, which the bridge relies on
//! when it picks between overloads.

use std::any::TypeId;
use std::marker::PhantomData;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{catch_panic, HostResult};
use crate::object::{downcast, HostObject};
use crate::types::HostType;
use crate::value::HostValue;

/// Reads a member from a host object
pub type Getter = Arc<dyn Fn(&dyn HostObject) -> HostResult<HostValue> + Send + Sync>;

/// Writes a member on a host object
pub type Setter = Arc<dyn Fn(&dyn HostObject, HostValue) -> HostResult<()> + Send + Sync>;

/// Invokes a method on a host object
pub type Invoker =
    Arc<dyn Fn(&dyn HostObject, &[HostValue]) -> HostResult<HostValue> + Send + Sync>;

/// Property information
#[derive(Clone)]
pub struct PropertyInfo {
    name: String,
    ty: HostType,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl PropertyInfo {
    /// Create a property from raw accessors
    pub fn new(
        name: impl Into<String>,
        ty: HostType,
        getter: Option<Getter>,
        setter: Option<Setter>,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            getter,
            setter,
        }
    }

    /// Property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    pub fn ty(&self) -> &HostType {
        &self.ty
    }

    /// Whether the property has a getter
    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    /// Whether the property has a setter
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Read the property. `None` if it has no getter.
    pub fn read(&self, obj: &dyn HostObject) -> Option<HostResult<HostValue>> {
        self.getter.as_ref().map(|get| catch_panic(|| get(obj)))
    }

    /// Write the property. `None` if it has no setter.
    pub fn write(&self, obj: &dyn HostObject, value: HostValue) -> Option<HostResult<()>> {
        self.setter.as_ref().map(|set| catch_panic(|| set(obj, value)))
    }
}

/// Field information
#[derive(Clone)]
pub struct FieldInfo {
    name: String,
    ty: HostType,
    getter: Getter,
    setter: Option<Setter>,
}

impl FieldInfo {
    /// Create a field from raw accessors; no setter means readonly
    pub fn new(
        name: impl Into<String>,
        ty: HostType,
        getter: Getter,
        setter: Option<Setter>,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            getter,
            setter,
        }
    }

    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    pub fn ty(&self) -> &HostType {
        &self.ty
    }

    /// Whether the field rejects writes
    pub fn is_readonly(&self) -> bool {
        self.setter.is_none()
    }

    /// Read the field
    pub fn read(&self, obj: &dyn HostObject) -> HostResult<HostValue> {
        catch_panic(|| (self.getter)(obj))
    }

    /// Write the field. `None` if it is readonly.
    pub fn write(&self, obj: &dyn HostObject, value: HostValue) -> Option<HostResult<()>> {
        self.setter.as_ref().map(|set| catch_panic(|| set(obj, value)))
    }
}

/// Parameter information
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub ty: HostType,
    /// Position in the parameter list
    pub index: usize,
}

/// Method information
#[derive(Clone)]
pub struct MethodInfo {
    name: String,
    parameters: Vec<ParameterInfo>,
    return_type: HostType,
    /// Declaration order within the class
    index: usize,
    invoker: Invoker,
}

impl MethodInfo {
    /// Create a method from a raw invoker
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<ParameterInfo>,
        return_type: HostType,
        invoker: Invoker,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type,
            index: 0,
            invoker,
        }
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameters
    pub fn parameters(&self) -> &[ParameterInfo] {
        &self.parameters
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Declared return type
    pub fn return_type(&self) -> &HostType {
        &self.return_type
    }

    /// Declaration order within the class
    pub fn index(&self) -> usize {
        self.index
    }

    /// Invoke the method. Arguments are expected to match `parameters`.
    pub fn invoke(&self, obj: &dyn HostObject, args: &[HostValue]) -> HostResult<HostValue> {
        catch_panic(|| (self.invoker)(obj, args))
    }
}

impl std::fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params: Vec<String> = self.parameters.iter().map(|p| p.ty.to_string()).collect();
        write!(f, "{}({}) -> {}", self.name, params.join(", "), self.return_type)
    }
}

/// Class descriptor for a host type
pub struct HostClass {
    name: String,
    type_id: TypeId,
    type_name: &'static str,
    properties: Vec<PropertyInfo>,
    fields: Vec<FieldInfo>,
    methods: Vec<MethodInfo>,
    property_indices: FxHashMap<String, usize>,
    field_indices: FxHashMap<String, usize>,
    /// Method name to indices into `methods`, in declaration order
    method_indices: FxHashMap<String, Vec<usize>>,
}

impl HostClass {
    /// Start describing the host type `T`
    pub fn builder<T: HostObject>(name: impl Into<String>) -> HostClassBuilder<T> {
        HostClassBuilder {
            class: HostClass {
                name: name.into(),
                type_id: TypeId::of::<T>(),
                type_name: std::any::type_name::<T>(),
                properties: Vec::new(),
                fields: Vec::new(),
                methods: Vec::new(),
                property_indices: FxHashMap::default(),
                field_indices: FxHashMap::default(),
                method_indices: FxHashMap::default(),
            },
            _marker: PhantomData,
        }
    }

    /// Class name as shown to scripts
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust type this class describes
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust type name this class describes
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Get property by name
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.property_indices.get(name).map(|&i| &self.properties[i])
    }

    /// Get field by name
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.field_indices.get(name).map(|&i| &self.fields[i])
    }

    /// All methods with this name, in declaration order
    pub fn methods_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a MethodInfo> + 'a {
        self.method_indices
            .get(name)
            .into_iter()
            .flatten()
            .map(move |&i| &self.methods[i])
    }

    /// Check if at least one method has this name
    pub fn has_method(&self, name: &str) -> bool {
        self.method_indices.contains_key(name)
    }

    /// All properties in declaration order
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// All fields in declaration order
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// All methods in declaration order
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// Add a property. A second property with the same name replaces the lookup.
    pub fn add_property(&mut self, property: PropertyInfo) {
        self.property_indices
            .insert(property.name.clone(), self.properties.len());
        self.properties.push(property);
    }

    /// Add a field
    pub fn add_field(&mut self, field: FieldInfo) {
        self.field_indices.insert(field.name.clone(), self.fields.len());
        self.fields.push(field);
    }

    /// Add a method; same-named methods form an overload group
    pub fn add_method(&mut self, mut method: MethodInfo) {
        let index = self.methods.len();
        method.index = index;
        self.method_indices
            .entry(method.name.clone())
            .or_default()
            .push(index);
        self.methods.push(method);
    }
}

impl std::fmt::Debug for HostClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostClass")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("properties", &self.properties.len())
            .field("fields", &self.fields.len())
            .field("methods", &self.methods)
            .finish()
    }
}

/// Typed builder for a `HostClass`.
///
/// Member closures receive the concrete `&T`; the builder wraps them so the
/// resulting descriptor works on `&dyn HostObject`.
pub struct HostClassBuilder<T> {
    class: HostClass,
    _marker: PhantomData<fn(&T)>,
}

impl<T: HostObject> HostClassBuilder<T> {
    /// Read-only property
    pub fn property<G>(mut self, name: &str, ty: HostType, get: G) -> Self
    where
        G: Fn(&T) -> HostResult<HostValue> + Send + Sync + 'static,
    {
        self.class
            .add_property(PropertyInfo::new(name, ty, Some(wrap_getter(get)), None));
        self
    }

    /// Read-write property
    pub fn property_rw<G, S>(mut self, name: &str, ty: HostType, get: G, set: S) -> Self
    where
        G: Fn(&T) -> HostResult<HostValue> + Send + Sync + 'static,
        S: Fn(&T, HostValue) -> HostResult<()> + Send + Sync + 'static,
    {
        self.class.add_property(PropertyInfo::new(
            name,
            ty,
            Some(wrap_getter(get)),
            Some(wrap_setter(set)),
        ));
        self
    }

    /// Write-only property
    pub fn property_wo<S>(mut self, name: &str, ty: HostType, set: S) -> Self
    where
        S: Fn(&T, HostValue) -> HostResult<()> + Send + Sync + 'static,
    {
        self.class
            .add_property(PropertyInfo::new(name, ty, None, Some(wrap_setter(set))));
        self
    }

    /// Writable field
    pub fn field<G, S>(mut self, name: &str, ty: HostType, get: G, set: S) -> Self
    where
        G: Fn(&T) -> HostResult<HostValue> + Send + Sync + 'static,
        S: Fn(&T, HostValue) -> HostResult<()> + Send + Sync + 'static,
    {
        self.class.add_field(FieldInfo::new(
            name,
            ty,
            wrap_getter(get),
            Some(wrap_setter(set)),
        ));
        self
    }

    /// Readonly field
    pub fn readonly_field<G>(mut self, name: &str, ty: HostType, get: G) -> Self
    where
        G: Fn(&T) -> HostResult<HostValue> + Send + Sync + 'static,
    {
        self.class
            .add_field(FieldInfo::new(name, ty, wrap_getter(get), None));
        self
    }

    /// Method with named, typed parameters
    pub fn method<F, P>(mut self, name: &str, params: P, returns: HostType, f: F) -> Self
    where
        F: Fn(&T, &[HostValue]) -> HostResult<HostValue> + Send + Sync + 'static,
        P: IntoIterator<Item = (&'static str, HostType)>,
    {
        let parameters = params
            .into_iter()
            .enumerate()
            .map(|(index, (name, ty))| ParameterInfo {
                name: name.to_string(),
                ty,
                index,
            })
            .collect();
        let invoker: Invoker =
            Arc::new(move |obj: &dyn HostObject, args: &[HostValue]| f(downcast::<T>(obj)?, args));
        self.class
            .add_method(MethodInfo::new(name, parameters, returns, invoker));
        self
    }

    /// Finish the descriptor
    pub fn build(self) -> HostClass {
        self.class
    }
}

fn wrap_getter<T, G>(get: G) -> Getter
where
    T: HostObject,
    G: Fn(&T) -> HostResult<HostValue> + Send + Sync + 'static,
{
    Arc::new(move |obj: &dyn HostObject| get(downcast::<T>(obj)?))
}

fn wrap_setter<T, S>(set: S) -> Setter
where
    T: HostObject,
    S: Fn(&T, HostValue) -> HostResult<()> + Send + Sync + 'static,
{
    Arc::new(move |obj: &dyn HostObject, value: HostValue| set(downcast::<T>(obj)?, value))
}
