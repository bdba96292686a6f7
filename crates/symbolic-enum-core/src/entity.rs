//! Default registration target: an entity type's member tables.

use crate::{
    declaration::EnumDeclaration,
    error::{AttributeError, ConfigurationError, MemberError},
    field::EnumField,
    filter::{FieldFilter, ScopeFn},
    mapping::{Code, EnumMapping},
    naming,
    registrar::EnumFieldRegistrar,
    traits::{Record, TargetType},
    value::Value,
};
use std::{collections::BTreeMap, fmt, sync::Arc};

///
/// Member
///
/// What a member name resolves to on an entity type. Generated members
/// share their field's `EnumField`.
///

#[derive(Clone, Debug)]
pub enum Member {
    /// Defined by the entity itself, outside any enum registration.
    Declared,
    Accessor(Arc<EnumField>),
    Getter(Arc<EnumField>),
    Setter(Arc<EnumField>),
    Predicate { field: Arc<EnumField>, code: Code },
    Mutator { field: Arc<EnumField>, code: Code },
    Scope(Scope),
}

///
/// Scope
///

#[derive(Clone)]
pub struct Scope {
    name: String,
    build: ScopeFn,
}

impl Scope {
    #[must_use]
    pub fn new(name: impl Into<String>, build: ScopeFn) -> Self {
        Self {
            name: name.into(),
            build,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn filter(&self) -> FieldFilter {
        (self.build)()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("filter", &self.filter())
            .finish()
    }
}

///
/// Mutator
/// A resolved `set_<name>!` member, ready to be called on a record.
///

#[derive(Clone, Copy, Debug)]
pub struct Mutator<'a> {
    field: &'a EnumField,
    code: Code,
}

impl Mutator<'_> {
    #[must_use]
    pub const fn code(&self) -> Code {
        self.code
    }

    /// Persist the code; the record's persistence error is returned as-is.
    pub fn call<R: Record + ?Sized>(&self, record: &mut R) -> Result<(), R::Error> {
        self.field.mark(record, self.code)
    }
}

///
/// EntityType
///
/// Instance and static member tables for one entity type, plus the enum
/// fields and scopes registered on it, each in registration order.
///

#[derive(Clone, Debug)]
pub struct EntityType {
    name: String,
    methods: BTreeMap<String, Member>,
    statics: BTreeMap<String, Member>,
    fields: Vec<Arc<EnumField>>,
    scopes: Vec<Scope>,
}

impl EntityType {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: BTreeMap::new(),
            statics: BTreeMap::new(),
            fields: Vec::new(),
            scopes: Vec::new(),
        }
    }

    /// Declare an instance member the entity defines itself.
    #[must_use]
    pub fn with_method(mut self, name: impl Into<String>) -> Self {
        self.methods.insert(name.into(), Member::Declared);
        self
    }

    /// Declare a static member the entity defines itself.
    #[must_use]
    pub fn with_static_method(mut self, name: impl Into<String>) -> Self {
        self.statics.insert(name.into(), Member::Declared);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // ------------------------------------------------------------------
    // registration
    // ------------------------------------------------------------------

    pub fn register(
        &mut self,
        declaration: EnumDeclaration,
    ) -> Result<Arc<EnumField>, ConfigurationError> {
        EnumFieldRegistrar::new().register(self, declaration)
    }

    pub fn register_value(&mut self, args: &Value) -> Result<Arc<EnumField>, ConfigurationError> {
        self.register(EnumDeclaration::parse(args)?)
    }

    pub fn register_json(&mut self, src: &str) -> Result<Arc<EnumField>, ConfigurationError> {
        self.register(EnumDeclaration::from_json_str(src)?)
    }

    // ------------------------------------------------------------------
    // introspection
    // ------------------------------------------------------------------

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&Member> {
        self.methods.get(name)
    }

    #[must_use]
    pub fn static_method(&self, name: &str) -> Option<&Member> {
        self.statics.get(name)
    }

    #[must_use]
    pub fn responds_to(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn enum_fields(&self) -> impl Iterator<Item = &Arc<EnumField>> {
        self.fields.iter()
    }

    #[must_use]
    pub fn enum_field(&self, field: &str) -> Option<&Arc<EnumField>> {
        self.fields.iter().find(|f| f.name() == field)
    }

    /// Every registered enum field with its mapping, in registration order.
    #[must_use]
    pub fn symbolic_enums(&self) -> Vec<(&str, &EnumMapping)> {
        self.fields
            .iter()
            .map(|f| (f.name(), f.mapping()))
            .collect()
    }

    /// Every registered scope, in registration order.
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    // ------------------------------------------------------------------
    // member dispatch
    // ------------------------------------------------------------------

    /// Call the static mapping accessor `accessor` (e.g. `states`).
    pub fn values(&self, accessor: &str) -> Result<&EnumMapping, MemberError> {
        match self.statics.get(accessor) {
            Some(Member::Accessor(field)) => Ok(field.mapping()),
            _ => Err(self.undefined_static(accessor)),
        }
    }

    /// Call the scope `name`, producing its filter.
    pub fn scope(&self, name: &str) -> Result<FieldFilter, MemberError> {
        match self.statics.get(name) {
            Some(Member::Scope(scope)) => Ok(scope.filter()),
            _ => Err(self.undefined_static(name)),
        }
    }

    /// Call the getter for `field`.
    pub fn read<R: Record + ?Sized>(&self, record: &R, field: &str) -> Result<Value, AttributeError> {
        match self.methods.get(&naming::getter(field)) {
            Some(Member::Getter(enum_field)) => Ok(enum_field.get(record)?),
            _ => Err(self.undefined(naming::getter(field)).into()),
        }
    }

    /// Call the setter for `field`.
    pub fn assign<R: Record + ?Sized>(
        &self,
        record: &mut R,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<(), AttributeError> {
        let name = naming::setter(field);

        match self.methods.get(&name) {
            Some(Member::Setter(enum_field)) => Ok(enum_field.set(record, value.into())?),
            _ => Err(self.undefined(name).into()),
        }
    }

    /// Call the predicate `is_<value>`.
    pub fn check<R: Record + ?Sized>(&self, record: &R, value: &str) -> Result<bool, MemberError> {
        let name = naming::predicate(value);

        match self.methods.get(&name) {
            Some(Member::Predicate { field, code }) => Ok(field.is(record, *code)),
            _ => Err(self.undefined(name)),
        }
    }

    /// Resolve the mutator `set_<value>!`.
    pub fn mutator(&self, value: &str) -> Result<Mutator<'_>, MemberError> {
        let name = naming::mutator(value);

        match self.methods.get(&name) {
            Some(Member::Mutator { field, code }) => Ok(Mutator {
                field: field.as_ref(),
                code: *code,
            }),
            _ => Err(self.undefined(name)),
        }
    }

    fn undefined(&self, name: String) -> MemberError {
        MemberError::UndefinedMethod {
            entity: self.name.clone(),
            name,
        }
    }

    fn undefined_static(&self, name: &str) -> MemberError {
        MemberError::UndefinedStaticMethod {
            entity: self.name.clone(),
            name: name.to_string(),
        }
    }
}

impl TargetType for EntityType {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    fn has_static_method(&self, name: &str) -> bool {
        self.statics.contains_key(name)
    }

    fn define_method(&mut self, name: String, member: Member) {
        self.methods.insert(name, member);
    }

    fn define_static_method(&mut self, name: String, member: Member) {
        if let Member::Accessor(field) = &member {
            self.fields.push(Arc::clone(field));
        }
        self.statics.insert(name, member);
    }

    fn scope(&mut self, name: &str, scope: ScopeFn) {
        let scope = Scope::new(name, scope);
        self.scopes.push(scope.clone());
        self.statics.insert(name.to_string(), Member::Scope(scope));
    }
}
