//! Enum field registration: validate a declaration against the target type,
//! then install the generated members.
//!
//! Registration is atomic. Every member name is planned and checked before
//! the first one is installed, so a failed registration leaves the target
//! untouched.

use crate::{
    TRACE_TARGET,
    declaration::EnumDeclaration,
    entity::Member,
    error::ConfigurationError,
    field::EnumField,
    filter::ScopeFn,
    inflect::{EnglishInflector, Inflector},
    naming,
    traits::TargetType,
    value::Value,
};
use std::{collections::BTreeSet, sync::Arc};

///
/// EnumFieldRegistrar
///

#[derive(Clone, Copy, Debug, Default)]
pub struct EnumFieldRegistrar<I = EnglishInflector> {
    inflector: I,
}

impl EnumFieldRegistrar {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inflector: EnglishInflector,
        }
    }
}

impl<I: Inflector> EnumFieldRegistrar<I> {
    #[must_use]
    pub const fn with_inflector(inflector: I) -> Self {
        Self { inflector }
    }

    /// Register one enum field onto `target`.
    // `instrument` takes only a string literal target; it must equal TRACE_TARGET.
    #[tracing::instrument(
        level = "debug",
        target = "symbolic_enum",
        skip_all,
        fields(entity = target.type_name(), field = declaration.field())
    )]
    pub fn register<T: TargetType + ?Sized>(
        &self,
        target: &mut T,
        declaration: EnumDeclaration,
    ) -> Result<Arc<EnumField>, ConfigurationError> {
        let (name, mapping, options) = declaration.into_parts();
        let accessor = self.inflector.pluralize(&name);
        let field = Arc::new(EnumField::new(name, accessor, mapping, options));

        let plan = plan(&field);
        check_plan(target, &plan)?;
        install(target, plan);

        tracing::debug!(
            target: TRACE_TARGET,
            accessor = field.accessor(),
            values = field.mapping().len(),
            array = options.array,
            "registered enum field"
        );

        Ok(field)
    }

    /// Parse a loosely-typed declaration and register it.
    pub fn register_value<T: TargetType + ?Sized>(
        &self,
        target: &mut T,
        args: &Value,
    ) -> Result<Arc<EnumField>, ConfigurationError> {
        self.register(target, EnumDeclaration::parse(args)?)
    }
}

///
/// Planned
/// One member a registration will install, and the name that owns it.
///

enum Planned {
    Method { name: String, member: Member },
    Static { name: String, member: Member },
    Scope { name: String, build: ScopeFn },
}

struct PlannedMember {
    owner: String,
    planned: Planned,
}

impl PlannedMember {
    const fn is_static(&self) -> bool {
        matches!(
            self.planned,
            Planned::Static { .. } | Planned::Scope { .. }
        )
    }

    fn name(&self) -> &str {
        match &self.planned {
            Planned::Method { name, .. }
            | Planned::Static { name, .. }
            | Planned::Scope { name, .. } => name,
        }
    }
}

// Per-value members come first, in mapping order, then the field's own.
fn plan(field: &Arc<EnumField>) -> Vec<PlannedMember> {
    let options = field.options();
    let mut plan = Vec::new();

    for entry in field.mapping() {
        let owner = entry.name.clone();
        let code = entry.code;

        plan.push(PlannedMember {
            owner: owner.clone(),
            planned: Planned::Method {
                name: naming::predicate(&entry.name),
                member: Member::Predicate {
                    field: Arc::clone(field),
                    code,
                },
            },
        });

        if !options.disable_setters {
            plan.push(PlannedMember {
                owner: owner.clone(),
                planned: Planned::Method {
                    name: naming::mutator(&entry.name),
                    member: Member::Mutator {
                        field: Arc::clone(field),
                        code,
                    },
                },
            });
        }

        if !options.disable_scopes {
            let scoped = Arc::clone(field);
            plan.push(PlannedMember {
                owner,
                planned: Planned::Scope {
                    name: naming::scope(&entry.name),
                    build: Arc::new(move || scoped.filter(code)),
                },
            });
        }
    }

    let owner = field.name().to_string();
    plan.push(PlannedMember {
        owner: owner.clone(),
        planned: Planned::Static {
            name: field.accessor().to_string(),
            member: Member::Accessor(Arc::clone(field)),
        },
    });
    plan.push(PlannedMember {
        owner: owner.clone(),
        planned: Planned::Method {
            name: naming::getter(field.name()),
            member: Member::Getter(Arc::clone(field)),
        },
    });
    if !options.disable_setters {
        plan.push(PlannedMember {
            owner,
            planned: Planned::Method {
                name: naming::setter(field.name()),
                member: Member::Setter(Arc::clone(field)),
            },
        });
    }

    plan
}

// Reject the whole plan if any name is already bound on the target or is
// planned twice.
fn check_plan<T: TargetType + ?Sized>(
    target: &T,
    plan: &[PlannedMember],
) -> Result<(), ConfigurationError> {
    let mut seen: BTreeSet<(bool, &str)> = BTreeSet::new();

    for member in plan {
        let name = member.name();
        let is_static = member.is_static();
        let bound = if is_static {
            target.has_static_method(name)
        } else {
            target.has_method(name)
        };

        if bound || !seen.insert((is_static, name)) {
            tracing::warn!(
                target: TRACE_TARGET,
                entity = target.type_name(),
                owner = %member.owner,
                member = name,
                "enum member clashes with an existing member"
            );

            return Err(ConfigurationError::Clash {
                name: member.owner.clone(),
                member: name.to_string(),
            });
        }
    }

    Ok(())
}

fn install<T: TargetType + ?Sized>(target: &mut T, plan: Vec<PlannedMember>) {
    for member in plan {
        match member.planned {
            Planned::Method { name, member } => target.define_method(name, member),
            Planned::Static { name, member } => target.define_static_method(name, member),
            Planned::Scope { name, build } => {
                tracing::debug!(target: TRACE_TARGET, scope = %name, "registered scope");
                target.scope(&name, build);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::RegistrationOptions;
    use std::{
        collections::BTreeMap,
        sync::{
            Mutex,
            atomic::{AtomicU64, Ordering},
        },
    };
    use tracing::{Event, Metadata, Subscriber, span};

    // Target that records every collaborator call.
    #[derive(Default)]
    struct RecordingTarget {
        methods: BTreeMap<String, Member>,
        statics: BTreeMap<String, Member>,
        scopes: Vec<(String, ScopeFn)>,
        calls: usize,
    }

    impl RecordingTarget {
        fn with_method(mut self, name: &str) -> Self {
            self.methods.insert(name.to_string(), Member::Declared);
            self
        }

        fn with_static(mut self, name: &str) -> Self {
            self.statics.insert(name.to_string(), Member::Declared);
            self
        }

        fn scope_names(&self) -> Vec<&str> {
            self.scopes.iter().map(|(name, _)| name.as_str()).collect()
        }
    }

    impl TargetType for RecordingTarget {
        fn type_name(&self) -> &str {
            "SampleClass"
        }

        fn has_method(&self, name: &str) -> bool {
            self.methods.contains_key(name)
        }

        fn has_static_method(&self, name: &str) -> bool {
            self.statics.contains_key(name)
        }

        fn define_method(&mut self, name: String, member: Member) {
            self.calls += 1;
            self.methods.insert(name, member);
        }

        fn define_static_method(&mut self, name: String, member: Member) {
            self.calls += 1;
            self.statics.insert(name, member);
        }

        fn scope(&mut self, name: &str, scope: ScopeFn) {
            self.calls += 1;
            self.scopes.push((name.to_string(), scope));
        }
    }

    fn declaration(options: RegistrationOptions) -> EnumDeclaration {
        EnumDeclaration::new("state", [("abc", 1), ("def", 2)])
            .unwrap()
            .with_options(options)
    }

    #[test]
    fn installs_every_member_and_one_scope_per_value() {
        let mut target = RecordingTarget::default();
        EnumFieldRegistrar::new()
            .register(&mut target, declaration(RegistrationOptions::new()))
            .unwrap();

        assert_eq!(target.scope_names(), ["abc", "def"]);
        for name in ["state", "state=", "is_abc", "is_def", "set_abc!", "set_def!"] {
            assert!(target.has_method(name), "missing {name}");
        }
        assert!(target.has_static_method("states"));
    }

    #[test]
    fn scopes_filter_by_code() {
        let mut target = RecordingTarget::default();
        EnumFieldRegistrar::new()
            .register(&mut target, declaration(RegistrationOptions::new()))
            .unwrap();

        let filters: Vec<_> = target.scopes.iter().map(|(_, build)| build()).collect();
        assert_eq!(filters[0].to_string(), "state = 1");
        assert_eq!(filters[1].to_string(), "state = 2");
    }

    #[test]
    fn disabled_scopes_never_reach_the_scope_registry() {
        let mut target = RecordingTarget::default();
        EnumFieldRegistrar::new()
            .register(
                &mut target,
                declaration(RegistrationOptions::new().disable_scopes(true)),
            )
            .unwrap();

        assert!(target.scopes.is_empty());
        assert!(target.has_method("set_abc!"));
    }

    #[test]
    fn disabled_setters_skip_setter_and_mutators_only() {
        let mut target = RecordingTarget::default();
        EnumFieldRegistrar::new()
            .register(
                &mut target,
                declaration(RegistrationOptions::new().disable_setters(true)),
            )
            .unwrap();

        assert!(!target.has_method("state="));
        assert!(!target.has_method("set_abc!"));
        assert!(target.has_method("state"));
        assert!(target.has_method("is_abc"));
        assert_eq!(target.scope_names(), ["abc", "def"]);
    }

    #[test]
    fn a_late_clash_installs_nothing() {
        let mut target = RecordingTarget::default().with_method("set_def!");
        let err = EnumFieldRegistrar::new()
            .register(&mut target, declaration(RegistrationOptions::new()))
            .unwrap_err();

        assert_eq!(err.to_string(), "'def' clashes with existing members");
        assert_eq!(target.calls, 0, "validation precedes every mutation");
        assert!(!target.has_method("is_abc"));
    }

    #[test]
    fn static_clashes_are_detected() {
        let mut target = RecordingTarget::default().with_static("abc");
        let err = EnumFieldRegistrar::new()
            .register(&mut target, declaration(RegistrationOptions::new()))
            .unwrap_err();

        assert!(matches!(err, ConfigurationError::Clash { ref name, .. } if name == "abc"));
    }

    #[test]
    fn disabled_members_cannot_clash() {
        let mut target = RecordingTarget::default()
            .with_method("set_abc!")
            .with_static("abc");
        let options = RegistrationOptions::new()
            .disable_setters(true)
            .disable_scopes(true);

        assert!(
            EnumFieldRegistrar::new()
                .register(&mut target, declaration(options))
                .is_ok()
        );
    }

    #[test]
    fn names_generated_twice_clash_with_each_other() {
        // the scope `states` collides with the accessor for `state`
        let decl = EnumDeclaration::new("state", [("states", 1)]).unwrap();
        let mut target = RecordingTarget::default();
        let err = EnumFieldRegistrar::new()
            .register(&mut target, decl)
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigurationError::Clash { ref name, ref member } if name == "state" && member == "states"
        ));
        assert_eq!(target.calls, 0);
    }

    #[test]
    fn custom_inflectors_name_the_accessor() {
        let registrar = EnumFieldRegistrar::with_inflector(|w: &str| format!("all_{w}"));
        let mut target = RecordingTarget::default();
        let field = registrar
            .register(&mut target, declaration(RegistrationOptions::new()))
            .unwrap();

        assert_eq!(field.accessor(), "all_state");
        assert!(target.has_static_method("all_state"));
    }

    // Collects the target of every span and event.
    #[derive(Clone, Default)]
    struct TargetLog {
        targets: Arc<Mutex<Vec<String>>>,
        next_id: Arc<AtomicU64>,
    }

    impl TargetLog {
        fn push(&self, metadata: &Metadata<'_>) {
            self.targets.lock().unwrap().push(metadata.target().to_string());
        }
    }

    impl Subscriber for TargetLog {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, attrs: &span::Attributes<'_>) -> span::Id {
            self.push(attrs.metadata());
            span::Id::from_u64(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
        }

        fn record(&self, _: &span::Id, _: &span::Record<'_>) {}

        fn record_follows_from(&self, _: &span::Id, _: &span::Id) {}

        fn event(&self, event: &Event<'_>) {
            self.push(event.metadata());
        }

        fn enter(&self, _: &span::Id) {}

        fn exit(&self, _: &span::Id) {}
    }

    #[test]
    fn spans_and_events_share_the_crate_target() {
        let log = TargetLog::default();

        tracing::subscriber::with_default(log.clone(), || {
            let registrar = EnumFieldRegistrar::new();
            let mut target = RecordingTarget::default();
            registrar
                .register(&mut target, declaration(RegistrationOptions::new()))
                .unwrap();

            let mut clashing = RecordingTarget::default().with_method("is_abc");
            registrar
                .register(&mut clashing, declaration(RegistrationOptions::new()))
                .unwrap_err();
        });

        let targets = log.targets.lock().unwrap();
        assert!(targets.len() >= 4, "two spans plus scope, field and clash events");
        assert!(targets.iter().all(|t| t == TRACE_TARGET), "{targets:?}");
    }

    #[test]
    fn loose_arguments_register_too() {
        let args = Value::from_json(&serde_json::json!({ "state": { "abc": 1 }, "array": true }));
        let mut target = RecordingTarget::default();
        let field = EnumFieldRegistrar::new()
            .register_value(&mut target, &args)
            .unwrap();

        assert!(field.is_array());
        assert_eq!(target.scopes[0].1().to_string(), "state CONTAINS 1");
    }
}
