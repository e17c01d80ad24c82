use super::*;

fn decl(id: &str) -> ComponentDecl<()> {
	ComponentDecl::new(id, ())
}

fn ids(view: &[ComponentId]) -> Vec<&str> {
	view.iter().map(ComponentId::as_str).collect()
}

#[test]
fn by_role_follows_registration_order() {
	let mut reg = TagRegistry::new();
	reg.register(decl("b").with_role(Role::Handler)).unwrap();
	reg.register(decl("a").with_role(Role::Processor)).unwrap();
	reg.register(decl("c").with_role(Role::Handler).with_role(Role::Processor)).unwrap();

	assert_eq!(ids(reg.by_role(Role::Handler)), ["b", "c"]);
	assert_eq!(ids(reg.by_role(Role::Processor)), ["a", "c"]);
}

#[test]
fn by_role_is_empty_without_members() {
	let mut reg = TagRegistry::new();
	reg.register(decl("only").with_role(Role::Handler)).unwrap();
	assert!(reg.by_role(Role::Processor).is_empty());
}

#[test]
fn component_without_roles_is_registered() {
	let mut reg = TagRegistry::new();
	reg.register(decl("plain")).unwrap();
	assert!(reg.contains("plain"));
	assert!(reg.by_role(Role::Handler).is_empty());
}

#[test]
fn priority_defaults_to_zero() {
	let mut reg = TagRegistry::new();
	reg.register(decl("implicit").with_role(Role::Handler)).unwrap();
	reg.register(decl("explicit").with_role(Role::Handler).with_priority(-5)).unwrap();

	assert_eq!(reg.priority_of("implicit"), 0);
	assert_eq!(reg.get("implicit").unwrap().declared_priority(), None);
	assert_eq!(reg.priority_of("explicit"), -5);
	assert_eq!(reg.priority_of("missing"), 0);
}

/// A rejected duplicate must leave the registry exactly as it was.
#[test]
fn duplicate_identity_is_rejected_without_side_effects() {
	let mut reg = TagRegistry::new();
	reg.register(ComponentDecl::new("x", 1).with_role(Role::Handler).with_priority(5)).unwrap();

	let err = reg
		.register(ComponentDecl::new("x", 2).with_role(Role::Processor).with_priority(1))
		.unwrap_err();
	assert_eq!(err, RegistryError::DuplicateIdentity { id: "x".into() });

	assert_eq!(reg.len(), 1);
	assert_eq!(*reg.get("x").unwrap().payload(), 1);
	assert_eq!(reg.priority_of("x"), 5);
	assert!(reg.by_role(Role::Processor).is_empty());
	assert_eq!(ids(reg.by_role(Role::Handler)), ["x"]);
}

#[test]
fn duplicate_role_in_declaration_is_rejected() {
	let mut reg = TagRegistry::new();
	let err = reg
		.register(decl("h").with_role(Role::Handler).with_role(Role::Handler))
		.unwrap_err();
	assert_eq!(
		err,
		RegistryError::DuplicateRole {
			id: "h".into(),
			role: Role::Handler
		}
	);
	assert!(reg.is_empty());
	assert!(reg.by_role(Role::Handler).is_empty());
}

#[test]
fn tag_keeps_registration_position() {
	let mut reg = TagRegistry::new();
	reg.register(decl("first")).unwrap();
	reg.register(decl("second").with_role(Role::Handler)).unwrap();
	reg.register(decl("third").with_role(Role::Handler)).unwrap();

	reg.tag("first", Role::Handler).unwrap();
	assert_eq!(ids(reg.by_role(Role::Handler)), ["first", "second", "third"]);
}

#[test]
fn tag_rejects_held_role_and_unknown_id() {
	let mut reg = TagRegistry::new();
	reg.register(decl("h").with_role(Role::Handler)).unwrap();

	assert_eq!(
		reg.tag("h", Role::Handler),
		Err(RegistryError::DuplicateRole {
			id: "h".into(),
			role: Role::Handler
		})
	);
	assert_eq!(
		reg.tag("nope", Role::Processor),
		Err(RegistryError::UnknownIdentity { id: "nope".into() })
	);
	assert_eq!(ids(reg.by_role(Role::Handler)), ["h"]);
}

#[test]
fn remove_drops_role_membership() {
	let mut reg = TagRegistry::new();
	reg.register(decl("a").with_role(Role::Handler)).unwrap();
	reg.register(decl("b").with_role(Role::Handler).with_role(Role::Processor)).unwrap();
	reg.register(decl("c").with_role(Role::Handler)).unwrap();

	assert!(reg.remove("b").is_some());
	assert!(reg.remove("b").is_none());
	assert_eq!(ids(reg.by_role(Role::Handler)), ["a", "c"]);
	assert!(reg.by_role(Role::Processor).is_empty());

	let order: Vec<_> = reg.iter().map(|(id, _)| id.as_str()).collect();
	assert_eq!(order, ["a", "c"]);
}
