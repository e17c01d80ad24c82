use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap as HashMap};

use crate::{ComponentId, RegistryError, Role};

/// A component declaration as handed to [`TagRegistry::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDecl<T> {
	pub id: ComponentId,
	pub roles: Vec<Role>,
	/// Ordering priority, lower first. `None` behaves as 0.
	pub priority: Option<i32>,
	/// Factory reference owned by the surrounding container, never inspected here.
	pub payload: T,
}

impl<T> ComponentDecl<T> {
	pub fn new(id: impl Into<ComponentId>, payload: T) -> Self {
		Self {
			id: id.into(),
			roles: Vec::new(),
			priority: None,
			payload,
		}
	}

	pub fn with_role(mut self, role: Role) -> Self {
		self.roles.push(role);
		self
	}

	pub fn with_priority(mut self, priority: i32) -> Self {
		self.priority = Some(priority);
		self
	}
}

/// A declaration after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered<T> {
	roles: Vec<Role>,
	priority: Option<i32>,
	payload: T,
}

impl<T> Registered<T> {
	pub fn roles(&self) -> &[Role] {
		&self.roles
	}

	pub fn holds(&self, role: Role) -> bool {
		self.roles.contains(&role)
	}

	/// Effective priority (0 when none was declared).
	pub fn priority(&self) -> i32 {
		self.priority.unwrap_or(0)
	}

	pub fn declared_priority(&self) -> Option<i32> {
		self.priority
	}

	pub fn payload(&self) -> &T {
		&self.payload
	}

	pub fn payload_mut(&mut self) -> &mut T {
		&mut self.payload
	}

	pub fn into_payload(self) -> T {
		self.payload
	}
}

/// Registry of tagged component declarations.
///
/// Iteration and every per-role view follow registration order; that order is
/// the tie-break for components sharing a priority.
#[derive(Debug, Clone)]
pub struct TagRegistry<T> {
	entries: IndexMap<ComponentId, Registered<T>, FxBuildHasher>,
	by_role: HashMap<Role, Vec<ComponentId>>,
}

impl<T> Default for TagRegistry<T> {
	fn default() -> Self {
		Self {
			entries: IndexMap::default(),
			by_role: HashMap::default(),
		}
	}
}

impl<T> TagRegistry<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a declaration.
	///
	/// # Errors
	///
	/// [`RegistryError::DuplicateIdentity`] when the id is taken and
	/// [`RegistryError::DuplicateRole`] when the declaration lists a role twice.
	/// Both are detected before anything is inserted.
	pub fn register(&mut self, decl: ComponentDecl<T>) -> Result<(), RegistryError> {
		if self.entries.contains_key(&decl.id) {
			return Err(RegistryError::DuplicateIdentity { id: decl.id });
		}
		for (i, role) in decl.roles.iter().enumerate() {
			if decl.roles[..i].contains(role) {
				return Err(RegistryError::DuplicateRole { id: decl.id, role: *role });
			}
		}

		let ComponentDecl { id, roles, priority, payload } = decl;
		for &role in &roles {
			self.by_role.entry(role).or_default().push(id.clone());
		}
		self.entries.insert(id, Registered { roles, priority, payload });
		Ok(())
	}

	/// Adds `role` to an already registered component.
	///
	/// The component keeps its registration position in the role's view.
	pub fn tag(&mut self, id: &str, role: Role) -> Result<(), RegistryError> {
		let Some((index, key, entry)) = self.entries.get_full_mut(id) else {
			return Err(RegistryError::UnknownIdentity { id: id.into() });
		};
		if entry.holds(role) {
			return Err(RegistryError::DuplicateRole { id: key.clone(), role });
		}
		entry.roles.push(role);
		let key = key.clone();

		let entries = &self.entries;
		let view = self.by_role.entry(role).or_default();
		let pos = view.partition_point(|other| entries.get_index_of(other).is_some_and(|i| i < index));
		view.insert(pos, key);
		Ok(())
	}

	/// Removes a component and drops it from every role view.
	pub fn remove(&mut self, id: &str) -> Option<Registered<T>> {
		let removed = self.entries.shift_remove(id)?;
		for role in &removed.roles {
			if let Some(view) = self.by_role.get_mut(role) {
				view.retain(|other| other.as_str() != id);
			}
		}
		Some(removed)
	}

	/// Components holding `role`, in registration order. Empty when none do.
	pub fn by_role(&self, role: Role) -> &[ComponentId] {
		self.by_role.get(&role).map_or(&[], Vec::as_slice)
	}

	/// Declared priority of `id`, or 0 when none was declared or `id` is unknown.
	pub fn priority_of(&self, id: &str) -> i32 {
		self.entries.get(id).map_or(0, Registered::priority)
	}

	pub fn get(&self, id: &str) -> Option<&Registered<T>> {
		self.entries.get(id)
	}

	pub fn get_key_value(&self, id: &str) -> Option<(&ComponentId, &Registered<T>)> {
		self.entries.get_key_value(id)
	}

	pub fn get_mut(&mut self, id: &str) -> Option<&mut Registered<T>> {
		self.entries.get_mut(id)
	}

	pub fn contains(&self, id: &str) -> bool {
		self.entries.contains_key(id)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&ComponentId, &Registered<T>)> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests;
